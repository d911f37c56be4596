use proptest::prelude::*;

use super::*;
use crate::mapping::IconMapping;

/// Builds a result with `new` new icons and `linked` linked icons.
fn result_with(new: usize, linked: usize) -> ClassificationResult {
    ClassificationResult {
        new_icons: (0..new)
            .map(|i| IconMapping::new(format!("new.{i}"), format!("new_{i}")))
            .collect(),
        linked_icons: (0..linked)
            .map(|i| IconMapping::new(format!("linked.{i}"), "shared"))
            .collect(),
    }
}

fn config() -> ThresholdConfig {
    ThresholdConfig::builder()
        .release_day(1)
        .link_threshold(20)
        .new_threshold(100)
        .build()
        .unwrap()
}

#[test]
fn test_defaults() {
    let config = ThresholdConfig::default();
    assert_eq!(config.release_day(), 1);
    assert_eq!(config.link_threshold(), 20);
    assert_eq!(config.new_threshold(), 100);
    assert_eq!(ThresholdConfig::builder().build().unwrap(), config);
}

#[test]
fn test_builder_rejects_invalid_day() {
    for day in [0, 32] {
        let err = ThresholdConfig::builder().release_day(day).build().unwrap_err();
        assert!(matches!(err, ReleaseError::ConfigError { .. }));
    }
}

#[test]
fn test_minor_when_both_thresholds_met() {
    let next = predict_next_version(&result_with(150, 25), "v2.12.0", &config()).unwrap();
    assert_eq!(next.to_string(), "v2.13.0");
}

#[test]
fn test_patch_when_new_threshold_missed() {
    let next = predict_next_version(&result_with(5, 25), "v2.12.0", &config()).unwrap();
    assert_eq!(next.to_string(), "v2.12.1");
}

#[test]
fn test_patch_when_link_threshold_missed() {
    let next = predict_next_version(&result_with(150, 3), "v2.12.4", &config()).unwrap();
    assert_eq!(next.to_string(), "v2.12.5");
}

#[test]
fn test_minor_resets_patch() {
    let next = predict_next_version(&result_with(100, 20), "v3.4.7", &config()).unwrap();
    assert_eq!(next.to_string(), "v3.5.0");
}

#[test]
fn test_missing_v_prefix_rejected() {
    let err = predict_next_version(&result_with(150, 25), "2.12.0", &config()).unwrap_err();
    assert!(matches!(
        err,
        ReleaseError::InvalidVersionFormat { value } if value == "2.12.0"
    ));
}

#[test]
fn test_saturated_patch_is_an_error() {
    let err = predict_next_version(&result_with(0, 0), "v0.0.18446744073709551615", &config())
        .unwrap_err();
    assert!(matches!(err, ReleaseError::VersionOverflow { .. }));
}

#[test]
fn test_manual_override_ignores_everything() {
    let empty = ClassificationResult::default();
    assert!(is_greenlight(&empty, true, &config(), 17));
    assert_eq!(
        evaluate_greenlight(&empty, true, &config(), 17),
        Greenlight::Manual
    );
}

#[test]
fn test_wrong_day_blocks_even_with_enough_icons() {
    let result = result_with(500, 500);
    assert!(!is_greenlight(&result, false, &config(), 2));
    assert_eq!(
        evaluate_greenlight(&result, false, &config(), 2),
        Greenlight::WrongDay {
            today: 2,
            release_day: 1
        }
    );
}

#[test]
fn test_checks_report_first_failure() {
    // Both counts fail; the new-icon check runs first.
    assert_eq!(
        evaluate_greenlight(&result_with(0, 0), false, &config(), 1),
        Greenlight::NotEnoughNewIcons {
            count: 0,
            threshold: 100
        }
    );

    assert_eq!(
        evaluate_greenlight(&result_with(100, 19), false, &config(), 1),
        Greenlight::NotEnoughLinkedIcons {
            count: 19,
            threshold: 20
        }
    );
}

#[test]
fn test_approved_on_release_day() {
    let result = result_with(100, 20);
    assert_eq!(
        evaluate_greenlight(&result, false, &config(), 1),
        Greenlight::Approved
    );
    assert!(is_greenlight(&result, false, &config(), 1));
}

proptest! {
    #[test]
    fn test_minor_iff_gate_passes_on_release_day(new in 0usize..150, linked in 0usize..40) {
        let result = result_with(new, linked);
        let next = predict_next_version(&result, "v1.0.0", &config()).unwrap();
        let gate = is_greenlight(&result, false, &config(), 1);

        prop_assert_eq!(next == Version::new(1, 1, 0), gate);
        prop_assert!(next == Version::new(1, 1, 0) || next == Version::new(1, 0, 1));
    }
}

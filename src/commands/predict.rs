//! Predict command: classify appfilter changes, pick the next version and
//! decide whether to release.

use std::path::Path;

use chrono::Datelike;

use crate::cli::DEFAULT_APPFILTER_PATH;
use crate::commands::compare;
use crate::error::{ReleaseError, Result};
use crate::logging::Logger;
use crate::output::ReleaseOutputs;
use crate::predict::{
    ThresholdConfig, ThresholdConfigBuilder, evaluate_greenlight, select_increment,
};
use crate::version::{Increment, Version};

pub struct Predict<'a> {
    repo_dir: &'a Path,
    appfilter: &'a Path,
    previous_ref: Option<&'a str>,
    last_version: Option<&'a str>,
    config: ThresholdConfig,
    manual: bool,
    today: Option<u32>,
    increment: Option<Increment>,
    output: Option<&'a Path>,
    verbose: u8,
    quiet: bool,
}

pub struct PredictBuilder<'a> {
    repo_dir: Option<&'a Path>,
    appfilter: &'a Path,
    previous_ref: Option<&'a str>,
    last_version: Option<&'a str>,
    config: ThresholdConfigBuilder,
    manual: bool,
    today: Option<u32>,
    increment: Option<&'a str>,
    output: Option<&'a Path>,
    verbose: u8,
    quiet: bool,
}

impl Default for PredictBuilder<'_> {
    fn default() -> Self {
        Self {
            repo_dir: None,
            appfilter: Path::new(DEFAULT_APPFILTER_PATH),
            previous_ref: None,
            last_version: None,
            config: ThresholdConfig::builder(),
            manual: false,
            today: None,
            increment: None,
            output: None,
            verbose: 0,
            quiet: false,
        }
    }
}

impl<'a> PredictBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repo_dir(mut self, path: &'a Path) -> Self {
        self.repo_dir = Some(path);
        self
    }

    pub fn appfilter(mut self, path: &'a Path) -> Self {
        self.appfilter = path;
        self
    }

    pub fn previous_ref(mut self, reference: Option<&'a str>) -> Self {
        self.previous_ref = reference;
        self
    }

    pub fn last_version(mut self, version: Option<&'a str>) -> Self {
        self.last_version = version;
        self
    }

    pub fn release_day(mut self, day: u32) -> Self {
        self.config = self.config.release_day(day);
        self
    }

    pub fn link_threshold(mut self, threshold: usize) -> Self {
        self.config = self.config.link_threshold(threshold);
        self
    }

    pub fn new_threshold(mut self, threshold: usize) -> Self {
        self.config = self.config.new_threshold(threshold);
        self
    }

    pub fn manual(mut self, manual: bool) -> Self {
        self.manual = manual;
        self
    }

    pub fn today(mut self, day: Option<u32>) -> Self {
        self.today = day;
        self
    }

    pub fn increment(mut self, increment: Option<&'a str>) -> Self {
        self.increment = increment;
        self
    }

    pub fn output(mut self, path: Option<&'a Path>) -> Self {
        self.output = path;
        self
    }

    pub fn verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Validate the thresholds and increment, then build the command.
    pub fn build(self) -> Result<Predict<'a>> {
        let repo_dir = self.repo_dir.ok_or_else(|| ReleaseError::ConfigError {
            message: "repository directory is required for predict".to_string(),
        })?;
        let increment = self.increment.map(str::parse::<Increment>).transpose()?;

        Ok(Predict {
            repo_dir,
            appfilter: self.appfilter,
            previous_ref: self.previous_ref,
            last_version: self.last_version,
            config: self.config.build()?,
            manual: self.manual,
            today: self.today,
            increment,
            output: self.output,
            verbose: self.verbose,
            quiet: self.quiet,
        })
    }
}

impl<'a> Predict<'a> {
    pub fn builder() -> PredictBuilder<'a> {
        PredictBuilder::new()
    }

    /// Execute the prediction.
    ///
    /// Prints the next version on stdout and, when an output file is set,
    /// appends the results to it.
    pub fn run(self) -> Result<ReleaseOutputs> {
        let log = Logger::new(self.verbose, self.quiet);

        let comparison = compare(self.repo_dir, self.appfilter, self.previous_ref, &log)?;
        let result = &comparison.result;

        let last_version: Version = match self.last_version {
            Some(version) => version.parse()?,
            None => comparison.last_release.ok_or(ReleaseError::NoReleaseTag)?,
        };

        let increment = match self.increment {
            Some(increment) => {
                log.verbose(1, format!("Using requested {increment} increment"));
                increment
            }
            None => select_increment(result, &self.config),
        };
        let version = last_version.bump(increment)?;

        let today = self.today.unwrap_or_else(|| chrono::Utc::now().day());
        let greenlight = evaluate_greenlight(result, self.manual, &self.config, today);

        log.info(format!("Changes since {}:", comparison.previous_ref));
        log.info(format!(
            "  New icons: {} (threshold {})",
            result.new_count(),
            self.config.new_threshold()
        ));
        log.info(format!(
            "  Linked icons: {} (threshold {})",
            result.linked_count(),
            self.config.link_threshold()
        ));
        log.info(format!("Next version: {last_version} -> {version} ({increment})"));
        if greenlight.is_go() {
            log.info(format!("Release greenlit: {greenlight}"));
        } else {
            log.info(format!("Release held: {greenlight}"));
        }

        let outputs = ReleaseOutputs {
            version,
            greenlight: greenlight.is_go(),
            new_icons: result.new_count(),
            linked_icons: result.linked_count(),
        };

        if let Some(path) = self.output {
            outputs.append_to(path)?;
            log.verbose(1, format!("Results written to {}", path.display()));
        }

        println!("{version}");

        Ok(outputs)
    }
}

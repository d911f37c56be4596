//! Diff command implementation.

use std::path::Path;

use crate::commands::compare;
use crate::error::Result;
use crate::logging::Logger;
use crate::mapping::IconMapping;

/// Executes the diff command.
///
/// Reports how many icons were added since the previous release. At `-v`
/// every added mapping is listed, grouped into new and linked icons.
pub fn diff(
    repo_dir: &Path,
    appfilter: &Path,
    previous_ref: Option<&str>,
    verbose: u8,
    quiet: bool,
) -> Result<()> {
    let log = Logger::new(verbose, quiet);
    let comparison = compare(repo_dir, appfilter, previous_ref, &log)?;
    let result = &comparison.result;

    log.info(format!("Changes since {}:", comparison.previous_ref));
    log.info(format!("  New icons: {}", result.new_count()));
    log.info(format!("  Linked icons: {}", result.linked_count()));

    if log.level() > 0 {
        print_mappings(&log, "New icons", &result.sorted_new_icons());
        print_mappings(&log, "Linked icons", &result.sorted_linked_icons());
    }

    Ok(())
}

fn print_mappings(log: &Logger, heading: &str, mappings: &[&IconMapping]) {
    if mappings.is_empty() {
        return;
    }

    log.info(format!("{heading}:"));
    for mapping in mappings {
        match mapping.name() {
            Some(name) => log.info(format!(
                "  {} <- {} ({name})",
                mapping.drawable(),
                mapping.component()
            )),
            None => log.info(format!("  {} <- {}", mapping.drawable(), mapping.component())),
        }
    }
}

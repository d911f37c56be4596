//! CI output sink.
//!
//! Results are written as `key=value` lines, the format GitHub Actions reads
//! from the file named by `GITHUB_OUTPUT`. The file is appended to since
//! other steps in the same job may have written to it already.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{ReleaseError, Result};
use crate::version::Version;

/// Values handed to downstream CI steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutputs {
    pub version: Version,
    pub greenlight: bool,
    pub new_icons: usize,
    pub linked_icons: usize,
}

impl fmt::Display for ReleaseOutputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version={}", self.version)?;
        writeln!(f, "greenlight={}", self.greenlight)?;
        writeln!(f, "new_icons={}", self.new_icons)?;
        writeln!(f, "linked_icons={}", self.linked_icons)
    }
}

impl ReleaseOutputs {
    /// Appends the outputs to `path`, creating the file if needed.
    pub fn append_to(&self, path: &Path) -> Result<()> {
        let io_error = |source| ReleaseError::IoError {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_error)?;
        write!(file, "{self}").map_err(io_error)?;
        file.flush().map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn outputs() -> ReleaseOutputs {
        ReleaseOutputs {
            version: Version::new(2, 13, 0),
            greenlight: true,
            new_icons: 150,
            linked_icons: 25,
        }
    }

    #[test]
    fn test_render() {
        assert_eq!(
            outputs().to_string(),
            "version=v2.13.0\ngreenlight=true\nnew_icons=150\nlinked_icons=25\n"
        );
    }

    #[test]
    fn test_append_keeps_existing_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("github_output");
        fs::write(&path, "earlier=step\n").unwrap();

        outputs().append_to(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("earlier=step\nversion=v2.13.0\n"));
        assert!(content.ends_with("linked_icons=25\n"));
    }

    #[test]
    fn test_append_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("output");

        let err = outputs().append_to(&path).unwrap_err();
        assert!(matches!(err, ReleaseError::IoError { .. }));
    }
}

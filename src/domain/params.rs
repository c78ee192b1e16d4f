use crate::error::{ReleaseTrainError, Result};
use std::path::PathBuf;

/// Immutable inputs for one workflow run.
///
/// Version strings are treated as opaque text - no semantic version parsing
/// is applied, they only need to match the strings present in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowParameters {
    pub root_dir: PathBuf,
    pub current_version: String,
    pub release_version: String,
    pub next_dev_version: String,
}

impl WorkflowParameters {
    pub fn new(
        root_dir: impl Into<PathBuf>,
        current_version: impl Into<String>,
        release_version: impl Into<String>,
        next_dev_version: impl Into<String>,
    ) -> Self {
        WorkflowParameters {
            root_dir: root_dir.into(),
            current_version: current_version.into(),
            release_version: release_version.into(),
            next_dev_version: next_dev_version.into(),
        }
    }

    /// Check all invariants before any mutation happens.
    ///
    /// All four fields must be non-empty and `root_dir` must be an existing
    /// directory.
    pub fn validate(&self) -> Result<()> {
        let versions = [
            ("current version", &self.current_version),
            ("release version", &self.release_version),
            ("next development version", &self.next_dev_version),
        ];

        for (name, value) in versions {
            if value.trim().is_empty() {
                return Err(ReleaseTrainError::params(format!(
                    "{} must not be empty",
                    name
                )));
            }
        }

        if self.root_dir.as_os_str().is_empty() {
            return Err(ReleaseTrainError::params("directory must not be empty"));
        }

        if !self.root_dir.is_dir() {
            return Err(ReleaseTrainError::params(format!(
                "'{}' is not a directory",
                self.root_dir.display()
            )));
        }

        Ok(())
    }
}

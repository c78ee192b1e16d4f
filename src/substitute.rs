//! Bulk literal text substitution across a directory tree.
//!
//! Whole-file load, literal `str::replace`, whole-file store. Substitution
//! is not pattern-based and the extension filter is a plain suffix match.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ReleaseTrainError, Result};
use crate::ui;

/// A single substitution pass over one directory scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionTask {
    pub scope: PathBuf,
    pub search: String,
    pub replace: String,
    pub extension: String,
}

/// Counts reported back to the caller after a pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SubstitutionSummary {
    pub files_visited: usize,
    pub files_changed: usize,
}

impl SubstitutionTask {
    /// Walk the scope and apply the replacement to every matching file.
    ///
    /// Per-file I/O errors are logged and skipped; a single unreadable file
    /// must not block the overall release. Only an unusable scope is an
    /// error.
    pub fn execute(&self) -> Result<SubstitutionSummary> {
        if !self.scope.is_dir() {
            return Err(ReleaseTrainError::substitution(format!(
                "'{}' is not a readable directory",
                self.scope.display()
            )));
        }

        let mut summary = SubstitutionSummary::default();

        for entry in WalkDir::new(&self.scope) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    ui::display_error(&format!(
                        "Cannot traverse '{}': {}",
                        self.scope.display(),
                        e
                    ));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            // Literal suffix match, not a glob
            if !entry.path().to_string_lossy().ends_with(&self.extension) {
                continue;
            }

            summary.files_visited += 1;
            match replace_in_file(entry.path(), &self.search, &self.replace) {
                Ok(true) => {
                    summary.files_changed += 1;
                    ui::display_status(&format!("Replaced in file: {}", entry.path().display()));
                }
                Ok(false) => {}
                Err(e) => {
                    ui::display_error(&format!(
                        "Failed to replace in file {}: {}",
                        entry.path().display(),
                        e
                    ));
                }
            }
        }

        Ok(summary)
    }
}

/// Replace every non-overlapping occurrence of `search` with `replace` in all
/// regular files under `scope` whose path ends with `extension`.
pub fn replace_in_files(
    scope: &Path,
    search: &str,
    replace: &str,
    extension: &str,
) -> Result<SubstitutionSummary> {
    SubstitutionTask {
        scope: scope.to_path_buf(),
        search: search.to_string(),
        replace: replace.to_string(),
        extension: extension.to_string(),
    }
    .execute()
}

/// Rewrite one file, returning whether its content changed.
///
/// The file is only written back when the replacement actually changed
/// something, so untouched files keep their timestamps. Files that are not
/// valid UTF-8 are left alone rather than risk corrupting them.
fn replace_in_file(path: &Path, search: &str, replace: &str) -> Result<bool> {
    let bytes = fs::read(path)?;

    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(_) => {
            ui::display_status(&format!(
                "Skipping non-text file: {}",
                path.display()
            ));
            return Ok(false);
        }
    };

    if !content.contains(search) {
        return Ok(false);
    }

    let modified = content.replace(search, replace);
    fs::write(path, modified)?;
    Ok(true)
}

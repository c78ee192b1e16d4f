//! External release tool invocation.
//!
//! The release plugin is driven as an opaque pair of sub-commands, `clean`
//! and `prepare`. Nothing beyond the process exit code and its output stream
//! is interpreted; the tool's own commits and tags are its business.

pub mod maven;
pub mod mock;

pub use maven::MavenReleaseTool;
pub use mock::MockReleaseTool;

use crate::ui;

/// Result of one external process invocation.
///
/// `exit_code` is `None` when the process could not be launched or waited on,
/// or was killed by a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub exit_code: Option<i32>,
    pub output_lines: Vec<String>,
}

impl Invocation {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// An invocation that never produced a process.
    pub fn launch_failure() -> Self {
        Invocation {
            exit_code: None,
            output_lines: Vec::new(),
        }
    }
}

/// Release tool capability set consumed by the workflow.
///
/// Implementations never return an error: a failed launch is reported as a
/// failed [Invocation] so the caller's sequencing is not interrupted.
pub trait ReleaseTool {
    /// Run the tool's clean sub-command in the tree root.
    fn clean(&self) -> Invocation;

    /// Run the tool's release-prepare sub-command, answering its interactive
    /// version prompt with `release_version` and passing `next_dev_version`
    /// as the development version argument.
    fn prepare(&self, release_version: &str, next_dev_version: &str) -> Invocation;
}

/// Full release cycle: clean, prepare, clean.
///
/// All three legs run unconditionally in sequence; a failed prepare is logged
/// as a distinguishable failure but still followed by the trailing clean.
/// Returns whether the prepare leg succeeded.
pub fn run_release(tool: &dyn ReleaseTool, release_version: &str, next_dev_version: &str) -> bool {
    log_leg("Release clean", &tool.clean());

    let prepare = tool.prepare(release_version, next_dev_version);
    log_leg("Release prepare", &prepare);

    log_leg("Release clean", &tool.clean());

    prepare.succeeded()
}

fn log_leg(name: &str, invocation: &Invocation) {
    match invocation.exit_code {
        Some(0) => ui::display_success(&format!("{} completed successfully", name)),
        Some(code) => ui::display_error(&format!("{} failed with exit code: {}", name, code)),
        None => ui::display_error(&format!("{} could not be run", name)),
    }
}

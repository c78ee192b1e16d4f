//! Console output for workflow progress.
//!
//! The workflow is non-interactive; this module only formats and prints.

pub mod formatter;

pub use formatter::{
    display_error, display_report, display_status, display_step, display_success,
    display_tool_line,
};

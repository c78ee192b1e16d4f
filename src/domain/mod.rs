//! Domain types - pure workflow data independent of git and process plumbing

pub mod params;
pub mod report;

pub use params::WorkflowParameters;
pub use report::{StepRecord, StepStatus, WorkflowReport};

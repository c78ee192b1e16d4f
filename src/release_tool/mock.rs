use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use crate::release_tool::{Invocation, ReleaseTool};

/// Invocations observed by the mock, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    Clean,
    Prepare {
        release_version: String,
        next_dev_version: String,
    },
}

/// Mock release tool for testing the workflow without spawning processes.
///
/// Optionally snapshots the content of one file at every invocation, so tests
/// can assert what the tree looked like while the tool was "running" (the
/// scm.tag element must be pinned to the release version at that point).
pub struct MockReleaseTool {
    calls: RefCell<Vec<ToolCall>>,
    snapshots: RefCell<Vec<String>>,
    observe_file: Option<PathBuf>,
    fail_prepare: bool,
}

impl MockReleaseTool {
    pub fn new() -> Self {
        MockReleaseTool {
            calls: RefCell::new(Vec::new()),
            snapshots: RefCell::new(Vec::new()),
            observe_file: None,
            fail_prepare: false,
        }
    }

    /// Snapshot this file's content at each invocation
    pub fn observing(mut self, path: impl Into<PathBuf>) -> Self {
        self.observe_file = Some(path.into());
        self
    }

    /// Make the prepare leg report a non-zero exit code
    pub fn failing_prepare(mut self) -> Self {
        self.fail_prepare = true;
        self
    }

    /// All invocations in call order
    pub fn calls(&self) -> Vec<ToolCall> {
        self.calls.borrow().clone()
    }

    /// Observed file snapshots, one per invocation, in call order
    pub fn snapshots(&self) -> Vec<String> {
        self.snapshots.borrow().clone()
    }

    fn observe(&self) {
        if let Some(path) = &self.observe_file {
            let content = fs::read_to_string(path).unwrap_or_default();
            self.snapshots.borrow_mut().push(content);
        }
    }
}

impl Default for MockReleaseTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseTool for MockReleaseTool {
    fn clean(&self) -> Invocation {
        self.calls.borrow_mut().push(ToolCall::Clean);
        self.observe();
        Invocation {
            exit_code: Some(0),
            output_lines: Vec::new(),
        }
    }

    fn prepare(&self, release_version: &str, next_dev_version: &str) -> Invocation {
        self.calls.borrow_mut().push(ToolCall::Prepare {
            release_version: release_version.to_string(),
            next_dev_version: next_dev_version.to_string(),
        });
        self.observe();

        let exit_code = if self.fail_prepare { Some(1) } else { Some(0) };
        Invocation {
            exit_code,
            output_lines: Vec::new(),
        }
    }
}

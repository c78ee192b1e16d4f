//! Top-level release workflow sequencing.
//!
//! A fixed, linear state machine: bump the tree to the release version,
//! commit each logical change, hand over to the external release tool with
//! tag cleanup on both sides, then perform the mirrored bumps to the next
//! development version. No step failure aborts the run; each outcome is
//! recorded and the next step proceeds.

use std::path::Path;

use crate::config::Config;
use crate::domain::{WorkflowParameters, WorkflowReport};
use crate::git::{CommitOutcome, Repository};
use crate::release_tool::{self, ReleaseTool};
use crate::substitute;
use crate::ui;

/// The floating scm.tag marker used between releases.
const SCM_TAG_FLOATING: &str = "<tag>HEAD</tag>";

fn scm_tag(version: &str) -> String {
    format!("<tag>{}</tag>", version)
}

/// Sequences substitution, commit, tag cleanup and the external release tool
/// into the full release-then-advance workflow.
pub struct ReleaseWorkflow<'a> {
    params: &'a WorkflowParameters,
    config: &'a Config,
    repo: &'a dyn Repository,
    tool: &'a dyn ReleaseTool,
}

impl<'a> ReleaseWorkflow<'a> {
    pub fn new(
        params: &'a WorkflowParameters,
        config: &'a Config,
        repo: &'a dyn Repository,
        tool: &'a dyn ReleaseTool,
    ) -> Self {
        ReleaseWorkflow {
            params,
            config,
            repo,
            tool,
        }
    }

    /// Run all nine steps in order and report every outcome.
    pub fn run(&self) -> WorkflowReport {
        let p = self.params;
        let mut report = WorkflowReport::new();

        self.bump_docs_and_scripts(&mut report, &p.current_version, &p.release_version);
        self.bump_unmanaged_modules(&mut report, &p.current_version, &p.release_version);
        self.pin_scm_tag(&mut report);

        self.delete_release_tags(&mut report);
        self.run_release_tool(&mut report);
        self.delete_release_tags(&mut report);

        self.bump_docs_and_scripts(&mut report, &p.release_version, &p.next_dev_version);
        self.bump_unmanaged_modules(&mut report, &p.release_version, &p.next_dev_version);
        self.restore_scm_tag(&mut report);

        report
    }

    /// Substitute `from -> to` in `*.md` and `*.sh` under the root, commit.
    fn bump_docs_and_scripts(&self, report: &mut WorkflowReport, from: &str, to: &str) {
        let name = format!("Bump docs and scripts to {}", to);
        ui::display_step(&name);

        let mut ok = true;
        for extension in [".md", ".sh"] {
            ok &= self.substitute(&self.params.root_dir, from, to, extension);
        }
        ok &= self.commit(&name);

        report.record(name, ok);
    }

    /// Substitute `from -> to` in `*.xml` under each configured unmanaged
    /// module scope, commit.
    fn bump_unmanaged_modules(&self, report: &mut WorkflowReport, from: &str, to: &str) {
        let name = format!("Bump versions not managed by release tool to {}", to);
        ui::display_step(&name);

        let mut ok = true;
        for scope in &self.config.unmanaged_scopes {
            ok &= self.substitute(&self.params.root_dir.join(scope), from, to, ".xml");
        }
        ok &= self.commit(&name);

        report.record(name, ok);
    }

    /// Pin the scm.tag element to the concrete release version.
    fn pin_scm_tag(&self, report: &mut WorkflowReport) {
        let release = &self.params.release_version;
        let name = format!("Set scm.tag to {}", release);
        ui::display_step(&name);

        let mut ok = self.substitute(
            &self.params.root_dir,
            SCM_TAG_FLOATING,
            &scm_tag(release),
            ".xml",
        );
        ok &= self.commit(&name);

        report.record(name, ok);
    }

    /// Restore the scm.tag element to the floating marker.
    fn restore_scm_tag(&self, report: &mut WorkflowReport) {
        let name = "Set scm.tag to HEAD".to_string();
        ui::display_step(&name);

        let mut ok = self.substitute(
            &self.params.root_dir,
            &scm_tag(&self.params.release_version),
            SCM_TAG_FLOATING,
            ".xml",
        );
        ok &= self.commit(&name);

        report.record(name, ok);
    }

    /// Delete the tags the release tool creates, so a re-run after a partial
    /// failure starts from a clean slate. Runs before and after the tool.
    fn delete_release_tags(&self, report: &mut WorkflowReport) {
        let name = "Delete release tags";
        ui::display_step(name);

        let mut ok = true;
        for tag in [&self.params.release_version, &self.params.next_dev_version] {
            match self.repo.delete_tag(tag) {
                Ok(_) => ui::display_status(&format!("Tag deleted: {}", tag)),
                Err(e) => {
                    ui::display_error(&format!("Failed to delete tag '{}': {}", tag, e));
                    ok = false;
                }
            }
        }

        report.record(name, ok);
    }

    /// Hand over to the external release tool for its clean/prepare/clean
    /// cycle.
    fn run_release_tool(&self, report: &mut WorkflowReport) {
        let name = "Run release tool";
        ui::display_step(name);

        let ok = release_tool::run_release(
            self.tool,
            &self.params.release_version,
            &self.params.next_dev_version,
        );

        report.record(name, ok);
    }

    fn substitute(&self, scope: &Path, search: &str, replace: &str, extension: &str) -> bool {
        match substitute::replace_in_files(scope, search, replace, extension) {
            Ok(summary) => {
                ui::display_status(&format!(
                    "{} of {} '{}' file(s) updated under {}",
                    summary.files_changed,
                    summary.files_visited,
                    extension,
                    scope.display()
                ));
                true
            }
            Err(e) => {
                ui::display_error(&e.to_string());
                false
            }
        }
    }

    fn commit(&self, message: &str) -> bool {
        let staged = match self.repo.stage_all() {
            Ok(()) => true,
            Err(e) => {
                ui::display_error(&format!("Failed to stage changes: {}", e));
                false
            }
        };

        if !staged {
            return false;
        }

        match self.repo.commit(message) {
            Ok(CommitOutcome::Created) => {
                ui::display_success(&format!("Committed: {}", message));
                true
            }
            Ok(CommitOutcome::NothingToCommit) => {
                ui::display_status(&format!("Nothing to commit for: {}", message));
                true
            }
            Err(e) => {
                ui::display_error(&format!("Failed to commit changes: {}", e));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::RecordedOp;
    use crate::git::MockRepository;
    use crate::release_tool::mock::ToolCall;
    use crate::release_tool::MockReleaseTool;
    use std::fs;

    fn test_config(scopes: Vec<String>) -> Config {
        Config {
            unmanaged_scopes: scopes,
            ..Config::default()
        }
    }

    fn test_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "version 1.0.0").unwrap();
        fs::write(dir.path().join("build.sh"), "IMAGE_TAG=1.0.0").unwrap();
        fs::write(
            dir.path().join("pom.xml"),
            "<scm><tag>HEAD</tag></scm>",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("modules/app-docker")).unwrap();
        fs::write(
            dir.path().join("modules/app-docker/pom.xml"),
            "<version>1.0.0</version>",
        )
        .unwrap();
        dir
    }

    fn params_for(dir: &tempfile::TempDir) -> WorkflowParameters {
        WorkflowParameters::new(dir.path(), "1.0.0", "1.1.0", "1.1.1-SNAPSHOT")
    }

    #[test]
    fn test_commit_messages_in_spec_order() {
        let dir = test_tree();
        let params = params_for(&dir);
        let config = test_config(vec!["modules/app-docker".to_string()]);
        let repo = MockRepository::new();
        let tool = MockReleaseTool::new();

        ReleaseWorkflow::new(&params, &config, &repo, &tool).run();

        assert_eq!(
            repo.commit_messages(),
            vec![
                "Bump docs and scripts to 1.1.0",
                "Bump versions not managed by release tool to 1.1.0",
                "Set scm.tag to 1.1.0",
                "Bump docs and scripts to 1.1.1-SNAPSHOT",
                "Bump versions not managed by release tool to 1.1.1-SNAPSHOT",
                "Set scm.tag to HEAD",
            ]
        );
    }

    #[test]
    fn test_tags_deleted_before_and_after_tool() {
        let dir = test_tree();
        let params = params_for(&dir);
        let config = test_config(vec![]);
        let repo = MockRepository::new().with_tags(["1.1.0"]);
        let tool = MockReleaseTool::new();

        ReleaseWorkflow::new(&params, &config, &repo, &tool).run();

        assert_eq!(
            repo.deleted_tags(),
            vec!["1.1.0", "1.1.1-SNAPSHOT", "1.1.0", "1.1.1-SNAPSHOT"]
        );

        // Deletions must bracket the tool invocation
        let ops = repo.ops();
        let first_delete = ops
            .iter()
            .position(|op| matches!(op, RecordedOp::DeleteTag(_)))
            .unwrap();
        let last_delete = ops
            .iter()
            .rposition(|op| matches!(op, RecordedOp::DeleteTag(_)))
            .unwrap();
        let commits_between: Vec<_> = ops[first_delete..last_delete]
            .iter()
            .filter(|op| matches!(op, RecordedOp::Commit(_)))
            .collect();
        assert!(commits_between.is_empty());
    }

    #[test]
    fn test_tool_runs_clean_prepare_clean() {
        let dir = test_tree();
        let params = params_for(&dir);
        let config = test_config(vec![]);
        let repo = MockRepository::new();
        let tool = MockReleaseTool::new();

        ReleaseWorkflow::new(&params, &config, &repo, &tool).run();

        assert_eq!(
            tool.calls(),
            vec![
                ToolCall::Clean,
                ToolCall::Prepare {
                    release_version: "1.1.0".to_string(),
                    next_dev_version: "1.1.1-SNAPSHOT".to_string(),
                },
                ToolCall::Clean,
            ]
        );
    }

    #[test]
    fn test_scm_tag_pinned_while_tool_runs() {
        let dir = test_tree();
        let params = params_for(&dir);
        let config = test_config(vec![]);
        let repo = MockRepository::new();
        let tool = MockReleaseTool::new().observing(dir.path().join("pom.xml"));

        ReleaseWorkflow::new(&params, &config, &repo, &tool).run();

        for snapshot in tool.snapshots() {
            assert_eq!(snapshot, "<scm><tag>1.1.0</tag></scm>");
        }

        // Restored to the floating marker after the run
        let final_pom = fs::read_to_string(dir.path().join("pom.xml")).unwrap();
        assert_eq!(final_pom, "<scm><tag>HEAD</tag></scm>");
    }

    #[test]
    fn test_tree_ends_at_next_dev_version() {
        let dir = test_tree();
        let params = params_for(&dir);
        let config = test_config(vec!["modules/app-docker".to_string()]);
        let repo = MockRepository::new();
        let tool = MockReleaseTool::new();

        ReleaseWorkflow::new(&params, &config, &repo, &tool).run();

        assert_eq!(
            fs::read_to_string(dir.path().join("README.md")).unwrap(),
            "version 1.1.1-SNAPSHOT"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("build.sh")).unwrap(),
            "IMAGE_TAG=1.1.1-SNAPSHOT"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("modules/app-docker/pom.xml")).unwrap(),
            "<version>1.1.1-SNAPSHOT</version>"
        );
    }

    #[test]
    fn test_failed_commits_do_not_abort_the_run() {
        let dir = test_tree();
        let params = params_for(&dir);
        let config = test_config(vec![]);
        let repo = MockRepository::new().failing_commits();
        let tool = MockReleaseTool::new();

        let report = ReleaseWorkflow::new(&params, &config, &repo, &tool).run();

        // All nine steps ran and were recorded
        assert_eq!(report.steps().len(), 9);
        assert!(!report.all_completed());
        // The tool still ran despite earlier failures
        assert_eq!(tool.calls().len(), 3);
    }

    #[test]
    fn test_missing_unmanaged_scope_fails_step_but_continues() {
        let dir = test_tree();
        let params = params_for(&dir);
        let config = test_config(vec!["no/such/module".to_string()]);
        let repo = MockRepository::new();
        let tool = MockReleaseTool::new();

        let report = ReleaseWorkflow::new(&params, &config, &repo, &tool).run();

        assert_eq!(report.steps().len(), 9);
        assert_eq!(report.failed_count(), 2); // both unmanaged-module steps
        assert_eq!(tool.calls().len(), 3);
    }
}

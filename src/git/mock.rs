use crate::error::Result;
use crate::git::{CommitOutcome, Repository, TagDeletion};
use std::cell::RefCell;
use std::collections::HashSet;

/// Operations observed by the mock, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedOp {
    StageAll,
    Commit(String),
    DeleteTag(String),
}

/// Mock repository for testing without actual git operations.
///
/// Records every call so tests can assert on the exact operation sequence
/// the workflow produced.
pub struct MockRepository {
    ops: RefCell<Vec<RecordedOp>>,
    tags: RefCell<HashSet<String>>,
    fail_commits: bool,
    nothing_to_commit: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            ops: RefCell::new(Vec::new()),
            tags: RefCell::new(HashSet::new()),
            fail_commits: false,
            nothing_to_commit: false,
        }
    }

    /// Pre-populate tags so deletions report `Deleted` instead of `Missing`
    pub fn with_tags<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = RefCell::new(names.into_iter().map(Into::into).collect());
        self
    }

    /// Make every commit attempt fail
    pub fn failing_commits(mut self) -> Self {
        self.fail_commits = true;
        self
    }

    /// Make every commit report an unchanged tree
    pub fn without_changes(mut self) -> Self {
        self.nothing_to_commit = true;
        self
    }

    /// All operations in call order
    pub fn ops(&self) -> Vec<RecordedOp> {
        self.ops.borrow().clone()
    }

    /// Only the commit messages, in call order
    pub fn commit_messages(&self) -> Vec<String> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                RecordedOp::Commit(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    /// Only the deleted tag names, in call order
    pub fn deleted_tags(&self) -> Vec<String> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                RecordedOp::DeleteTag(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn stage_all(&self) -> Result<()> {
        self.ops.borrow_mut().push(RecordedOp::StageAll);
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<CommitOutcome> {
        self.ops
            .borrow_mut()
            .push(RecordedOp::Commit(message.to_string()));

        if self.fail_commits {
            return Err(git2::Error::from_str("mock commit failure").into());
        }
        if self.nothing_to_commit {
            return Ok(CommitOutcome::NothingToCommit);
        }
        Ok(CommitOutcome::Created)
    }

    fn delete_tag(&self, name: &str) -> Result<TagDeletion> {
        self.ops
            .borrow_mut()
            .push(RecordedOp::DeleteTag(name.to_string()));

        if self.tags.borrow_mut().remove(name) {
            Ok(TagDeletion::Deleted)
        } else {
            Ok(TagDeletion::Missing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_operation_order() {
        let repo = MockRepository::new();

        repo.stage_all().unwrap();
        repo.commit("first").unwrap();
        repo.delete_tag("v1").unwrap();

        assert_eq!(
            repo.ops(),
            vec![
                RecordedOp::StageAll,
                RecordedOp::Commit("first".to_string()),
                RecordedOp::DeleteTag("v1".to_string()),
            ]
        );
    }

    #[test]
    fn test_mock_tag_deletion_is_idempotent() {
        let repo = MockRepository::new().with_tags(["1.1.0"]);

        assert_eq!(repo.delete_tag("1.1.0").unwrap(), TagDeletion::Deleted);
        assert_eq!(repo.delete_tag("1.1.0").unwrap(), TagDeletion::Missing);
        assert_eq!(repo.delete_tag("absent").unwrap(), TagDeletion::Missing);
    }

    #[test]
    fn test_mock_commit_modes() {
        let repo = MockRepository::new();
        assert_eq!(repo.commit("msg").unwrap(), CommitOutcome::Created);

        let repo = MockRepository::new().without_changes();
        assert_eq!(repo.commit("msg").unwrap(), CommitOutcome::NothingToCommit);

        let repo = MockRepository::new().failing_commits();
        assert!(repo.commit("msg").is_err());
    }

    #[test]
    fn test_mock_commit_messages_helper() {
        let repo = MockRepository::new();
        repo.commit("a").unwrap();
        repo.delete_tag("t").unwrap();
        repo.commit("b").unwrap();

        assert_eq!(repo.commit_messages(), vec!["a", "b"]);
    }
}

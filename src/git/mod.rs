//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the three repository
//! operations the workflow needs: stage everything, commit, delete a tag.
//! The concrete implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A recording implementation for testing
//!
//! Orchestration code depends on the [Repository] trait rather than a concrete
//! implementation, so the sequencing logic can be exercised without a real
//! repository.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Outcome of a commit attempt.
///
/// Committing with nothing staged is an expected situation during a release
/// run (a substitution pass may match nothing), so it is reported as a value
/// rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new commit was created on the current branch.
    Created,
    /// The staged tree was identical to HEAD; history was left untouched.
    NothingToCommit,
}

/// Outcome of a tag deletion.
///
/// Deletion is a cleanup guard, not an assertion that the tag exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagDeletion {
    Deleted,
    /// The tag was already absent. Idempotent success.
    Missing,
}

/// Repository capability set consumed by the release workflow.
pub trait Repository {
    /// Stage all pending working-tree changes, including deletions.
    ///
    /// Equivalent to `git add -A` at the repository root.
    fn stage_all(&self) -> Result<()>;

    /// Create a commit from the staged index with the given message.
    ///
    /// # Returns
    /// * `Ok(CommitOutcome::Created)` - History advanced by one commit
    /// * `Ok(CommitOutcome::NothingToCommit)` - Staged tree matches HEAD,
    ///   no empty commit is created
    /// * `Err` - If the commit could not be written
    fn commit(&self, message: &str) -> Result<CommitOutcome>;

    /// Delete a tag by name.
    ///
    /// # Returns
    /// * `Ok(TagDeletion::Deleted)` - The tag existed and was removed
    /// * `Ok(TagDeletion::Missing)` - The tag did not exist; not an error
    /// * `Err` - If deletion failed for any other reason
    fn delete_tag(&self, name: &str) -> Result<TagDeletion>;
}

use crate::error::Result;
use crate::git::{CommitOutcome, TagDeletion};
use git2::{Commit, ErrorCode, IndexAddOption, Repository as Git2Repo, Signature};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Author/committer signature from repository config, with a fallback
    /// identity for environments (CI containers) where none is configured.
    fn signature(&self) -> Result<Signature<'static>> {
        match self.repo.signature() {
            Ok(sig) => Ok(sig),
            Err(_) => Ok(Signature::now("release-train", "release-train@localhost")?),
        }
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl super::Repository for Git2Repository {
    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;

        // add_all picks up new and modified files, update_all removals
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"], None)?;
        index.write()?;

        Ok(())
    }

    fn commit(&self, message: &str) -> Result<CommitOutcome> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = self.head_commit()?;

        if let Some(parent) = &parent {
            if parent.tree_id() == tree_id {
                return Ok(CommitOutcome::NothingToCommit);
            }
        }

        let sig = self.signature()?;
        let parents: Vec<&Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

        Ok(CommitOutcome::Created)
    }

    fn delete_tag(&self, name: &str) -> Result<TagDeletion> {
        match self.repo.tag_delete(name) {
            Ok(()) => Ok(TagDeletion::Deleted),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(TagDeletion::Missing),
            Err(e) => Err(e.into()),
        }
    }
}

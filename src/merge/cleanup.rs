//! Restoring the working copy after a merge run

use crate::error::Result;
use crate::git::Git;
use crate::progress::ProgressCallback;
use tracing::warn;

/// Remembers where the run started and removes its temporary branches
pub struct BranchCleanup<'a> {
    git: Git<'a>,
    original_head: String,
    prefix: String,
}

impl<'a> BranchCleanup<'a> {
    /// Record the current HEAD; call before creating any branch
    pub fn capture(git: Git<'a>, prefix: impl Into<String>) -> Result<Self> {
        let original_head = git.short_rev("HEAD")?;
        Ok(Self {
            git,
            original_head,
            prefix: prefix.into(),
        })
    }

    /// Abbreviated hash of the HEAD the run started from
    pub fn original_head(&self) -> &str {
        &self.original_head
    }

    /// Check out the original HEAD and delete every branch carrying the prefix
    ///
    /// Keeps deleting after a failed deletion and reports the first error.
    /// Safe to call more than once.
    pub async fn run(&self, progress: &dyn ProgressCallback) -> Result<Vec<String>> {
        progress
            .on_message(&format!(
                "Restoring head pointer to {}",
                self.original_head
            ))
            .await;

        if let Err(e) = self.git.checkout(&self.original_head) {
            // A conflicted squash merge blocks checkout until the index is reset
            warn!(error = %e, "checkout failed, resetting merge state and retrying");
            self.git.reset_merge()?;
            self.git.checkout(&self.original_head)?;
        }

        let mut deleted = Vec::new();
        let mut first_error = None;
        for branch in self.git.local_branches()? {
            if !branch.starts_with(&self.prefix) {
                continue;
            }
            progress
                .on_message(&format!("Deleting local branch {branch}"))
                .await;
            match self.git.delete_branch(&branch) {
                Ok(()) => deleted.push(branch),
                Err(e) => {
                    warn!(%branch, error = %e, "failed to delete branch");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(deleted),
        }
    }
}

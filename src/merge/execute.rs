//! Merge execution - effectful operations
//!
//! Fetches the PR and target into temporary branches, squashes, commits
//! with a generated message and pushes after operator confirmation.
//! Branch cleanup is left to the caller so it also runs on failure.

use crate::error::{Error, Result};
use crate::git::Git;
use crate::merge::message::{CommitMessage, rank_authors};
use crate::progress::ProgressCallback;
use crate::prompt::{Prompter, continue_maybe};
use crate::types::{MergeBranches, PullRequestDetails};
use tracing::{debug, info};

/// Remotes and naming used by a merge
#[derive(Debug, Clone)]
pub struct MergeTarget {
    /// Remote pointing to the GitHub mirror
    pub pr_remote: String,
    /// Remote receiving the squashed commit
    pub push_remote: String,
    /// Prefix for temporary branches
    pub branch_prefix: String,
}

/// Result of a successful squash merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquashResult {
    /// First 8 characters of the pushed commit hash
    pub hash: String,
    /// The committed message
    pub message: CommitMessage,
    /// Whether the operator resolved conflicts by hand
    pub had_conflicts: bool,
}

/// Performs the local squash merge of one PR
pub struct MergeExecutor<'a> {
    git: Git<'a>,
    prompter: &'a dyn Prompter,
    progress: &'a dyn ProgressCallback,
    target: &'a MergeTarget,
}

impl<'a> MergeExecutor<'a> {
    /// Create an executor
    pub fn new(
        git: Git<'a>,
        prompter: &'a dyn Prompter,
        progress: &'a dyn ProgressCallback,
        target: &'a MergeTarget,
    ) -> Self {
        Self {
            git,
            prompter,
            progress,
            target,
        }
    }

    /// Squash-merge `pr` into its base ref and push it
    pub async fn merge(&self, pr: &PullRequestDetails) -> Result<SquashResult> {
        let branches = MergeBranches::new(&self.target.branch_prefix, pr.number, &pr.base_ref);
        debug!(?branches, "creating merge branches");

        self.git.fetch(
            &self.target.pr_remote,
            &format!("pull/{}/head", pr.number),
            &branches.pr_branch,
        )?;
        self.git
            .fetch(&self.target.push_remote, &pr.base_ref, &branches.target_branch)?;
        self.git.checkout(&branches.target_branch)?;

        let had_conflicts = match self.git.merge_squash(&branches.pr_branch) {
            Ok(()) => false,
            Err(e) => {
                continue_maybe(
                    self.prompter,
                    &format!("Error merging: {e}\nWould you like to manually fix-up this merge?"),
                )?;
                continue_maybe(
                    self.prompter,
                    "Okay, please fix any conflicts and 'git add' conflicting files... Finished?",
                )?;
                true
            }
        };

        let message = self.build_message(pr, &branches, had_conflicts)?;
        let author = message
            .primary_author()
            .ok_or_else(|| {
                Error::Internal(format!(
                    "no commits between {} and {}",
                    pr.base_ref, branches.pr_branch
                ))
            })?
            .to_string();
        info!(pr_number = pr.number, %author, had_conflicts, "committing squashed PR");
        self.git.commit(&author, &message.paragraphs())?;

        continue_maybe(
            self.prompter,
            &format!(
                "Merge complete (local ref {}). Push to {}?",
                branches.target_branch, self.target.push_remote
            ),
        )?;

        self.git
            .push(&self.target.push_remote, &branches.target_branch, &pr.base_ref)
            .map_err(|e| Error::PushFailed(e.to_string()))?;

        let hash = self.git.short_rev(&branches.target_branch)?;
        self.progress
            .on_message(&format!("Pushed {} to {}", hash, pr.base_ref))
            .await;

        Ok(SquashResult {
            hash,
            message,
            had_conflicts,
        })
    }

    fn build_message(
        &self,
        pr: &PullRequestDetails,
        branches: &MergeBranches,
        had_conflicts: bool,
    ) -> Result<CommitMessage> {
        let authors = rank_authors(&self.git.log_authors(&branches.pr_branch)?);
        let commits = self.git.log_commits(&branches.pr_branch)?;

        let conflict_resolver = if had_conflicts {
            let name = self.git.config_get("user.name")?;
            let email = self.git.config_get("user.email")?;
            Some(format!("{name} <{email}>"))
        } else {
            None
        };

        Ok(CommitMessage {
            title: pr.title.clone(),
            body: pr.body.clone(),
            authors,
            conflict_resolver,
            pr_number: pr.number,
            repo_desc: pr.repo_desc(),
            commits,
        })
    }
}

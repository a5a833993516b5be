//! A complete merge run
//!
//! FetchPR -> (already merged: report and stop) -> (not mergeable: confirm)
//! -> confirm -> squash merge -> push -> cleanup -> (optional) resolve issue.
//! Temporary branches are removed on every exit path.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::git::{Git, GitRunner};
use crate::merge::{BranchCleanup, MergeExecutor, MergeTarget};
use crate::platform::{PlatformService, release_branches};
use crate::progress::ProgressCallback;
use crate::prompt::{Prompter, continue_maybe};
use crate::tracker::{IssueResolver, IssueTracker, extract_issue_id};
use crate::types::{MergeOutcome, PullRequestDetails};
use tracing::{debug, warn};

/// Collaborators a run talks to
pub struct SessionServices<'a> {
    /// Hosting API
    pub platform: &'a dyn PlatformService,
    /// Issue tracker; `None` skips issue lookup and resolution
    pub tracker: Option<&'a dyn IssueTracker>,
    /// Git command runner for the local clone
    pub git: &'a dyn GitRunner,
    /// Operator prompts
    pub prompter: &'a dyn Prompter,
    /// Status output
    pub progress: &'a dyn ProgressCallback,
}

/// Drives one merge run from PR number to resolved issue
pub struct MergeSession<'a> {
    config: &'a Config,
    services: SessionServices<'a>,
    target: MergeTarget,
}

impl<'a> MergeSession<'a> {
    /// Create a session
    pub fn new(config: &'a Config, services: SessionServices<'a>) -> Self {
        let target = MergeTarget {
            pr_remote: config.pr_remote.clone(),
            push_remote: config.push_remote.clone(),
            branch_prefix: config.branch_prefix.clone(),
        };
        Self {
            config,
            services,
            target,
        }
    }

    /// Run the whole flow; prompts for the PR number when `pr_number` is `None`
    pub async fn run(&self, pr_number: Option<u64>) -> Result<MergeOutcome> {
        let git = Git::new(self.services.git);
        let cleanup = BranchCleanup::capture(git, self.config.branch_prefix.as_str())?;
        debug!(original_head = cleanup.original_head(), "captured HEAD");

        let result = self.run_inner(pr_number, git, &cleanup).await;

        if result.is_err()
            && let Err(e) = cleanup.run(self.services.progress).await
        {
            warn!(error = %e, "cleanup after failure did not complete");
            self.services
                .progress
                .on_warning(&format!("Cleanup failed: {e}"))
                .await;
        }
        result
    }

    async fn run_inner(
        &self,
        pr_number: Option<u64>,
        git: Git<'_>,
        cleanup: &BranchCleanup<'_>,
    ) -> Result<MergeOutcome> {
        let progress = self.services.progress;
        let prompter = self.services.prompter;

        let branches = self.services.platform.list_branches().await?;
        let release = release_branches(&branches);
        debug!(?release, "release branches");

        let pr_number = match pr_number {
            Some(n) => n,
            None => read_pr_number(prompter)?,
        };
        let pr = self.services.platform.get_pr_details(pr_number).await?;

        let resolver = self.services.tracker.map(|tracker| {
            IssueResolver::new(
                tracker,
                prompter,
                progress,
                self.config.jira_project.as_str(),
                self.config.jira_browse_base(),
            )
        });
        match &resolver {
            Some(resolver) => {
                resolver.check_title(&pr.title).await?;
            }
            None => {
                extract_issue_id(&self.config.jira_project, &pr.title)?;
            }
        }

        if pr.merged {
            progress
                .on_message(&format!(
                    "Pull request {pr_number} has already been merged, assuming you want to backport"
                ))
                .await;
            let existing = git
                .find_merge_commit(pr_number)?
                .ok_or(Error::MergeCommitNotFound(pr_number))?;
            progress
                .on_message(&format!("Found: {}", existing.message))
                .await;
            return Ok(MergeOutcome::AlreadyMerged(existing));
        }

        if !pr.is_mergeable() {
            continue_maybe(
                prompter,
                &format!(
                    "Pull request {pr_number} is not mergeable in its current form.\nContinue? (experts only!)"
                ),
            )?;
        }

        progress
            .on_message(&format_pr_summary(&pr, &release))
            .await;
        continue_maybe(
            prompter,
            &format!("Proceed with merging pull request #{pr_number}?"),
        )?;

        let executor = MergeExecutor::new(git, prompter, progress, &self.target);
        let squashed = executor.merge(&pr).await?;
        cleanup.run(progress).await?;

        progress
            .on_message(&format!("Pull request #{pr_number} merged!"))
            .await;
        progress
            .on_message(&format!("Merge hash: {}", squashed.hash))
            .await;

        if let Some(resolver) = &resolver {
            continue_maybe(prompter, "Would you like to update the associated JIRA?")?;
            let comment = format!(
                "Issue resolved by pull request {pr_number}\n[{}/{pr_number}]",
                self.config.github_pull_base()
            );
            let merged_refs = vec![pr.base_ref.clone()];
            resolver.resolve(&pr.title, &merged_refs, &comment).await?;
        }

        Ok(MergeOutcome::Merged {
            pr_number,
            hash: squashed.hash,
        })
    }
}

fn read_pr_number(prompter: &dyn Prompter) -> Result<u64> {
    let answer = prompter.input("Which pull request would you like to merge? (e.g. 34)", None)?;
    let trimmed = answer.trim().trim_start_matches('#');
    trimmed
        .parse()
        .map_err(|_| Error::Prompt(format!("'{answer}' is not a pull request number")))
}

/// Summary block shown before the operator confirms the merge
pub fn format_pr_summary(pr: &PullRequestDetails, release_branches: &[String]) -> String {
    let mut summary = format!(
        "=== Pull Request #{} ===\ntitle\t{}\nsource\t{}\ntarget\t{}\nurl\t{}",
        pr.number,
        pr.title,
        pr.repo_desc(),
        pr.base_ref,
        pr.html_url
    );
    if !release_branches.is_empty() {
        summary.push_str(&format!("\nrelease\t{}", release_branches.join(", ")));
    }
    summary
}

//! Resolving the issue behind a merged PR

use crate::error::{Error, Result};
use crate::progress::ProgressCallback;
use crate::prompt::Prompter;
use crate::tracker::versions::{default_fix_versions, lookup_versions, parse_fix_versions};
use crate::tracker::{IssueTracker, RESOLVE_TRANSITION, extract_issue_id, format_issue_summary};
use crate::types::{Issue, ProjectVersion};
use tracing::debug;

/// Checks and resolves tracker issues referenced by PR titles
pub struct IssueResolver<'a> {
    tracker: &'a dyn IssueTracker,
    prompter: &'a dyn Prompter,
    progress: &'a dyn ProgressCallback,
    project: String,
    browse_base: String,
}

impl<'a> IssueResolver<'a> {
    /// Create a resolver for `project`; `browse_base` + `/<id>` is an issue's web page
    pub fn new(
        tracker: &'a dyn IssueTracker,
        prompter: &'a dyn Prompter,
        progress: &'a dyn ProgressCallback,
        project: impl Into<String>,
        browse_base: impl Into<String>,
    ) -> Self {
        Self {
            tracker,
            prompter,
            progress,
            project: project.into(),
            browse_base: browse_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Verify the title names an existing issue; runs before any mutation
    pub async fn check_title(&self, title: &str) -> Result<Issue> {
        let issue_id = extract_issue_id(&self.project, title)?;
        self.lookup(&issue_id).await
    }

    async fn lookup(&self, issue_id: &str) -> Result<Issue> {
        self.tracker
            .get_issue(issue_id)
            .await
            .map_err(|e| Error::IssueNotFound {
                id: issue_id.to_string(),
                reason: e.to_string(),
            })
    }

    /// Every project version plus the default fix version names for `merge_branches`
    pub async fn candidate_fix_versions(
        &self,
        merge_branches: &[String],
    ) -> Result<(Vec<ProjectVersion>, Vec<String>)> {
        let all_versions = self.tracker.project_versions(&self.project).await?;
        let defaults = default_fix_versions(merge_branches, &all_versions);
        debug!(?defaults, "default fix versions");
        Ok((all_versions, defaults))
    }

    /// Ask the operator to confirm or override the fix versions
    pub async fn prompt_for_fix_versions(
        &self,
        merge_branches: &[String],
    ) -> Result<Vec<ProjectVersion>> {
        let (all_versions, defaults) = self.candidate_fix_versions(merge_branches).await?;
        let default_text = defaults.join(",");

        let answer = self.prompter.input(
            "Enter comma-separated fix version(s)",
            (!default_text.is_empty()).then_some(default_text.as_str()),
        )?;
        let answer = if answer.trim().is_empty() {
            default_text
        } else {
            answer
        };

        lookup_versions(&parse_fix_versions(&answer), &all_versions)
    }

    /// Apply the resolve transition with `fix_versions` and `comment`
    pub async fn resolve_issue(
        &self,
        issue: &Issue,
        fix_versions: &[ProjectVersion],
        comment: &str,
    ) -> Result<()> {
        if issue.is_resolved() {
            return Err(Error::AlreadyResolved {
                id: issue.id.clone(),
                status: issue.status.clone(),
            });
        }

        let transitions = self.tracker.transitions(&issue.id).await?;
        let resolve = transitions
            .iter()
            .find(|t| t.name == RESOLVE_TRANSITION)
            .ok_or_else(|| Error::TransitionNotFound {
                id: issue.id.clone(),
                transition: RESOLVE_TRANSITION.to_string(),
            })?;

        self.tracker
            .transition_issue(&issue.id, &resolve.id, comment, fix_versions)
            .await
    }

    /// Interactive resolution of the issue named by `title`
    pub async fn resolve(
        &self,
        title: &str,
        merge_branches: &[String],
        comment: &str,
    ) -> Result<Issue> {
        let default_id = extract_issue_id(&self.project, title)?;
        let entered = self
            .prompter
            .input("Enter a JIRA id", Some(default_id.as_str()))?;
        let issue_id = if entered.trim().is_empty() {
            default_id
        } else {
            entered.trim().to_string()
        };

        let issue = self.lookup(&issue_id).await?;
        if issue.is_resolved() {
            return Err(Error::AlreadyResolved {
                id: issue.id,
                status: issue.status,
            });
        }

        let url = format!("{}/{}", self.browse_base, issue.id);
        self.progress
            .on_message(&format_issue_summary(&issue, &url))
            .await;

        let fix_versions = self.prompt_for_fix_versions(merge_branches).await?;
        self.resolve_issue(&issue, &fix_versions, comment).await?;

        self.progress
            .on_message(&format!("Successfully resolved {}!", issue.id))
            .await;
        Ok(issue)
    }
}

//! Issue tracker access and issue resolution
//!
//! A merged PR resolves the issue named by its title prefix.

mod jira;
mod resolve;
pub mod versions;

pub use jira::JiraService;
pub use resolve::IssueResolver;

use crate::error::{Error, Result};
use crate::types::{Issue, ProjectVersion, Transition};
use async_trait::async_trait;
use regex::Regex;

/// Name of the workflow transition used to resolve issues
pub const RESOLVE_TRANSITION: &str = "Resolve Issue";

/// Issue tracker operations needed to resolve an issue
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Look up an issue by id
    async fn get_issue(&self, issue_id: &str) -> Result<Issue>;

    /// All versions defined in a project, released or not
    async fn project_versions(&self, project: &str) -> Result<Vec<ProjectVersion>>;

    /// Transitions currently available on an issue
    async fn transitions(&self, issue_id: &str) -> Result<Vec<Transition>>;

    /// Apply a transition, adding a comment and setting fix versions
    async fn transition_issue(
        &self,
        issue_id: &str,
        transition_id: &str,
        comment: &str,
        fix_versions: &[ProjectVersion],
    ) -> Result<()>;
}

/// Extract the `<PROJECT>-<n>` issue id a PR title must start with
pub fn extract_issue_id(project: &str, title: &str) -> Result<String> {
    let pattern = format!(r"^({}-[0-9]+)\b", regex::escape(project));
    let re = Regex::new(&pattern).map_err(|e| Error::Internal(e.to_string()))?;

    re.captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::MissingIssueId {
            project: project.to_string(),
            title: title.to_string(),
        })
}

/// Summary block shown before an issue is resolved
pub fn format_issue_summary(issue: &Issue, url: &str) -> String {
    let assignee = issue.assignee.as_deref().unwrap_or("NOT ASSIGNED!!!");
    let components = if issue.components.is_empty() {
        "NO COMPONENTS!!!".to_string()
    } else {
        issue.components.join(", ")
    };

    format!(
        "=== JIRA {} ===\nSummary\t\t{}\nAssignee\t{}\nComponents\t{}\nStatus\t\t{}\nURL\t\t{}",
        issue.id, issue.summary, assignee, components, issue.status, url
    )
}

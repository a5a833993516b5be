//! Core types for squash-merge

use serde::{Deserialize, Serialize};

/// Pull request details needed to perform a local squash merge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestDetails {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// PR body/description
    pub body: Option<String>,
    /// Branch the PR targets (e.g., "master")
    pub base_ref: String,
    /// Branch the PR was opened from
    pub head_ref: String,
    /// Login of the PR author
    pub user_login: String,
    /// Whether the PR has already been merged
    pub merged: bool,
    /// Whether the PR can be merged
    /// - `Some(true)` = mergeable
    /// - `Some(false)` = has conflicts
    /// - `None` = unknown (GitHub still computing)
    pub mergeable: Option<bool>,
    /// Web URL for the PR
    pub html_url: String,
}

impl PullRequestDetails {
    /// Source description used in the commit trailer, e.g. `alice/fix-parser`
    pub fn repo_desc(&self) -> String {
        format!("{}/{}", self.user_login, self.head_ref)
    }

    /// Whether the host reported the PR as cleanly mergeable
    pub fn is_mergeable(&self) -> bool {
        self.mergeable.unwrap_or(false)
    }
}

/// The two temporary local branches created for a merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeBranches {
    /// Local copy of the PR head
    pub pr_branch: String,
    /// Local copy of the target ref, which receives the squashed commit
    pub target_branch: String,
}

impl MergeBranches {
    /// Name the branches for a PR and target ref under `prefix`
    pub fn new(prefix: &str, pr_number: u64, target_ref: &str) -> Self {
        let pr_branch = format!("{prefix}_MERGE_PR_{pr_number}");
        let target_branch = format!("{pr_branch}_{}", target_ref.to_uppercase());
        Self {
            pr_branch,
            target_branch,
        }
    }
}

/// A merge commit that already contains the PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingMerge {
    /// Abbreviated hash of the merge commit
    pub hash: String,
    /// Subject line of the merge commit
    pub message: String,
}

/// How a run ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The PR was squashed and pushed
    Merged {
        /// PR number
        pr_number: u64,
        /// First 8 characters of the pushed commit hash
        hash: String,
    },
    /// The PR had already been merged; assumed to be a backport
    AlreadyMerged(ExistingMerge),
}

/// An issue in the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Issue key (e.g., "ARROW-1234")
    pub id: String,
    /// One-line summary
    pub summary: String,
    /// Current status name (e.g., "In Progress")
    pub status: String,
    /// Display name of the assignee
    pub assignee: Option<String>,
    /// Component names
    pub components: Vec<String>,
}

impl Issue {
    /// Whether the issue is already in a terminal state
    pub fn is_resolved(&self) -> bool {
        matches!(self.status.as_str(), "Resolved" | "Closed")
    }
}

/// A release version defined in the tracker project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectVersion {
    /// Tracker-internal version id
    pub id: String,
    /// Version name (e.g., "0.12.0" or "JS-0.4.0")
    pub name: String,
    /// Whether the version has been released
    #[serde(default)]
    pub released: bool,
}

/// A workflow transition available on an issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Transition id
    pub id: String,
    /// Transition name (e.g., "Resolve Issue")
    pub name: String,
}

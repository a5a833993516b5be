//! Error types for squash-merge

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end a merge run
#[derive(Debug, Error)]
pub enum Error {
    /// A git command exited unsuccessfully
    #[error("command failed: git {command}\n{output}")]
    Git {
        /// Arguments passed to git, space separated
        command: String,
        /// Captured stdout and stderr of the failed command
        output: String,
    },

    /// git could not be started at all
    #[error("failed to run git: {0}")]
    GitSpawn(#[from] std::io::Error),

    /// GitHub API returned an error or unexpected payload
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// JIRA API returned an error or unexpected payload
    #[error("JIRA API error: {0}")]
    JiraApi(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// PR title does not start with an issue id
    #[error("PR title should be prefixed by a jira id \"{project}-XXX: ...\", found: \"{title}\"")]
    MissingIssueId {
        /// Tracker project key the title was checked against
        project: String,
        /// The offending PR title
        title: String,
    },

    /// Issue lookup failed
    #[error("JIRA could not find {id}\n{reason}")]
    IssueNotFound {
        /// Issue id that was looked up
        id: String,
        /// Underlying failure
        reason: String,
    },

    /// Issue is already resolved or closed
    #[error("JIRA issue {id} already has status '{status}'")]
    AlreadyResolved {
        /// Issue id
        id: String,
        /// Current status name
        status: String,
    },

    /// Requested fix version does not exist in the project
    #[error("unknown fix version '{0}'")]
    UnknownFixVersion(String),

    /// The issue offers no transition with the expected name
    #[error("issue {id} has no '{transition}' transition")]
    TransitionNotFound {
        /// Issue id
        id: String,
        /// Transition name that was looked for
        transition: String,
    },

    /// PR is merged but its merge commit is not reachable from HEAD
    #[error("Couldn't find any merge commit for #{0}, you may need to update HEAD.")]
    MergeCommitNotFound(u64),

    /// Pushing the squashed commit failed
    #[error("Exception while pushing: {0}")]
    PushFailed(String),

    /// Operator declined a confirmation
    #[error("Okay, exiting")]
    Aborted,

    /// Reading from the terminal failed
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

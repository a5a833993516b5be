//! Authentication for GitHub and JIRA
//!
//! Supports CLI-based auth (gh), environment variables and interactive
//! prompts.

mod github;
mod jira;

pub use github::{GitHubAuthConfig, get_github_auth, github_auth_from_env};
pub use jira::{JiraCredentials, resolve_jira_credentials};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from CLI tool (gh)
    Cli,
    /// Token from environment variable
    EnvVar,
    /// Entered by the operator
    Prompt,
}

//! Code-hosting platform access
//!
//! Provides the pull request metadata and branch listing the merge run
//! needs from the hosting mirror.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::PullRequestDetails;
use async_trait::async_trait;

/// Prefix of release branch names on the hosting mirror
pub const RELEASE_BRANCH_PREFIX: &str = "branch-";

/// Platform service trait for PR metadata
///
/// This trait abstracts the hosting API so the merge flow can be tested
/// against an in-memory mock.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Get full PR details including body, author and merge flags
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails>;

    /// List the names of all branches in the repository
    async fn list_branches(&self) -> Result<Vec<String>>;
}

/// Keep release branches (`branch-*`), sorted newest-first by name
pub fn release_branches(branches: &[String]) -> Vec<String> {
    let mut release: Vec<String> = branches
        .iter()
        .filter(|name| name.starts_with(RELEASE_BRANCH_PREFIX))
        .cloned()
        .collect();
    release.sort_unstable_by(|a, b| b.cmp(a));
    release
}

//! Mock platform service for testing

use async_trait::async_trait;
use squash_merge::error::{Error, Result};
use squash_merge::platform::PlatformService;
use squash_merge::types::PullRequestDetails;
use std::collections::HashMap;
use std::sync::Mutex;

/// Simple mock platform service for testing
///
/// Features:
/// - Configurable PR details per number
/// - Configurable branch listing
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    pr_details_responses: Mutex<HashMap<u64, PullRequestDetails>>,
    branches: Mutex<Vec<String>>,
    // Call tracking
    get_pr_details_calls: Mutex<Vec<u64>>,
    list_branches_calls: Mutex<usize>,
    // Error injection
    error_on_get_pr_details: Mutex<Option<String>>,
    error_on_list_branches: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// A mirror with `master` and no PRs
    pub fn new() -> Self {
        Self {
            pr_details_responses: Mutex::new(HashMap::new()),
            branches: Mutex::new(vec!["master".to_string()]),
            get_pr_details_calls: Mutex::new(Vec::new()),
            list_branches_calls: Mutex::new(0),
            error_on_get_pr_details: Mutex::new(None),
            error_on_list_branches: Mutex::new(None),
        }
    }

    /// A mirror serving one PR
    pub fn with_pr(pr: PullRequestDetails) -> Self {
        let mock = Self::new();
        mock.set_pr_details(pr);
        mock
    }

    // === Response configuration ===

    /// Serve `pr` for its number
    pub fn set_pr_details(&self, pr: PullRequestDetails) {
        self.pr_details_responses
            .lock()
            .unwrap()
            .insert(pr.number, pr);
    }

    /// Replace the branch listing
    pub fn set_branches(&self, branches: &[&str]) {
        *self.branches.lock().unwrap() = branches.iter().map(ToString::to_string).collect();
    }

    // === Error injection ===

    /// Make `get_pr_details` fail
    pub fn fail_get_pr_details(&self, msg: &str) {
        *self.error_on_get_pr_details.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_branches` fail
    pub fn fail_list_branches(&self, msg: &str) {
        *self.error_on_list_branches.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification ===

    /// PR numbers requested so far
    pub fn get_pr_details_calls(&self) -> Vec<u64> {
        self.get_pr_details_calls.lock().unwrap().clone()
    }

    /// Number of branch listings so far
    pub fn list_branches_calls(&self) -> usize {
        *self.list_branches_calls.lock().unwrap()
    }
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        self.get_pr_details_calls.lock().unwrap().push(pr_number);

        if let Some(msg) = self.error_on_get_pr_details.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.pr_details_responses
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("PR #{pr_number} not found")))
    }

    async fn list_branches(&self) -> Result<Vec<String>> {
        *self.list_branches_calls.lock().unwrap() += 1;

        if let Some(msg) = self.error_on_list_branches.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self.branches.lock().unwrap().clone())
    }
}

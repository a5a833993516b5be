//! Shared test utilities

#![allow(dead_code)]

mod fake_git;
mod mock_platform;
mod scripted_prompt;
mod temp_repo;

pub use fake_git::{FakeGit, ORIGINAL_HEAD};
pub use mock_platform::MockPlatformService;
pub use mock_tracker::{MockIssueTracker, TransitionCall};
pub use scripted_prompt::ScriptedPrompter;
pub use temp_repo::{TempGitRepo, git};

use squash_merge::config::{Config, FileConfig};
use squash_merge::types::{Issue, ProjectVersion, PullRequestDetails};
use std::path::Path;

/// Config for an `arrow` clone with default remotes and endpoints
pub fn arrow_config(root: &Path) -> Config {
    let repo = root.join("arrow");
    std::fs::create_dir_all(&repo).expect("create arrow dir");
    Config::resolve(&repo, FileConfig::default(), |_| None).expect("resolve config")
}

/// An open, mergeable PR from `alice/fix-parser` into `master`
pub fn make_pr(number: u64, title: &str) -> PullRequestDetails {
    PullRequestDetails {
        number,
        title: title.to_string(),
        body: Some("Fixes the parser.".to_string()),
        base_ref: "master".to_string(),
        head_ref: "fix-parser".to_string(),
        user_login: "alice".to_string(),
        merged: false,
        mergeable: Some(true),
        html_url: format!("https://github.com/apache/arrow/pull/{number}"),
    }
}

/// An issue in the given status with one component
pub fn make_issue(id: &str, status: &str) -> Issue {
    Issue {
        id: id.to_string(),
        summary: "issue summary".to_string(),
        status: status.to_string(),
        assignee: Some("groundhog".to_string()),
        components: vec!["C++".to_string()],
    }
}

/// Project version helper
pub fn version(id: &str, name: &str, released: bool) -> ProjectVersion {
    ProjectVersion {
        id: id.to_string(),
        name: name.to_string(),
        released,
    }
}

/// Versions of a project with a forked-but-unreleased 1.0 branch
pub fn forked_release_versions() -> Vec<ProjectVersion> {
    vec![
        version("10", "1.1.0", false),
        version("11", "1.0.0", false),
        version("12", "0.17.0", true),
        version("13", "JS-0.4.0", false),
    ]
}

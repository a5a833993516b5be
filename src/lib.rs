//! squash-merge - squash-merge GitHub pull requests into an upstream
//! repository and resolve their JIRA issues
//!
//! The merge itself happens in a local clone that has two remotes: the
//! GitHub mirror the PR lives on, and the upstream repository the squashed
//! commit is pushed to.

pub mod auth;
pub mod config;
pub mod error;
pub mod git;
pub mod merge;
pub mod platform;
pub mod progress;
pub mod prompt;
pub mod session;
pub mod tracker;
pub mod types;

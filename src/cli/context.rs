//! Shared command context for CLI commands
//!
//! Resolves configuration and credentials and builds the services a merge
//! run talks to.

use squash_merge::auth::{get_github_auth, resolve_jira_credentials};
use squash_merge::config::{Config, Overrides};
use squash_merge::error::{Error, Result};
use squash_merge::git::SystemGit;
use squash_merge::platform::{GitHubService, PlatformService};
use squash_merge::prompt::DialoguerPrompter;
use squash_merge::tracker::{IssueTracker, JiraService};
use std::path::Path;
use tracing::debug;

/// Everything a merge run needs, wired to the real collaborators
pub struct CommandContext {
    /// Resolved configuration
    pub config: Config,
    /// Git in the local clone
    pub git: SystemGit,
    /// GitHub mirror
    pub platform: Box<dyn PlatformService>,
    /// JIRA, unless issue handling was skipped
    pub tracker: Option<Box<dyn IssueTracker>>,
    /// Terminal prompts
    pub prompter: DialoguerPrompter,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// - Check the clone path
    /// - Load config file and environment, apply CLI overrides
    /// - Resolve GitHub auth and create the GitHub service
    /// - Resolve JIRA credentials (prompting if needed) and create the JIRA service
    pub fn new(path: &Path, overrides: Overrides, skip_issue: bool) -> Result<Self> {
        if !path.is_dir() {
            return Err(Error::Config(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let config = Config::load(path)?.apply_overrides(overrides);
        debug!(
            pr_remote = %config.pr_remote,
            push_remote = %config.push_remote,
            project = %config.project,
            "loaded config"
        );

        let prompter = DialoguerPrompter;

        let github_auth = get_github_auth();
        let platform: Box<dyn PlatformService> = Box::new(GitHubService::new(
            config.github_repo_api(),
            github_auth.token,
        )?);

        let tracker: Option<Box<dyn IssueTracker>> = if skip_issue {
            None
        } else {
            let credentials = resolve_jira_credentials(&config, &prompter)?;
            Some(Box::new(JiraService::new(
                config.jira_url.as_str(),
                credentials,
            )?))
        };

        Ok(Self {
            config,
            git: SystemGit::new(path),
            platform,
            tracker,
            prompter,
        })
    }
}

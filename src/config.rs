//! Run configuration
//!
//! Values are layered: built-in defaults, then the optional config file at
//! `<config dir>/squash-merge/config.toml`, then environment variables.
//! CLI flags are applied last by the binary via [`Config::apply_overrides`].

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Directory name for squash-merge within the user config dir.
const CONFIG_DIR: &str = "squash-merge";

/// Filename of the config file.
const CONFIG_FILE: &str = "config.toml";

const DEFAULT_PR_REMOTE: &str = "apache-github";
const DEFAULT_PUSH_REMOTE: &str = "apache";
const DEFAULT_GITHUB_OWNER: &str = "apache";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_GITHUB_WEB_URL: &str = "https://github.com";
const DEFAULT_JIRA_URL: &str = "https://issues.apache.org/jira";
const DEFAULT_BRANCH_PREFIX: &str = "PR_TOOL";

/// Contents of the config file; every key is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Remote pointing to the GitHub mirror
    pub pr_remote: Option<String>,
    /// Remote pointing to the upstream repository
    pub push_remote: Option<String>,
    /// GitHub organization or user owning the mirror
    pub github_owner: Option<String>,
    /// Repository name on GitHub
    pub project: Option<String>,
    /// GitHub REST API root
    pub github_api_url: Option<String>,
    /// GitHub web root
    pub github_web_url: Option<String>,
    /// JIRA server root
    pub jira_url: Option<String>,
    /// JIRA project key
    pub jira_project: Option<String>,
    /// JIRA username
    pub jira_username: Option<String>,
    /// JIRA password
    pub jira_password: Option<String>,
    /// Prefix for temporary branches
    pub branch_prefix: Option<String>,
}

/// CLI-level overrides, applied after file and environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--pr-remote`
    pub pr_remote: Option<String>,
    /// `--push-remote`
    pub push_remote: Option<String>,
    /// `--project`
    pub project: Option<String>,
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Remote pointing to the GitHub mirror
    pub pr_remote: String,
    /// Remote pointing to the upstream repository
    pub push_remote: String,
    /// GitHub organization or user owning the mirror
    pub github_owner: String,
    /// Repository name on GitHub
    pub project: String,
    /// GitHub REST API root, without trailing slash
    pub github_api_url: String,
    /// GitHub web root, without trailing slash
    pub github_web_url: String,
    /// JIRA server root, without trailing slash
    pub jira_url: String,
    /// JIRA project key (e.g., "ARROW")
    pub jira_project: String,
    /// JIRA username, if configured
    pub jira_username: Option<String>,
    /// JIRA password, if configured
    pub jira_password: Option<String>,
    /// Prefix for temporary branches
    pub branch_prefix: String,
    /// Whether `jira_project` was set explicitly rather than derived
    jira_project_pinned: bool,
}

impl Config {
    /// Load configuration for the repository at `repo_root`
    pub fn load(repo_root: &Path) -> Result<Self> {
        let file = match config_path() {
            Some(path) => load_file_config(&path)?,
            None => FileConfig::default(),
        };
        Self::resolve(repo_root, file, |key| std::env::var(key).ok())
    }

    /// Merge file values with environment values from `env`
    ///
    /// Empty environment values are treated as unset.
    pub fn resolve<F>(repo_root: &Path, file: FileConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let project = match file.project {
            Some(project) => project,
            None => project_from_path(repo_root)?,
        };
        let jira_project_pinned = file.jira_project.is_some();
        let jira_project = file
            .jira_project
            .unwrap_or_else(|| project.to_uppercase());

        let github_api_url = normalize_url(
            &env("GITHUB_API_URL")
                .or(file.github_api_url)
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
        )?;
        let github_web_url = normalize_url(
            &file
                .github_web_url
                .unwrap_or_else(|| DEFAULT_GITHUB_WEB_URL.to_string()),
        )?;
        let jira_url = normalize_url(
            &env("JIRA_URL")
                .or(file.jira_url)
                .unwrap_or_else(|| DEFAULT_JIRA_URL.to_string()),
        )?;

        Ok(Self {
            pr_remote: env("PR_REMOTE_NAME")
                .or(file.pr_remote)
                .unwrap_or_else(|| DEFAULT_PR_REMOTE.to_string()),
            push_remote: env("PUSH_REMOTE_NAME")
                .or(file.push_remote)
                .unwrap_or_else(|| DEFAULT_PUSH_REMOTE.to_string()),
            github_owner: file
                .github_owner
                .unwrap_or_else(|| DEFAULT_GITHUB_OWNER.to_string()),
            project,
            github_api_url,
            github_web_url,
            jira_url,
            jira_project,
            jira_username: env("JIRA_USERNAME").or(file.jira_username),
            jira_password: env("JIRA_PASSWORD").or(file.jira_password),
            branch_prefix: file
                .branch_prefix
                .unwrap_or_else(|| DEFAULT_BRANCH_PREFIX.to_string()),
            jira_project_pinned,
        })
    }

    /// Apply CLI flag overrides
    #[must_use]
    pub fn apply_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(remote) = overrides.pr_remote {
            self.pr_remote = remote;
        }
        if let Some(remote) = overrides.push_remote {
            self.push_remote = remote;
        }
        if let Some(project) = overrides.project {
            if !self.jira_project_pinned {
                self.jira_project = project.to_uppercase();
            }
            self.project = project;
        }
        self
    }

    /// REST root for the mirrored repository
    pub fn github_repo_api(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.github_api_url, self.github_owner, self.project
        )
    }

    /// Web root for the repository's pull requests
    pub fn github_pull_base(&self) -> String {
        format!(
            "{}/{}/{}/pull",
            self.github_web_url, self.github_owner, self.project
        )
    }

    /// Web root for JIRA issues; an issue's page is `<base>/<id>`
    pub fn jira_browse_base(&self) -> String {
        format!("{}/browse", self.jira_url)
    }
}

/// Path of the user config file, if a config dir exists on this platform
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the config file.
///
/// Returns an empty `FileConfig` if the file doesn't exist.
pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

fn project_from_path(repo_root: &Path) -> Result<String> {
    let absolute = fs::canonicalize(repo_root).unwrap_or_else(|_| repo_root.to_path_buf());
    absolute
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Error::Config(format!(
                "cannot derive project name from {}",
                repo_root.display()
            ))
        })
}

fn normalize_url(raw: &str) -> Result<String> {
    let parsed =
        Url::parse(raw).map_err(|e| Error::Config(format!("invalid URL '{raw}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Config(format!("unsupported URL scheme in '{raw}'")));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

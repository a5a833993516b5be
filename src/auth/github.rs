//! GitHub token discovery

use crate::auth::AuthSource;
use std::process::Command;
use tracing::debug;

/// Environment variables checked for a GitHub token, in order
const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// GitHub authentication, possibly anonymous
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubAuthConfig {
    /// Token, if one was found
    pub token: Option<String>,
    /// Where the token came from
    pub source: Option<AuthSource>,
}

impl GitHubAuthConfig {
    /// No token; requests are unauthenticated
    pub const fn anonymous() -> Self {
        Self {
            token: None,
            source: None,
        }
    }
}

/// Look for a token in environment values provided by `env`
pub fn github_auth_from_env<F>(env: F) -> Option<GitHubAuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    TOKEN_VARS
        .iter()
        .filter_map(|var| env(var))
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
        .map(|token| GitHubAuthConfig {
            token: Some(token),
            source: Some(AuthSource::EnvVar),
        })
}

/// Resolve GitHub auth from the environment, then `gh auth token`
///
/// Falls back to anonymous access; the pull request and branch endpoints
/// are public.
pub fn get_github_auth() -> GitHubAuthConfig {
    if let Some(auth) = github_auth_from_env(|var| std::env::var(var).ok()) {
        debug!("using GitHub token from environment");
        return auth;
    }

    match Command::new("gh").args(["auth", "token"]).output() {
        Ok(output) if output.status.success() => {
            let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !token.is_empty() {
                debug!("using GitHub token from gh CLI");
                return GitHubAuthConfig {
                    token: Some(token),
                    source: Some(AuthSource::Cli),
                };
            }
        }
        Ok(_) | Err(_) => {}
    }

    debug!("no GitHub token found, using anonymous access");
    GitHubAuthConfig::anonymous()
}

//! JIRA credentials

use crate::auth::AuthSource;
use crate::config::Config;
use crate::error::Result;
use crate::prompt::Prompter;

/// Basic-auth credentials for the JIRA REST API
#[derive(Clone, PartialEq, Eq)]
pub struct JiraCredentials {
    /// JIRA username
    pub username: String,
    /// JIRA password or API token
    pub password: String,
    /// Where the password came from
    pub source: AuthSource,
}

impl std::fmt::Debug for JiraCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("source", &self.source)
            .finish()
    }
}

/// Use configured credentials, prompting for whatever is missing
pub fn resolve_jira_credentials(config: &Config, prompter: &dyn Prompter) -> Result<JiraCredentials> {
    let username = match &config.jira_username {
        Some(username) => username.clone(),
        None => prompter.input(
            "Env JIRA_USERNAME not set, please enter your JIRA username",
            None,
        )?,
    };

    let (password, source) = match &config.jira_password {
        Some(password) => (password.clone(), AuthSource::EnvVar),
        None => (
            prompter.password("Env JIRA_PASSWORD not set, please enter your JIRA password")?,
            AuthSource::Prompt,
        ),
    };

    Ok(JiraCredentials {
        username,
        password,
        source,
    })
}

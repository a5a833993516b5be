//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::PullRequestDetails;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Branches requested per page when listing
const BRANCHES_PER_PAGE: usize = 100;

#[derive(Deserialize)]
struct GhPullRequest {
    number: u64,
    title: String,
    body: Option<String>,
    html_url: String,
    #[serde(default)]
    merged: bool,
    mergeable: Option<bool>,
    base: GhRef,
    head: GhRef,
    user: GhUser,
}

#[derive(Deserialize)]
struct GhRef {
    #[serde(rename = "ref")]
    ref_field: String,
}

#[derive(Deserialize)]
struct GhUser {
    login: String,
}

#[derive(Deserialize)]
struct GhBranch {
    name: String,
}

#[derive(Deserialize)]
struct GhErrorBody {
    message: String,
}

impl From<GhPullRequest> for PullRequestDetails {
    fn from(pr: GhPullRequest) -> Self {
        Self {
            number: pr.number,
            title: pr.title,
            body: pr.body,
            base_ref: pr.base.ref_field,
            head_ref: pr.head.ref_field,
            user_login: pr.user.login,
            merged: pr.merged,
            mergeable: pr.mergeable,
            html_url: pr.html_url,
        }
    }
}

/// GitHub service using the REST API
pub struct GitHubService {
    client: Client,
    /// `<api root>/repos/<owner>/<repo>`
    repo_api: String,
    /// Optional token; public repositories work without one
    token: Option<String>,
}

impl GitHubService {
    /// Create a new GitHub service for the repository REST root `repo_api`
    pub fn new(repo_api: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("squash-merge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            repo_api: repo_api.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.repo_api);
        let request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<GhErrorBody>()
                .await
                .map_or_else(|_| status.to_string(), |body| body.message);
            return Err(Error::GitHubApi(format!(
                "Failed to fetch {what}: {status} {message}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse {what}: {e}")))
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        debug!(pr_number, "getting PR details");

        let response = self.get(&format!("/pulls/{pr_number}")).send().await?;
        let pr: GhPullRequest =
            Self::read_json(response, &format!("pull request #{pr_number}")).await?;
        let details = PullRequestDetails::from(pr);

        debug!(
            pr_number,
            merged = details.merged,
            mergeable = ?details.mergeable,
            "got PR details"
        );
        Ok(details)
    }

    async fn list_branches(&self) -> Result<Vec<String>> {
        debug!("listing branches");
        let mut names = Vec::new();

        for page in 1.. {
            let response = self
                .get("/branches")
                .query(&[("per_page", BRANCHES_PER_PAGE), ("page", page)])
                .send()
                .await?;
            let branches: Vec<GhBranch> = Self::read_json(response, "branches").await?;
            let last_page = branches.len() < BRANCHES_PER_PAGE;
            names.extend(branches.into_iter().map(|b| b.name));
            if last_page {
                break;
            }
        }

        debug!(count = names.len(), "listed branches");
        Ok(names)
    }
}

//! JIRA issue tracker implementation

use crate::auth::JiraCredentials;
use crate::error::{Error, Result};
use crate::tracker::IssueTracker;
use crate::types::{Issue, ProjectVersion, Transition};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fields requested when looking up an issue
const ISSUE_FIELDS: &str = "summary,status,assignee,components";

#[derive(Deserialize)]
struct JiraIssue {
    key: String,
    fields: JiraIssueFields,
}

#[derive(Deserialize)]
struct JiraIssueFields {
    #[serde(default)]
    summary: String,
    status: JiraNamed,
    assignee: Option<JiraUser>,
    #[serde(default)]
    components: Vec<JiraNamed>,
}

#[derive(Deserialize)]
struct JiraNamed {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraUser {
    display_name: String,
}

#[derive(Deserialize)]
struct JiraTransitions {
    transitions: Vec<JiraTransition>,
}

#[derive(Deserialize)]
struct JiraTransition {
    id: String,
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
}

#[derive(Serialize)]
struct TransitionPayload<'a> {
    transition: IdRef<'a>,
    fields: TransitionFields<'a>,
    update: TransitionUpdate<'a>,
}

#[derive(Serialize)]
struct IdRef<'a> {
    id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransitionFields<'a> {
    fix_versions: Vec<IdRef<'a>>,
}

#[derive(Serialize)]
struct TransitionUpdate<'a> {
    comment: Vec<CommentOp<'a>>,
}

#[derive(Serialize)]
struct CommentOp<'a> {
    add: CommentBody<'a>,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

impl From<JiraIssue> for Issue {
    fn from(issue: JiraIssue) -> Self {
        Self {
            id: issue.key,
            summary: issue.fields.summary,
            status: issue.fields.status.name,
            assignee: issue.fields.assignee.map(|a| a.display_name),
            components: issue
                .fields
                .components
                .into_iter()
                .map(|c| c.name)
                .collect(),
        }
    }
}

/// JIRA service using the REST API v2
pub struct JiraService {
    client: Client,
    base_url: String,
    credentials: JiraCredentials,
}

impl JiraService {
    /// Create a new JIRA service for the server at `base_url`
    pub fn new(base_url: impl Into<String>, credentials: JiraCredentials) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("squash-merge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::JiraApi(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/rest/api/2{path}", self.base_url)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header("Accept", "application/json")
    }

    async fn check(response: Response, what: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<JiraErrorBody>()
            .await
            .ok()
            .filter(|body| !body.error_messages.is_empty())
            .map_or_else(|| status.to_string(), |body| body.error_messages.join("; "));
        Err(Error::JiraApi(format!("{what}: {status} {detail}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let response = self.authed(self.client.get(self.api_url(path))).send().await?;
        Self::check(response, what)
            .await?
            .json()
            .await
            .map_err(|e| Error::JiraApi(format!("failed to parse {what}: {e}")))
    }
}

#[async_trait]
impl IssueTracker for JiraService {
    async fn get_issue(&self, issue_id: &str) -> Result<Issue> {
        debug!(issue_id, "getting issue");
        let path = format!(
            "/issue/{}?fields={ISSUE_FIELDS}",
            urlencoding::encode(issue_id)
        );
        let issue: JiraIssue = self.get_json(&path, &format!("issue {issue_id}")).await?;
        let issue = Issue::from(issue);
        debug!(issue_id, status = %issue.status, "got issue");
        Ok(issue)
    }

    async fn project_versions(&self, project: &str) -> Result<Vec<ProjectVersion>> {
        debug!(project, "listing project versions");
        let path = format!("/project/{}/versions", urlencoding::encode(project));
        let versions: Vec<ProjectVersion> = self
            .get_json(&path, &format!("versions of {project}"))
            .await?;
        debug!(project, count = versions.len(), "listed project versions");
        Ok(versions)
    }

    async fn transitions(&self, issue_id: &str) -> Result<Vec<Transition>> {
        debug!(issue_id, "listing transitions");
        let path = format!("/issue/{}/transitions", urlencoding::encode(issue_id));
        let response: JiraTransitions = self
            .get_json(&path, &format!("transitions of {issue_id}"))
            .await?;
        Ok(response
            .transitions
            .into_iter()
            .map(|t| Transition {
                id: t.id,
                name: t.name,
            })
            .collect())
    }

    async fn transition_issue(
        &self,
        issue_id: &str,
        transition_id: &str,
        comment: &str,
        fix_versions: &[ProjectVersion],
    ) -> Result<()> {
        debug!(issue_id, transition_id, "transitioning issue");
        let payload = TransitionPayload {
            transition: IdRef { id: transition_id },
            fields: TransitionFields {
                fix_versions: fix_versions.iter().map(|v| IdRef { id: &v.id }).collect(),
            },
            update: TransitionUpdate {
                comment: vec![CommentOp {
                    add: CommentBody { body: comment },
                }],
            },
        };

        let url = self.api_url(&format!(
            "/issue/{}/transitions",
            urlencoding::encode(issue_id)
        ));
        let response = self
            .authed(self.client.post(url))
            .json(&payload)
            .send()
            .await?;
        Self::check(response, &format!("transition of {issue_id}")).await?;

        debug!(issue_id, "transitioned issue");
        Ok(())
    }
}

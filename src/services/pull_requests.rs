//! Pull request operations.

use super::params;
use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::services::IssueState;
use crate::transport::{HttpMethod, Parameters};
use serde_json::{json, Value};

/// Request to open a pull request.
#[derive(Debug, Clone)]
pub struct CreatePullRequest {
    /// Branch to merge into.
    pub base: String,
    /// Branch holding the changes, `user:branch` for forks.
    pub head: String,
    /// Title.
    pub title: String,
    /// Body.
    pub body: Option<String>,
}

impl CreatePullRequest {
    fn into_parameters(self) -> Parameters {
        params([(
            "pull",
            json!({
                "base": self.base,
                "head": self.head,
                "title": self.title,
                "body": self.body,
            }),
        )])
    }
}

/// Service for pull request operations.
pub struct PullRequestsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> PullRequestsService<'a> {
    /// Creates a new pull requests service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists pull requests in the given state.
    pub async fn list(&self, owner: &str, repo: &str, state: IssueState) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Get,
                &format!("pulls/{}/{}/{}", owner, repo, state),
                Parameters::new(),
                "pulls",
            )
            .await
    }

    /// Gets a pull request with its discussion.
    pub async fn show(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Get,
                &format!("pulls/{}/{}/{}", owner, repo, number),
                Parameters::new(),
                "pull",
            )
            .await
    }

    /// Opens a pull request; fields are sent as `pull[field]`.
    pub async fn create(
        &self,
        owner: &str,
        repo: &str,
        request: CreatePullRequest,
    ) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Post,
                &format!("pulls/{}/{}", owner, repo),
                request.into_parameters(),
                "pull",
            )
            .await
    }
}

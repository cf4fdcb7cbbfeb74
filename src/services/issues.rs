//! Issue operations.

use super::{encode_term, params};
use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::transport::{HttpMethod, Parameters};
use serde_json::{json, Value};
use std::fmt;

/// Issue state filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueState {
    /// Open issues.
    #[default]
    Open,
    /// Closed issues.
    Closed,
}

impl IssueState {
    /// Returns the path segment for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service for issue operations.
pub struct IssuesService<'a> {
    client: &'a GitHubClient,
}

impl<'a> IssuesService<'a> {
    /// Creates a new issues service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists issues of a repository in the given state.
    pub async fn list(&self, owner: &str, repo: &str, state: IssueState) -> GitHubResult<Value> {
        self.get(&format!("issues/list/{}/{}/{}", owner, repo, state), "issues")
            .await
    }

    /// Searches issues of a repository.
    pub async fn search(
        &self,
        owner: &str,
        repo: &str,
        state: IssueState,
        term: &str,
    ) -> GitHubResult<Value> {
        self.get(
            &format!(
                "issues/search/{}/{}/{}/{}",
                owner,
                repo,
                state,
                encode_term(term)
            ),
            "issues",
        )
        .await
    }

    /// Gets an issue.
    pub async fn show(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Value> {
        self.get(&format!("issues/show/{}/{}/{}", owner, repo, number), "issue")
            .await
    }

    /// Opens a new issue.
    pub async fn open(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> GitHubResult<Value> {
        self.post(
            &format!("issues/open/{}/{}", owner, repo),
            params([("title", json!(title)), ("body", json!(body))]),
            "issue",
        )
        .await
    }

    /// Closes an issue.
    pub async fn close(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Value> {
        self.post(
            &format!("issues/close/{}/{}/{}", owner, repo, number),
            Parameters::new(),
            "issue",
        )
        .await
    }

    /// Reopens a closed issue.
    pub async fn reopen(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Value> {
        self.post(
            &format!("issues/reopen/{}/{}/{}", owner, repo, number),
            Parameters::new(),
            "issue",
        )
        .await
    }

    /// Edits the title and body of an issue.
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        title: &str,
        body: &str,
    ) -> GitHubResult<Value> {
        self.post(
            &format!("issues/edit/{}/{}/{}", owner, repo, number),
            params([("title", json!(title)), ("body", json!(body))]),
            "issue",
        )
        .await
    }

    // Comments

    /// Lists comments on an issue.
    pub async fn comments(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Value> {
        self.get(
            &format!("issues/comments/{}/{}/{}", owner, repo, number),
            "comments",
        )
        .await
    }

    /// Adds a comment to an issue.
    pub async fn add_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        comment: &str,
    ) -> GitHubResult<Value> {
        self.post(
            &format!("issues/comment/{}/{}/{}", owner, repo, number),
            params([("comment", json!(comment))]),
            "comment",
        )
        .await
    }

    // Labels

    /// Lists labels defined on a repository.
    pub async fn labels(&self, owner: &str, repo: &str) -> GitHubResult<Value> {
        self.get(&format!("issues/labels/{}/{}", owner, repo), "labels")
            .await
    }

    /// Adds a label to an issue. Returns the issue's labels.
    pub async fn add_label(
        &self,
        owner: &str,
        repo: &str,
        label: &str,
        number: u64,
    ) -> GitHubResult<Value> {
        self.post(
            &format!(
                "issues/label/add/{}/{}/{}/{}",
                owner,
                repo,
                encode_term(label),
                number
            ),
            Parameters::new(),
            "labels",
        )
        .await
    }

    /// Removes a label from an issue. Returns the issue's labels.
    pub async fn remove_label(
        &self,
        owner: &str,
        repo: &str,
        label: &str,
        number: u64,
    ) -> GitHubResult<Value> {
        self.post(
            &format!(
                "issues/label/remove/{}/{}/{}/{}",
                owner,
                repo,
                encode_term(label),
                number
            ),
            Parameters::new(),
            "labels",
        )
        .await
    }

    async fn get(&self, path: &str, key: &str) -> GitHubResult<Value> {
        self.client
            .fetch_field(HttpMethod::Get, path, Parameters::new(), key)
            .await
    }

    async fn post(&self, path: &str, parameters: Parameters, key: &str) -> GitHubResult<Value> {
        self.client
            .fetch_field(HttpMethod::Post, path, parameters, key)
            .await
    }
}

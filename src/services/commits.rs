//! Commit operations.

use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::transport::{HttpMethod, Parameters};
use serde_json::Value;

/// Service for commit operations.
pub struct CommitsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> CommitsService<'a> {
    /// Creates a new commits service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists commits on a branch.
    pub async fn branch_commits(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Get,
                &format!("commits/list/{}/{}/{}", owner, repo, branch),
                Parameters::new(),
                "commits",
            )
            .await
    }

    /// Lists commits on a branch that touched `path`.
    pub async fn file_commits(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        path: &str,
    ) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Get,
                &format!("commits/list/{}/{}/{}/{}", owner, repo, branch, path),
                Parameters::new(),
                "commits",
            )
            .await
    }

    /// Gets a single commit.
    pub async fn commit(&self, owner: &str, repo: &str, sha: &str) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Get,
                &format!("commits/show/{}/{}/{}", owner, repo, sha),
                Parameters::new(),
                "commit",
            )
            .await
    }
}

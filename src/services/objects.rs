//! Git object operations: trees and blobs.

use crate::client::GitHubClient;
use crate::config::RequestOptions;
use crate::errors::GitHubResult;
use crate::transport::{HttpMethod, Parameters};
use serde_json::Value;

/// Service for git object operations.
pub struct ObjectsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> ObjectsService<'a> {
    /// Creates a new objects service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists the entries of a tree.
    pub async fn tree(&self, owner: &str, repo: &str, tree_sha: &str) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Get,
                &format!("tree/show/{}/{}/{}", owner, repo, tree_sha),
                Parameters::new(),
                "tree",
            )
            .await
    }

    /// Gets blob metadata and contents for `path` within a tree.
    pub async fn blob(
        &self,
        owner: &str,
        repo: &str,
        tree_sha: &str,
        path: &str,
    ) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Get,
                &format!("blob/show/{}/{}/{}/{}", owner, repo, tree_sha, path),
                Parameters::new(),
                "blob",
            )
            .await
    }

    /// Maps every path in a tree to its blob sha.
    pub async fn blobs(&self, owner: &str, repo: &str, tree_sha: &str) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Get,
                &format!("blob/all/{}/{}/{}", owner, repo, tree_sha),
                Parameters::new(),
                "blobs",
            )
            .await
    }

    /// Gets the raw contents of a blob.
    ///
    /// Sent with a text format overlay; the client's base format is untouched.
    pub async fn raw(&self, owner: &str, repo: &str, sha: &str) -> GitHubResult<String> {
        self.client
            .get(
                &format!("blob/show/{}/{}/{}", owner, repo, sha),
                Parameters::new(),
                &RequestOptions::new().format("text"),
            )
            .await?
            .into_text()
    }
}

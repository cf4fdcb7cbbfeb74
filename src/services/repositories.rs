//! Repository operations.

use super::{encode_term, params};
use crate::client::GitHubClient;
use crate::config::RequestOptions;
use crate::errors::GitHubResult;
use crate::transport::{HttpMethod, Parameters};
use serde_json::{json, Value};

/// Request to create a repository.
#[derive(Debug, Clone, Default)]
pub struct CreateRepositoryRequest {
    /// Repository name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Homepage URL.
    pub homepage: Option<String>,
    /// Whether the repository is public.
    pub public: bool,
}

impl CreateRepositoryRequest {
    /// Creates a public repository request.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            public: true,
            ..Default::default()
        }
    }

    fn into_parameters(self) -> Parameters {
        params([
            ("name", json!(self.name)),
            ("description", json!(self.description)),
            ("homepage", json!(self.homepage)),
            ("public", json!(self.public)),
        ])
    }
}

/// Service for repository operations.
pub struct RepositoriesService<'a> {
    client: &'a GitHubClient,
}

impl<'a> RepositoriesService<'a> {
    /// Creates a new repositories service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Searches repositories.
    pub async fn search(&self, term: &str) -> GitHubResult<Value> {
        self.get(&format!("repos/search/{}", encode_term(term)), "repositories")
            .await
    }

    /// Gets a repository.
    pub async fn show(&self, owner: &str, repo: &str) -> GitHubResult<Value> {
        self.get(&format!("repos/show/{}/{}", owner, repo), "repository")
            .await
    }

    /// Lists repositories owned by a user.
    pub async fn user_repos(&self, username: &str) -> GitHubResult<Value> {
        self.get(&format!("repos/show/{}", username), "repositories")
            .await
    }

    /// Creates a repository for the authenticated user.
    pub async fn create(&self, request: CreateRepositoryRequest) -> GitHubResult<Value> {
        self.post("repos/create", request.into_parameters(), "repository")
            .await
    }

    /// Deletes a repository of the authenticated user.
    ///
    /// The API answers the first call with a `delete_token`; passing it back
    /// confirms the deletion. The whole reply object is returned.
    pub async fn delete(&self, repo: &str, delete_token: Option<&str>) -> GitHubResult<Value> {
        let parameters = match delete_token {
            Some(token) => params([("delete_token", json!(token))]),
            None => Parameters::new(),
        };
        self.client
            .post(
                &format!("repos/delete/{}", repo),
                parameters,
                &RequestOptions::new(),
            )
            .await?
            .into_json()
    }

    /// Makes a repository public.
    pub async fn set_public(&self, repo: &str) -> GitHubResult<Value> {
        self.post(
            &format!("repos/set/public/{}", repo),
            Parameters::new(),
            "repository",
        )
        .await
    }

    /// Makes a repository private.
    pub async fn set_private(&self, repo: &str) -> GitHubResult<Value> {
        self.post(
            &format!("repos/set/private/{}", repo),
            Parameters::new(),
            "repository",
        )
        .await
    }

    /// Lists branches, keyed by name with the head sha as value.
    pub async fn branches(&self, owner: &str, repo: &str) -> GitHubResult<Value> {
        self.get(&format!("repos/show/{}/{}/branches", owner, repo), "branches")
            .await
    }

    /// Lists tags, keyed by name with the sha as value.
    pub async fn tags(&self, owner: &str, repo: &str) -> GitHubResult<Value> {
        self.get(&format!("repos/show/{}/{}/tags", owner, repo), "tags")
            .await
    }

    /// Lists collaborators.
    pub async fn collaborators(&self, owner: &str, repo: &str) -> GitHubResult<Value> {
        self.get(
            &format!("repos/show/{}/{}/collaborators", owner, repo),
            "collaborators",
        )
        .await
    }

    /// Lists contributors.
    pub async fn contributors(&self, owner: &str, repo: &str) -> GitHubResult<Value> {
        self.get(
            &format!("repos/show/{}/{}/contributors", owner, repo),
            "contributors",
        )
        .await
    }

    /// Lists watchers.
    pub async fn watchers(&self, owner: &str, repo: &str) -> GitHubResult<Value> {
        self.get(&format!("repos/show/{}/{}/watchers", owner, repo), "watchers")
            .await
    }

    /// Gets the language breakdown in bytes.
    pub async fn languages(&self, owner: &str, repo: &str) -> GitHubResult<Value> {
        self.get(&format!("repos/show/{}/{}/languages", owner, repo), "languages")
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

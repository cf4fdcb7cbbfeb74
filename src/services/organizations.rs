//! Organization operations.

use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::transport::{HttpMethod, Parameters};
use serde_json::Value;

/// Service for organization operations.
pub struct OrganizationsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> OrganizationsService<'a> {
    /// Creates a new organizations service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Gets an organization.
    pub async fn show(&self, org: &str) -> GitHubResult<Value> {
        self.get(&format!("organizations/{}", org), "organization")
            .await
    }

    /// Lists organizations a user belongs to.
    pub async fn list_for_user(&self, username: &str) -> GitHubResult<Value> {
        self.get(
            &format!("user/show/{}/organizations", username),
            "organizations",
        )
        .await
    }

    /// Lists public members.
    pub async fn public_members(&self, org: &str) -> GitHubResult<Value> {
        self.get(&format!("organizations/{}/public_members", org), "users")
            .await
    }

    /// Lists public repositories.
    pub async fn repositories(&self, org: &str) -> GitHubResult<Value> {
        self.get(
            &format!("organizations/{}/public_repositories", org),
            "repositories",
        )
        .await
    }

    /// Lists teams. Requires an authenticated owner.
    pub async fn teams(&self, org: &str) -> GitHubResult<Value> {
        self.get(&format!("organizations/{}/teams", org), "teams")
            .await
    }

    async fn get(&self, path: &str, key: &str) -> GitHubResult<Value> {
        self.client
            .fetch_field(HttpMethod::Get, path, Parameters::new(), key)
            .await
    }
}

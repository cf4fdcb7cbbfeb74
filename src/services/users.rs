//! User operations.

use super::{encode_term, params};
use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::transport::{HttpMethod, Parameters};
use serde_json::{Map, Value};

/// Service for user operations.
pub struct UsersService<'a> {
    client: &'a GitHubClient,
}

impl<'a> UsersService<'a> {
    /// Creates a new users service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Searches users by name.
    pub async fn search(&self, term: &str) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Get,
                &format!("user/search/{}", encode_term(term)),
                Parameters::new(),
                "users",
            )
            .await
    }

    /// Gets a user's public profile, or the full profile when authenticated
    /// as that user.
    pub async fn show(&self, username: &str) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Get,
                &format!("user/show/{}", username),
                Parameters::new(),
                "user",
            )
            .await
    }

    /// Updates profile fields of the authenticated user.
    ///
    /// Accepted keys are `name`, `email`, `blog`, `company` and `location`;
    /// they are sent as `values[key]`.
    pub async fn update(&self, username: &str, values: Map<String, Value>) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Post,
                &format!("user/show/{}", username),
                params([("values", Value::Object(values))]),
                "user",
            )
            .await
    }

    /// Lists users the given user follows.
    pub async fn following(&self, username: &str) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Get,
                &format!("user/show/{}/following", username),
                Parameters::new(),
                "users",
            )
            .await
    }

    /// Lists followers of the given user.
    pub async fn followers(&self, username: &str) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Get,
                &format!("user/show/{}/followers", username),
                Parameters::new(),
                "users",
            )
            .await
    }

    /// Follows a user. Returns the updated following list.
    pub async fn follow(&self, username: &str) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Post,
                &format!("user/follow/{}", username),
                Parameters::new(),
                "users",
            )
            .await
    }

    /// Unfollows a user. Returns the updated following list.
    pub async fn unfollow(&self, username: &str) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Post,
                &format!("user/unfollow/{}", username),
                Parameters::new(),
                "users",
            )
            .await
    }

    /// Lists repositories the given user watches.
    pub async fn watched_repos(&self, username: &str) -> GitHubResult<Value> {
        self.client
            .fetch_field(
                HttpMethod::Get,
                &format!("repos/watched/{}", username),
                Parameters::new(),
                "repositories",
            )
            .await
    }

    // Emails

    /// Lists email addresses of the authenticated user.
    pub async fn emails(&self) -> GitHubResult<Value> {
        self.client
            .fetch_field(HttpMethod::Get, "user/emails", Parameters::new(), "emails")
            .await
    }
}

//! # GitHub v2 API Client
//!
//! An async client for the GitHub v2 REST API with:
//! - A single request dispatcher applying defaults, per-call overrides and
//!   authentication
//! - Client-side burst throttling shared by every dispatched request
//! - JSON and raw text response decoding
//! - Resource facades (users, issues, commits, repositories, organizations,
//!   pull requests, git objects)
//! - A pluggable transport with a recording mock for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_github_api::{AuthMethod, GitHubClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GitHubClient::builder().build()?;
//!     client.authenticate("octocat", "0123456789abcdef", Some(AuthMethod::HttpToken));
//!
//!     let repo = client.repos().show("octocat", "Hello-World").await?;
//!     println!("{}", repo["name"]);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod types;

// Authentication
pub mod auth;

// Transport and request dispatch
pub mod dispatcher;
pub mod transport;

// Client and API services
pub mod client;
pub mod services;

// Throttling
pub mod resilience;

// Observability
pub mod observability;

// Mocks for testing
pub mod mocks;

// Re-exports for convenience
pub use auth::AuthMethod;
pub use client::{GitHubClient, GitHubClientBuilder};
pub use config::{
    ClientOption, Options, OptionsBuilder, RequestOptions, ResponseFormat, ThrottleConfig,
};
pub use dispatcher::{RequestDispatcher, RequestDispatcherBuilder};
pub use errors::{ErrorCategory, GitHubError, GitHubErrorKind, GitHubResult};
pub use resilience::RequestThrottle;
pub use transport::{HttpMethod, Parameters, ReqwestTransport, Transport, TransportRequest};
pub use types::DecodedResponse;

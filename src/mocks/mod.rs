//! Mock transport for testing code built on the dispatcher.

use crate::config::Options;
use crate::errors::{GitHubError, GitHubErrorKind, GitHubResult};
use crate::transport::{HttpMethod, Parameters, Transport, TransportRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// A canned transport outcome.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
    /// Transport failure to report instead of a response.
    pub failure: Option<GitHubErrorKind>,
    /// Delay before responding.
    pub delay: Option<Duration>,
}

impl MockResponse {
    /// Creates a 200 response with a raw body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            failure: None,
            delay: None,
        }
    }

    /// Creates a 200 response with a JSON-serialized body.
    pub fn json<T: Serialize>(body: &T) -> Self {
        Self::ok(serde_json::to_string(body).unwrap_or_default())
    }

    /// Creates a 404 Not Found response.
    pub fn not_found(message: &str) -> Self {
        Self::with_status(404, serde_json::json!({ "error": message }).to_string())
    }

    /// Creates a 401 Unauthorized response.
    pub fn unauthorized(message: &str) -> Self {
        Self::with_status(401, serde_json::json!({ "error": message }).to_string())
    }

    /// Creates a 500 Internal Server Error response.
    pub fn server_error(message: &str) -> Self {
        Self::with_status(500, serde_json::json!({ "error": message }).to_string())
    }

    /// Creates a response with an arbitrary status.
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            ..Self::ok(body)
        }
    }

    /// Simulates a transport timeout.
    pub fn timeout() -> Self {
        Self {
            failure: Some(GitHubErrorKind::Timeout),
            ..Self::ok("")
        }
    }

    /// Simulates a connection failure.
    pub fn network_error() -> Self {
        Self {
            failure: Some(GitHubErrorKind::Network),
            ..Self::ok("")
        }
    }

    /// Adds a delay to the response.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn into_result(self, request: &TransportRequest) -> GitHubResult<String> {
        match self.failure {
            Some(GitHubErrorKind::Timeout) => Err(GitHubError::timeout(format!(
                "Mock timeout for {} {}",
                request.method, request.url
            ))),
            Some(kind) => Err(GitHubError::new(
                kind,
                format!("Mock failure for {} {}", request.method, request.url),
            )),
            None if (200..300).contains(&self.status) => Ok(self.body),
            None => Err(GitHubError::http_status(self.status, self.body)),
        }
    }
}

/// A recorded transport call.
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Expanded URL.
    pub url: String,
    /// Parameters as handed to the transport.
    pub parameters: Parameters,
    /// Effective options as handed to the transport.
    pub options: Options,
    /// Timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Default behavior for unmatched requests.
#[derive(Debug, Clone, Default)]
pub enum DefaultBehavior {
    /// Return 404 for unmatched requests.
    #[default]
    NotFound,
    /// Answer every unmatched request with the same response.
    Respond(MockResponse),
    /// Panic on unmatched requests.
    Panic,
}

#[derive(Debug)]
struct Route {
    method: HttpMethod,
    url_suffix: String,
    responses: VecDeque<MockResponse>,
}

/// Transport double that records calls without performing I/O.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    routes: Arc<RwLock<Vec<Route>>>,
    requests: Arc<RwLock<Vec<MockRequest>>>,
    default_behavior: DefaultBehavior,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default behavior for unmatched requests.
    pub fn with_default_behavior(mut self, behavior: DefaultBehavior) -> Self {
        self.default_behavior = behavior;
        self
    }

    /// Registers a response for requests whose URL ends with `url_suffix`.
    ///
    /// Responses registered for the same route are served in order.
    pub fn register(&self, method: HttpMethod, url_suffix: &str, response: MockResponse) {
        let mut routes = self.routes_mut();
        match routes
            .iter_mut()
            .find(|r| r.method == method && r.url_suffix == url_suffix)
        {
            Some(route) => route.responses.push_back(response),
            None => routes.push(Route {
                method,
                url_suffix: url_suffix.to_string(),
                responses: VecDeque::from([response]),
            }),
        }
    }

    /// Registers a GET response.
    pub fn on_get(&self, url_suffix: &str, response: MockResponse) {
        self.register(HttpMethod::Get, url_suffix, response);
    }

    /// Registers a POST response.
    pub fn on_post(&self, url_suffix: &str, response: MockResponse) {
        self.register(HttpMethod::Post, url_suffix, response);
    }

    /// Registers a PATCH response.
    pub fn on_patch(&self, url_suffix: &str, response: MockResponse) {
        self.register(HttpMethod::Patch, url_suffix, response);
    }

    /// Registers a DELETE response.
    pub fn on_delete(&self, url_suffix: &str, response: MockResponse) {
        self.register(HttpMethod::Delete, url_suffix, response);
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<MockRequest> {
        self.recorded().clone()
    }

    /// Gets the most recent request.
    pub fn last_request(&self) -> Option<MockRequest> {
        self.recorded().last().cloned()
    }

    /// Gets the count of requests made.
    pub fn request_count(&self) -> usize {
        self.recorded().len()
    }

    /// Verifies that a specific request was made.
    pub fn verify_request(&self, method: HttpMethod, url_suffix: &str) -> bool {
        self.recorded()
            .iter()
            .any(|r| r.method == method && r.url.ends_with(url_suffix))
    }

    /// Resets the mock (clears requests and routes).
    pub fn reset(&self) {
        self.requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.routes_mut().clear();
    }

    fn next_response(&self, method: HttpMethod, url: &str) -> Option<MockResponse> {
        self.routes_mut()
            .iter_mut()
            .filter(|r| r.method == method && url.ends_with(&r.url_suffix))
            .find_map(|r| r.responses.pop_front())
    }

    fn routes_mut(&self) -> RwLockWriteGuard<'_, Vec<Route>> {
        self.routes.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn recorded(&self) -> RwLockReadGuard<'_, Vec<MockRequest>> {
        self.requests.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: TransportRequest) -> GitHubResult<String> {
        self.requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MockRequest {
                method: request.method,
                url: request.url.clone(),
                parameters: request.parameters.clone(),
                options: request.options.clone(),
                timestamp: Utc::now(),
            });

        let response = match self.next_response(request.method, &request.url) {
            Some(response) => response,
            None => match &self.default_behavior {
                DefaultBehavior::NotFound => {
                    return Err(GitHubError::http_status(
                        404,
                        format!("No mock response for {} {}", request.method, request.url),
                    ))
                }
                DefaultBehavior::Respond(response) => response.clone(),
                DefaultBehavior::Panic => {
                    panic!("No mock response for {} {}", request.method, request.url);
                }
            },
        };

        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        }

        response.into_result(&request)
    }
}

//! Transport layer abstraction for HTTP communication.
//!
//! The dispatcher only needs a capability that executes one request and
//! hands back the raw body. [`ReqwestTransport`] is the production
//! implementation; tests substitute [`crate::mocks::MockTransport`].

use crate::auth::{AuthPlacement, Credentials};
use crate::config::Options;
use crate::errors::{GitHubError, GitHubResult};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde_json::Value;
use std::fmt;
use url::Url;

/// Request parameters: query string for GET, form body otherwise.
pub type Parameters = serde_json::Map<String, Value>;

/// HTTP verbs the GitHub v2 API is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PATCH.
    Patch,
    /// DELETE.
    Delete,
}

impl HttpMethod {
    /// Returns the method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns true if parameters travel in the query string.
    pub fn uses_query(&self) -> bool {
        matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Everything a transport needs to perform one call.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Fully expanded URL.
    pub url: String,
    /// Verb-specific payload.
    pub parameters: Parameters,
    /// HTTP method.
    pub method: HttpMethod,
    /// Effective options for this call.
    pub options: Options,
}

impl TransportRequest {
    /// Credentials to attach, if the options carry a complete set.
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::resolve(
            self.options.login.as_deref(),
            self.options.secret.as_ref(),
            self.options.auth_method,
        )
    }
}

/// Trait for HTTP transport implementations.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the request and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns a transport error (`Network`, `Timeout` or `HttpStatus`) if
    /// the request cannot be completed successfully.
    async fn execute(&self, request: TransportRequest) -> GitHubResult<String>;
}

/// Error body returned by the v2 API.
#[derive(Debug, serde::Deserialize)]
struct GitHubErrorResponse {
    error: Option<String>,
    message: Option<String>,
}

/// Reqwest-based HTTP transport implementation.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a new transport.
    pub fn new() -> GitHubResult<Self> {
        let client = Client::builder().build().map_err(|e| {
            GitHubError::configuration(format!("Failed to create HTTP client: {}", e))
                .with_cause(e)
        })?;
        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Parses the URL and applies the configured port when none is explicit.
    fn target_url(url: &str, port: u16) -> GitHubResult<Url> {
        let mut url = Url::parse(url).map_err(|e| {
            GitHubError::configuration(format!("Invalid request URL {}: {}", url, e)).with_cause(e)
        })?;

        if url.port().is_none() && url.port_or_known_default() != Some(port) {
            url.set_port(Some(port)).map_err(|_| {
                GitHubError::configuration(format!("URL {} cannot carry a port", url))
            })?;
        }

        Ok(url)
    }

    fn error_message(status: u16, body: &str) -> String {
        serde_json::from_str::<GitHubErrorResponse>(body)
            .ok()
            .and_then(|e| e.error.or(e.message))
            .unwrap_or_else(|| format!("HTTP {} error", status))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> GitHubResult<String> {
        let mut url = Self::target_url(&request.url, request.options.port)?;
        let mut pairs = Vec::new();
        let mut basic = None;

        match request.credentials().map(|c| c.placement()) {
            Some(AuthPlacement::Parameters(auth)) => pairs.extend(auth),
            Some(AuthPlacement::Basic { username, password }) => basic = Some((username, password)),
            None => {}
        }
        pairs.extend(encode_parameters(&request.parameters));

        let mut builder = if request.method.uses_query() {
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs.iter());
            }
            self.client.request(request.method.into(), url)
        } else {
            let body = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs.iter())
                .finish();
            self.client
                .request(request.method.into(), url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body)
        };

        builder = builder
            .header(USER_AGENT, &request.options.user_agent)
            .timeout(request.options.timeout);

        if let Some((username, password)) = basic {
            builder = builder.basic_auth(username, Some(password));
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let status = status.as_u16();
            return Err(GitHubError::http_status(
                status,
                Self::error_message(status, &body),
            ));
        }

        Ok(body)
    }
}

/// Flattens parameters into form pairs.
///
/// Arrays become `key[]`, nested maps `key[sub]`, booleans `1`/`0`;
/// nulls are dropped.
pub fn encode_parameters(parameters: &Parameters) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in parameters {
        flatten(key.clone(), value, &mut pairs);
    }
    pairs
}

fn flatten(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((key, if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for item in items {
                flatten(format!("{}[]", key), item, pairs);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                flatten(format!("{}[{}]", key, sub), item, pairs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn params(value: Value) -> Parameters {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("fixture must be an object"),
        }
    }

    fn sorted(mut pairs: Vec<(String, String)>) -> Vec<(String, String)> {
        pairs.sort();
        pairs
    }

    #[test]
    fn test_encode_scalars() {
        let pairs = sorted(encode_parameters(&params(json!({
            "title": "Bug",
            "number": 7,
            "public": true,
            "skip": null,
        }))));

        assert_eq!(
            pairs,
            vec![
                ("number".to_string(), "7".to_string()),
                ("public".to_string(), "1".to_string()),
                ("title".to_string(), "Bug".to_string()),
            ]
        );
    }

    #[test]
    fn test_encode_nested() {
        let pairs = sorted(encode_parameters(&params(json!({
            "labels": ["bug", "ui"],
            "pull": { "base": "main", "head": "feature" },
        }))));

        assert_eq!(
            pairs,
            vec![
                ("labels[]".to_string(), "bug".to_string()),
                ("labels[]".to_string(), "ui".to_string()),
                ("pull[base]".to_string(), "main".to_string()),
                ("pull[head]".to_string(), "feature".to_string()),
            ]
        );
    }

    #[test]
    fn test_default_port_is_not_spelled_out() {
        let raw = "https://github.com/api/v2/json/user/show/x";
        let url = ReqwestTransport::target_url(raw, 443).unwrap();
        assert_eq!(url.as_str(), raw);
    }

    #[test]
    fn test_custom_port_is_applied() {
        let url = ReqwestTransport::target_url("https://github.com/api/v2/json/x", 8443).unwrap();
        assert_eq!(url.port(), Some(8443));
    }

    #[test]
    fn test_explicit_port_wins() {
        let url = ReqwestTransport::target_url("http://127.0.0.1:8080/api", 443).unwrap();
        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn test_invalid_url_is_configuration_error() {
        let error = ReqwestTransport::target_url("not a url", 443).unwrap_err();
        assert!(error.is_configuration());
    }

    #[test]
    fn test_error_message_prefers_api_error() {
        assert_eq!(
            ReqwestTransport::error_message(404, r#"{"error":"Not Found"}"#),
            "Not Found"
        );
        assert_eq!(ReqwestTransport::error_message(502, "<html>"), "HTTP 502 error");
    }
}

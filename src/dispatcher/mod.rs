//! Request dispatcher: the single choke point for outbound API calls.

use crate::auth::AuthMethod;
use crate::config::{ClientOption, Options, RequestOptions, ResponseFormat};
use crate::errors::{GitHubError, GitHubResult};
use crate::observability::{Metrics, RequestTimer, TracingHooks};
use crate::resilience::RequestThrottle;
use crate::transport::{HttpMethod, Parameters, ReqwestTransport, Transport, TransportRequest};
use crate::types::DecodedResponse;
use secrecy::SecretString;
use serde_json::{Map, Value};
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// Turns `(path, parameters, verb, options)` into a throttled transport call
/// and decodes the result.
pub struct RequestDispatcher {
    /// Base options; per-call overlays never write here.
    options: RwLock<Options>,
    /// Transport performing the HTTP exchange.
    transport: Arc<dyn Transport>,
    /// Throttle, possibly shared with other dispatchers.
    throttle: Arc<RequestThrottle>,
    /// Request metrics.
    metrics: Arc<Metrics>,
}

impl RequestDispatcher {
    /// Creates a dispatcher with the reqwest transport and a private throttle.
    pub fn new(options: Options) -> GitHubResult<Self> {
        Self::builder().options(options).build()
    }

    /// Creates a new dispatcher builder.
    pub fn builder() -> RequestDispatcherBuilder {
        RequestDispatcherBuilder::new()
    }

    /// Returns a snapshot of the base options.
    pub fn options(&self) -> Options {
        self.options
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Gets the throttle.
    pub fn throttle(&self) -> &Arc<RequestThrottle> {
        &self.throttle
    }

    /// Gets the metrics collector.
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Sets one base option.
    pub fn set_option(&self, option: ClientOption) -> &Self {
        tracing::debug!(option = option.name(), "Dispatcher option updated");
        self.options
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(option);
        self
    }

    /// Sets login, secret and auth method in one step.
    ///
    /// `method` defaults to [`AuthMethod::UrlToken`].
    pub fn authenticate(
        &self,
        login: impl Into<String>,
        secret: impl Into<String>,
        method: Option<AuthMethod>,
    ) {
        let method = method.unwrap_or_default();
        self.replace_credentials(
            Some(login.into()),
            Some(SecretString::new(secret.into())),
            Some(method),
        );
        tracing::debug!(method = %method, "Credentials set");
    }

    /// Clears login, secret and auth method.
    pub fn deauthenticate(&self) {
        self.replace_credentials(None, None, None);
        tracing::debug!("Credentials cleared");
    }

    fn replace_credentials(
        &self,
        login: Option<String>,
        secret: Option<SecretString>,
        method: Option<AuthMethod>,
    ) {
        let mut options = self.options.write().unwrap_or_else(PoisonError::into_inner);
        options.login = login;
        options.secret = secret;
        options.auth_method = method;
    }

    /// Sends a GET request.
    pub async fn get(
        &self,
        path: &str,
        parameters: Parameters,
        options: &RequestOptions,
    ) -> GitHubResult<DecodedResponse> {
        self.request(path, parameters, HttpMethod::Get, options).await
    }

    /// Sends a POST request.
    pub async fn post(
        &self,
        path: &str,
        parameters: Parameters,
        options: &RequestOptions,
    ) -> GitHubResult<DecodedResponse> {
        self.request(path, parameters, HttpMethod::Post, options).await
    }

    /// Sends a PATCH request.
    pub async fn update(
        &self,
        path: &str,
        parameters: Parameters,
        options: &RequestOptions,
    ) -> GitHubResult<DecodedResponse> {
        self.request(path, parameters, HttpMethod::Patch, options).await
    }

    /// Sends a DELETE request.
    pub async fn delete(
        &self,
        path: &str,
        parameters: Parameters,
        options: &RequestOptions,
    ) -> GitHubResult<DecodedResponse> {
        self.request(path, parameters, HttpMethod::Delete, options).await
    }

    /// Sends a request and decodes the response.
    ///
    /// # Errors
    ///
    /// * `UnsupportedFormat` if the effective format is neither json nor
    ///   text; the transport is not called.
    /// * Transport errors, unchanged and without retry.
    /// * `Decode` if a JSON body is malformed.
    pub async fn request(
        &self,
        path: &str,
        parameters: Parameters,
        method: HttpMethod,
        options: &RequestOptions,
    ) -> GitHubResult<DecodedResponse> {
        self.throttle.admit().await;

        let options = self.options().overlay(options);
        let url = build_url(&options.url_template, &options.protocol, &options.format, path);

        let request_id = Uuid::new_v4().to_string();
        TracingHooks::on_request_start(&request_id, method, &url);
        let timer = RequestTimer::new(Arc::clone(&self.metrics));

        let result = match options.response_format() {
            Ok(format) => {
                let request = TransportRequest {
                    url: url.clone(),
                    parameters,
                    method,
                    options,
                };
                self.transport
                    .execute(request)
                    .await
                    .and_then(|body| decode(body, format))
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(_) => {
                TracingHooks::on_request_complete(&request_id, method, &url, timer.elapsed());
                timer.success();
            }
            Err(e) => {
                TracingHooks::on_request_error(&request_id, method, &url, e);
                timer.failure();
            }
        }

        result
    }
}

/// Expands `:protocol`, `:format` and `:path` in `template`.
///
/// Slashes are trimmed from both ends of `path`. Substitution is a single
/// pass, so placeholder-like text inside a substituted value is kept as is;
/// unknown placeholders are left verbatim.
pub fn build_url(template: &str, protocol: &str, format: &str, path: &str) -> String {
    let path = path.trim_matches('/');
    let placeholders = [(":protocol", protocol), (":format", format), (":path", path)];

    let mut url = String::with_capacity(template.len() + path.len());
    let mut rest = template;
    while let Some(pos) = rest.find(':') {
        url.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match placeholders.iter().find(|(name, _)| tail.starts_with(name)) {
            Some((name, value)) => {
                url.push_str(value);
                rest = &tail[name.len()..];
            }
            None => {
                url.push(':');
                rest = &tail[1..];
            }
        }
    }
    url.push_str(rest);
    url
}

/// Decodes a raw body according to `format`.
///
/// An empty or `null` JSON body decodes to an empty object.
pub fn decode(body: String, format: ResponseFormat) -> GitHubResult<DecodedResponse> {
    match format {
        ResponseFormat::Text => Ok(DecodedResponse::Text(body)),
        ResponseFormat::Json => {
            if body.trim().is_empty() {
                return Ok(DecodedResponse::Json(Value::Object(Map::new())));
            }
            let value: Value = serde_json::from_str(&body).map_err(|e| {
                GitHubError::decode(format!("Failed to decode JSON response: {}", e)).with_cause(e)
            })?;
            Ok(DecodedResponse::Json(match value {
                Value::Null => Value::Object(Map::new()),
                value => value,
            }))
        }
    }
}

/// Builder for RequestDispatcher.
#[derive(Default)]
pub struct RequestDispatcherBuilder {
    options: Option<Options>,
    transport: Option<Arc<dyn Transport>>,
    throttle: Option<Arc<RequestThrottle>>,
    metrics: Option<Arc<Metrics>>,
}

impl RequestDispatcherBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base options.
    pub fn options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets the transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Shares an existing throttle.
    pub fn throttle(mut self, throttle: Arc<RequestThrottle>) -> Self {
        self.throttle = Some(throttle);
        self
    }

    /// Shares an existing metrics collector.
    pub fn metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Builds the dispatcher.
    pub fn build(self) -> GitHubResult<RequestDispatcher> {
        let options = self.options.unwrap_or_default();
        options.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        Ok(RequestDispatcher {
            options: RwLock::new(options),
            transport,
            throttle: self.throttle.unwrap_or_default(),
            metrics: self.metrics.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_URL_TEMPLATE;
    use crate::errors::GitHubErrorKind;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("repos/show/octocat/Hello-World" ; "bare")]
    #[test_case("/repos/show/octocat/Hello-World" ; "leading slash")]
    #[test_case("repos/show/octocat/Hello-World/" ; "trailing slash")]
    #[test_case("//repos/show/octocat/Hello-World//" ; "both sides")]
    fn test_build_url_trims_slashes(path: &str) {
        assert_eq!(
            build_url(DEFAULT_URL_TEMPLATE, "https", "json", path),
            "https://github.com/api/v2/json/repos/show/octocat/Hello-World"
        );
    }

    #[test]
    fn test_build_url_leaves_unknown_placeholders() {
        assert_eq!(
            build_url(":protocol://:host/api/:format/:path", "http", "text", "user/show/x"),
            "http://:host/api/text/user/show/x"
        );
    }

    #[test]
    fn test_build_url_is_single_pass() {
        assert_eq!(
            build_url(":protocol://github.com/:path", "https", "json", "search/:format"),
            "https://github.com/search/:format"
        );
    }

    #[test]
    fn test_decode_text_is_identity() {
        let body = "  raw {not json}\n".to_string();
        assert_eq!(
            decode(body.clone(), ResponseFormat::Text).unwrap(),
            DecodedResponse::Text(body)
        );
    }

    #[test_case("{}" ; "empty object")]
    #[test_case("" ; "empty body")]
    #[test_case("null" ; "null")]
    fn test_decode_empty_json(body: &str) {
        assert_eq!(
            decode(body.to_string(), ResponseFormat::Json).unwrap(),
            DecodedResponse::Json(json!({}))
        );
    }

    #[test]
    fn test_decode_malformed_json() {
        let error = decode("{\"name\":".to_string(), ResponseFormat::Json).unwrap_err();
        assert_eq!(*error.kind(), GitHubErrorKind::Decode);
    }

    #[test]
    fn test_builder_rejects_invalid_options() {
        let options = Options {
            url_template: "https://github.com".to_string(),
            ..Default::default()
        };
        let result = RequestDispatcher::builder().options(options).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_authenticate_defaults_to_url_token() {
        let dispatcher = RequestDispatcher::new(Options::default()).unwrap();
        dispatcher.authenticate("octocat", "token", None);

        let options = dispatcher.options();
        assert_eq!(options.login.as_deref(), Some("octocat"));
        assert_eq!(options.auth_method, Some(AuthMethod::UrlToken));
    }

    #[test]
    fn test_set_option_chains() {
        let dispatcher = RequestDispatcher::new(Options::default()).unwrap();
        dispatcher
            .set_option(ClientOption::Format("text".to_string()))
            .set_option(ClientOption::Port(8443));

        let options = dispatcher.options();
        assert_eq!(options.format, "text");
        assert_eq!(options.port, 8443);
    }
}

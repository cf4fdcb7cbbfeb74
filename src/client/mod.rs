//! GitHub API client: the entry point holding the dispatcher and handing out
//! resource facades.

use crate::auth::AuthMethod;
use crate::config::{Options, OptionsBuilder, RequestOptions, ResponseFormat, ThrottleConfig};
use crate::dispatcher::RequestDispatcher;
use crate::errors::GitHubResult;
use crate::observability::Metrics;
use crate::resilience::RequestThrottle;
use crate::services::*;
use crate::transport::{HttpMethod, Parameters, Transport};
use crate::types::DecodedResponse;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// GitHub API client.
#[derive(Clone)]
pub struct GitHubClient {
    dispatcher: Arc<RequestDispatcher>,
}

impl GitHubClient {
    /// Creates a client with the reqwest transport and a private throttle.
    pub fn new(options: Options) -> GitHubResult<Self> {
        Ok(Self::with_dispatcher(Arc::new(RequestDispatcher::new(
            options,
        )?)))
    }

    /// Creates a client around an existing dispatcher.
    pub fn with_dispatcher(dispatcher: Arc<RequestDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Creates a new client builder.
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Gets the dispatcher.
    pub fn dispatcher(&self) -> &Arc<RequestDispatcher> {
        &self.dispatcher
    }

    /// Replaces the dispatcher used by this client and its facades.
    pub fn set_dispatcher(&mut self, dispatcher: Arc<RequestDispatcher>) {
        self.dispatcher = dispatcher;
    }

    /// Authenticates subsequent requests.
    ///
    /// `method` defaults to [`AuthMethod::UrlToken`].
    pub fn authenticate(
        &self,
        login: impl Into<String>,
        secret: impl Into<String>,
        method: Option<AuthMethod>,
    ) {
        self.dispatcher.authenticate(login, secret, method);
    }

    /// Removes any credentials.
    pub fn deauthenticate(&self) {
        self.dispatcher.deauthenticate();
    }

    // Service accessors

    /// Gets the users service.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    /// Gets the issues service.
    pub fn issues(&self) -> IssuesService<'_> {
        IssuesService::new(self)
    }

    /// Gets the commits service.
    pub fn commits(&self) -> CommitsService<'_> {
        CommitsService::new(self)
    }

    /// Gets the repositories service.
    pub fn repos(&self) -> RepositoriesService<'_> {
        RepositoriesService::new(self)
    }

    /// Gets the organizations service.
    pub fn organizations(&self) -> OrganizationsService<'_> {
        OrganizationsService::new(self)
    }

    /// Gets the pull requests service.
    pub fn pull_requests(&self) -> PullRequestsService<'_> {
        PullRequestsService::new(self)
    }

    /// Gets the git objects service.
    pub fn objects(&self) -> ObjectsService<'_> {
        ObjectsService::new(self)
    }

    // HTTP methods

    /// Performs a GET request.
    pub async fn get(
        &self,
        path: &str,
        parameters: Parameters,
        options: &RequestOptions,
    ) -> GitHubResult<DecodedResponse> {
        self.dispatcher.get(path, parameters, options).await
    }

    /// Performs a POST request.
    pub async fn post(
        &self,
        path: &str,
        parameters: Parameters,
        options: &RequestOptions,
    ) -> GitHubResult<DecodedResponse> {
        self.dispatcher.post(path, parameters, options).await
    }

    /// Performs a PATCH request.
    pub async fn update(
        &self,
        path: &str,
        parameters: Parameters,
        options: &RequestOptions,
    ) -> GitHubResult<DecodedResponse> {
        self.dispatcher.update(path, parameters, options).await
    }

    /// Performs a DELETE request.
    pub async fn delete(
        &self,
        path: &str,
        parameters: Parameters,
        options: &RequestOptions,
    ) -> GitHubResult<DecodedResponse> {
        self.dispatcher.delete(path, parameters, options).await
    }

    /// Sends a request with the base options and returns one top-level
    /// field of the JSON reply.
    pub(crate) async fn fetch_field(
        &self,
        method: HttpMethod,
        path: &str,
        parameters: Parameters,
        key: &str,
    ) -> GitHubResult<Value> {
        self.dispatcher
            .request(path, parameters, method, &RequestOptions::new())
            .await?
            .into_field(key)
    }
}

/// Builder for GitHubClient.
pub struct GitHubClientBuilder {
    options_builder: OptionsBuilder,
    transport: Option<Arc<dyn Transport>>,
    throttle: Option<Arc<RequestThrottle>>,
    throttle_config: Option<ThrottleConfig>,
    metrics: Option<Arc<Metrics>>,
}

impl GitHubClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            options_builder: Options::builder(),
            transport: None,
            throttle: None,
            throttle_config: None,
            metrics: None,
        }
    }

    /// Sets the URL scheme.
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.options_builder = self.options_builder.protocol(protocol);
        self
    }

    /// Sets the URL template.
    pub fn url_template(mut self, template: impl Into<String>) -> Self {
        self.options_builder = self.options_builder.url_template(template);
        self
    }

    /// Sets the response format.
    pub fn format(mut self, format: ResponseFormat) -> Self {
        self.options_builder = self.options_builder.format(format);
        self
    }

    /// Sets the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.options_builder = self.options_builder.user_agent(ua);
        self
    }

    /// Sets the port.
    pub fn port(mut self, port: u16) -> Self {
        self.options_builder = self.options_builder.port(port);
        self
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options_builder = self.options_builder.timeout(timeout);
        self
    }

    /// Sets the credentials.
    pub fn credentials(
        mut self,
        login: impl Into<String>,
        secret: impl Into<String>,
        method: AuthMethod,
    ) -> Self {
        self.options_builder = self.options_builder.credentials(login, secret, method);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Shares an existing throttle with other clients.
    pub fn throttle(mut self, throttle: Arc<RequestThrottle>) -> Self {
        self.throttle = Some(throttle);
        self
    }

    /// Configures a private throttle. Ignored when a shared throttle is set.
    pub fn throttle_config(mut self, config: ThrottleConfig) -> Self {
        self.throttle_config = Some(config);
        self
    }

    /// Shares a metrics collector.
    pub fn metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Builds the client.
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let options = self.options_builder.build()?;
        let mut builder = RequestDispatcher::builder().options(options);

        if let Some(transport) = self.transport {
            builder = builder.transport(transport);
        }
        match (self.throttle, self.throttle_config) {
            (Some(throttle), _) => builder = builder.throttle(throttle),
            (None, Some(config)) => {
                builder = builder.throttle(Arc::new(RequestThrottle::new(config)?))
            }
            (None, None) => {}
        }
        if let Some(metrics) = self.metrics {
            builder = builder.metrics(metrics);
        }

        Ok(GitHubClient::with_dispatcher(Arc::new(builder.build()?)))
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Configuration types for the GitHub client.

use crate::auth::AuthMethod;
use crate::errors::{GitHubError, GitHubResult};
use secrecy::SecretString;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default URL scheme.
pub const DEFAULT_PROTOCOL: &str = "https";

/// Default URL template; `:protocol`, `:format` and `:path` are substituted per call.
pub const DEFAULT_URL_TEMPLATE: &str = ":protocol://github.com/api/v2/:format/:path";

/// Default response format.
pub const DEFAULT_FORMAT: &str = "json";

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = "integrations-github-api/0.1.0";

/// Default port.
pub const DEFAULT_PORT: u16 = 443;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of requests tolerated inside the throttle window.
pub const DEFAULT_BURST_THRESHOLD: usize = 30;

/// Default throttle window.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(35);

/// Default pause once the burst threshold is hit inside the window.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(2);

/// How a response body is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Parse the body as JSON.
    Json,
    /// Return the body verbatim.
    Text,
}

impl ResponseFormat {
    /// Returns the option value naming this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(GitHubError::unsupported_format(other)),
        }
    }
}

/// A single named option and its value.
#[derive(Debug, Clone)]
pub enum ClientOption {
    /// URL scheme.
    Protocol(String),
    /// URL skeleton with placeholders.
    UrlTemplate(String),
    /// Response format name; validated when a request is dispatched.
    Format(String),
    /// User-Agent header.
    UserAgent(String),
    /// Port handed to the transport.
    Port(u16),
    /// Timeout handed to the transport.
    Timeout(Duration),
    /// GitHub username.
    Login(Option<String>),
    /// Token or password.
    Secret(Option<SecretString>),
    /// Credential attachment method.
    AuthMethod(Option<AuthMethod>),
}

impl ClientOption {
    /// Returns the key this option sets.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Protocol(_) => "protocol",
            Self::UrlTemplate(_) => "url_template",
            Self::Format(_) => "format",
            Self::UserAgent(_) => "user_agent",
            Self::Port(_) => "port",
            Self::Timeout(_) => "timeout",
            Self::Login(_) => "login",
            Self::Secret(_) => "secret",
            Self::AuthMethod(_) => "auth_method",
        }
    }

    /// Creates a secret option from a plain string.
    pub fn secret(value: impl Into<String>) -> Self {
        Self::Secret(Some(SecretString::new(value.into())))
    }
}

/// Options applied to a single call, on top of the dispatcher's base options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    overrides: Vec<ClientOption>,
}

impl RequestOptions {
    /// Creates an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override; later overrides of the same key win.
    pub fn with(mut self, option: ClientOption) -> Self {
        self.overrides.push(option);
        self
    }

    /// Overrides the response format.
    pub fn format(self, format: impl Into<String>) -> Self {
        self.with(ClientOption::Format(format.into()))
    }

    /// Overrides the URL scheme.
    pub fn protocol(self, protocol: impl Into<String>) -> Self {
        self.with(ClientOption::Protocol(protocol.into()))
    }

    /// Overrides the URL template.
    pub fn url_template(self, template: impl Into<String>) -> Self {
        self.with(ClientOption::UrlTemplate(template.into()))
    }

    /// Overrides the timeout.
    pub fn timeout(self, timeout: Duration) -> Self {
        self.with(ClientOption::Timeout(timeout))
    }

    /// Overrides the User-Agent.
    pub fn user_agent(self, ua: impl Into<String>) -> Self {
        self.with(ClientOption::UserAgent(ua.into()))
    }

    /// Returns true if nothing is overridden.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Iterates the overrides in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ClientOption> {
        self.overrides.iter()
    }
}

/// Dispatcher configuration.
#[derive(Debug, Clone)]
pub struct Options {
    /// URL scheme.
    pub protocol: String,
    /// URL skeleton with `:protocol`, `:format` and `:path` placeholders.
    pub url_template: String,
    /// Response format name.
    pub format: String,
    /// User-Agent header.
    pub user_agent: String,
    /// Port used when the URL does not carry one.
    pub port: u16,
    /// Request timeout.
    pub timeout: Duration,
    /// GitHub username.
    pub login: Option<String>,
    /// Token or password.
    pub secret: Option<SecretString>,
    /// Credential attachment method.
    pub auth_method: Option<AuthMethod>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            protocol: DEFAULT_PROTOCOL.to_string(),
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            login: None,
            secret: None,
            auth_method: None,
        }
    }
}

impl Options {
    /// Creates a new options builder.
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    /// Sets one option in place.
    pub fn apply(&mut self, option: ClientOption) {
        match option {
            ClientOption::Protocol(v) => self.protocol = v,
            ClientOption::UrlTemplate(v) => self.url_template = v,
            ClientOption::Format(v) => self.format = v,
            ClientOption::UserAgent(v) => self.user_agent = v,
            ClientOption::Port(v) => self.port = v,
            ClientOption::Timeout(v) => self.timeout = v,
            ClientOption::Login(v) => self.login = v,
            ClientOption::Secret(v) => self.secret = v,
            ClientOption::AuthMethod(v) => self.auth_method = v,
        }
    }

    /// Returns a copy with `overlay` applied key by key.
    pub fn overlay(&self, overlay: &RequestOptions) -> Options {
        let mut merged = self.clone();
        for option in overlay.iter() {
            merged.apply(option.clone());
        }
        merged
    }

    /// Parses the configured response format.
    pub fn response_format(&self) -> GitHubResult<ResponseFormat> {
        self.format.parse()
    }

    /// Returns true when login, secret and method are all set.
    pub fn is_authenticated(&self) -> bool {
        self.login.is_some() && self.secret.is_some() && self.auth_method.is_some()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> GitHubResult<()> {
        if self.protocol.is_empty() {
            return Err(GitHubError::configuration("Protocol cannot be empty"));
        }

        if !self.url_template.contains(":path") {
            return Err(GitHubError::configuration(
                "URL template must contain a :path placeholder",
            ));
        }

        if self.user_agent.is_empty() {
            return Err(GitHubError::configuration("User-Agent is required by GitHub API"));
        }

        if self.timeout.is_zero() {
            return Err(GitHubError::configuration("Timeout must be greater than zero"));
        }

        self.response_format()?;
        Ok(())
    }
}

/// Builder for Options.
#[derive(Debug, Default)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Creates a new builder seeded with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL scheme.
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.options.protocol = protocol.into();
        self
    }

    /// Sets the URL template.
    pub fn url_template(mut self, template: impl Into<String>) -> Self {
        self.options.url_template = template.into();
        self
    }

    /// Sets the response format.
    pub fn format(mut self, format: ResponseFormat) -> Self {
        self.options.format = format.as_str().to_string();
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.options.user_agent = ua.into();
        self
    }

    /// Sets the port.
    pub fn port(mut self, port: u16) -> Self {
        self.options.port = port;
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Sets the credentials.
    pub fn credentials(
        mut self,
        login: impl Into<String>,
        secret: impl Into<String>,
        method: AuthMethod,
    ) -> Self {
        self.options.login = Some(login.into());
        self.options.secret = Some(SecretString::new(secret.into()));
        self.options.auth_method = Some(method);
        self
    }

    /// Builds the options.
    pub fn build(self) -> GitHubResult<Options> {
        self.options.validate()?;
        Ok(self.options)
    }
}

/// Client-side burst limiter configuration.
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    /// Number of recorded requests that triggers the window check.
    pub threshold: usize,
    /// Rolling window the oldest request is compared against.
    pub window: Duration,
    /// Pause applied when the oldest request is inside the window.
    pub cooldown: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_BURST_THRESHOLD,
            window: DEFAULT_WINDOW,
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

impl ThrottleConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> GitHubResult<()> {
        if self.threshold == 0 {
            return Err(GitHubError::configuration(
                "Throttle threshold must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GitHubErrorKind;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.protocol, "https");
        assert_eq!(options.url_template, DEFAULT_URL_TEMPLATE);
        assert_eq!(options.format, "json");
        assert_eq!(options.port, 443);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert!(!options.is_authenticated());
    }

    #[test]
    fn test_options_builder() {
        let options = Options::builder()
            .user_agent("test-client/1.0")
            .format(ResponseFormat::Text)
            .timeout(Duration::from_secs(60))
            .credentials("octocat", "s3cret", AuthMethod::HttpPassword)
            .build()
            .unwrap();

        assert_eq!(options.user_agent, "test-client/1.0");
        assert_eq!(options.format, "text");
        assert_eq!(options.timeout, Duration::from_secs(60));
        assert_eq!(options.secret.as_ref().unwrap().expose_secret(), "s3cret");
        assert!(options.is_authenticated());
    }

    #[test]
    fn test_template_without_path_is_rejected() {
        let result = Options::builder().url_template("https://github.com/api").build();
        assert_eq!(*result.unwrap_err().kind(), GitHubErrorKind::InvalidConfiguration);
    }

    #[test]
    fn test_overlay_wins_and_falls_back() {
        let base = Options::default();
        let overlay = RequestOptions::new()
            .format("text")
            .timeout(Duration::from_secs(3));

        let merged = base.overlay(&overlay);
        assert_eq!(merged.format, "text");
        assert_eq!(merged.timeout, Duration::from_secs(3));
        assert_eq!(merged.protocol, base.protocol);
        assert_eq!(merged.user_agent, base.user_agent);
        assert_eq!(base.format, "json");
    }

    #[test]
    fn test_later_override_wins() {
        let overlay = RequestOptions::new().format("text").format("json");
        assert_eq!(Options::default().overlay(&overlay).format, "json");
    }

    #[test]
    fn test_unsupported_format() {
        let options = Options::default().overlay(&RequestOptions::new().format("xml"));
        let error = options.response_format().unwrap_err();
        assert_eq!(*error.kind(), GitHubErrorKind::UnsupportedFormat);
    }

    #[test]
    fn test_option_names() {
        assert_eq!(ClientOption::Format("json".into()).name(), "format");
        assert_eq!(ClientOption::secret("x").name(), "secret");
        assert_eq!(ClientOption::AuthMethod(None).name(), "auth_method");
    }

    #[test]
    fn test_zero_threshold_is_rejected() {
        let config = ThrottleConfig {
            threshold: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(ThrottleConfig::default().validate().is_ok());
    }
}

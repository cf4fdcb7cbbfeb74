//! Error types for the GitHub client.

use std::fmt;
use thiserror::Error;

/// Result type alias for GitHub operations.
pub type GitHubResult<T> = Result<T, GitHubError>;

/// Broad category an error kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The request could not be built from the configuration.
    Configuration,
    /// The transport failed to deliver the request or the server refused it.
    Transport,
    /// The response body could not be decoded.
    Decode,
}

/// Error kinds for categorizing GitHub errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubErrorKind {
    // Configuration errors
    /// Response format is neither json nor text.
    UnsupportedFormat,
    /// Invalid configuration.
    InvalidConfiguration,

    // Transport errors
    /// Connection or protocol failure.
    Network,
    /// Request timeout.
    Timeout,
    /// Server answered with a non-2xx status.
    HttpStatus,

    // Response errors
    /// Malformed response body.
    Decode,
}

impl GitHubErrorKind {
    /// Returns the category of this kind.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedFormat | Self::InvalidConfiguration => ErrorCategory::Configuration,
            Self::Network | Self::Timeout | Self::HttpStatus => ErrorCategory::Transport,
            Self::Decode => ErrorCategory::Decode,
        }
    }
}

impl fmt::Display for GitHubErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat => write!(f, "unsupported_format"),
            Self::InvalidConfiguration => write!(f, "invalid_configuration"),
            Self::Network => write!(f, "network"),
            Self::Timeout => write!(f, "timeout"),
            Self::HttpStatus => write!(f, "http_status"),
            Self::Decode => write!(f, "decode"),
        }
    }
}

/// GitHub API error with detailed information.
#[derive(Error, Debug)]
pub struct GitHubError {
    /// Error kind.
    kind: GitHubErrorKind,
    /// Error message.
    message: String,
    /// HTTP status code.
    status_code: Option<u16>,
    /// Underlying cause.
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for GitHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(code) = self.status_code {
            write!(f, " (HTTP {})", code)?;
        }
        Ok(())
    }
}

impl GitHubError {
    /// Creates a new GitHub error.
    pub fn new(kind: GitHubErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            cause: None,
        }
    }

    /// Sets the HTTP status code.
    pub fn with_status(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Sets the underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> &GitHubErrorKind {
        &self.kind
    }

    /// Gets the error category.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Gets the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Returns true for configuration errors.
    pub fn is_configuration(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }

    /// Returns true for transport errors.
    pub fn is_transport(&self) -> bool {
        self.category() == ErrorCategory::Transport
    }

    /// Returns true for decode errors.
    pub fn is_decode(&self) -> bool {
        self.category() == ErrorCategory::Decode
    }

    /// Returns true if the transport gave up waiting.
    pub fn is_timeout(&self) -> bool {
        self.kind == GitHubErrorKind::Timeout
    }

    /// Returns true if a caller may reasonably retry.
    ///
    /// The dispatcher never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            GitHubErrorKind::Network | GitHubErrorKind::Timeout => true,
            GitHubErrorKind::HttpStatus => {
                matches!(self.status_code, Some(429) | Some(500..=599))
            }
            _ => false,
        }
    }

    // Convenience constructors

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::InvalidConfiguration, message)
    }

    /// Creates an unsupported format error naming the offending format.
    pub fn unsupported_format(format: &str) -> Self {
        Self::new(
            GitHubErrorKind::UnsupportedFormat,
            format!("only json & text formats are supported, {} given", format),
        )
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::Network, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::Timeout, message)
    }

    /// Creates an error for a non-2xx response.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::HttpStatus, message).with_status(status)
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::Decode, message)
    }
}

impl From<reqwest::Error> for GitHubError {
    fn from(e: reqwest::Error) -> Self {
        let error = if e.is_timeout() {
            GitHubError::timeout(format!("Request timed out: {}", e))
        } else if let Some(status) = e.status() {
            GitHubError::http_status(status.as_u16(), format!("Request failed: {}", e))
        } else {
            GitHubError::network(format!("Request failed: {}", e))
        };
        error.with_cause(e)
    }
}

//! Authentication mechanisms for the GitHub v2 API.

use crate::errors::GitHubError;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::str::FromStr;

/// How credentials are attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// Login and token sent as request parameters.
    #[default]
    UrlToken,
    /// Login and password via HTTP basic authentication.
    HttpPassword,
    /// Login and token via HTTP basic authentication (`login/token`).
    HttpToken,
}

impl AuthMethod {
    /// Returns the option value naming this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UrlToken => "url_token",
            Self::HttpPassword => "http_password",
            Self::HttpToken => "http_token",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url_token" => Ok(Self::UrlToken),
            "http_password" => Ok(Self::HttpPassword),
            "http_token" => Ok(Self::HttpToken),
            other => Err(GitHubError::configuration(format!(
                "unknown auth method: {}",
                other
            ))),
        }
    }
}

/// Resolved credentials for one request.
///
/// Only built when login, secret and method are all present.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// GitHub username.
    pub login: String,
    /// Token or password.
    pub secret: SecretString,
    /// Attachment method.
    pub method: AuthMethod,
}

/// Where the transport has to put the credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPlacement {
    /// Extra request parameters.
    Parameters(Vec<(String, String)>),
    /// HTTP basic authentication.
    Basic {
        /// Basic auth user name.
        username: String,
        /// Basic auth password.
        password: String,
    },
}

impl Credentials {
    /// Builds credentials from optional parts.
    pub fn resolve(
        login: Option<&str>,
        secret: Option<&SecretString>,
        method: Option<AuthMethod>,
    ) -> Option<Self> {
        Some(Self {
            login: login?.to_string(),
            secret: secret?.clone(),
            method: method?,
        })
    }

    /// Describes how the transport must attach these credentials.
    pub fn placement(&self) -> AuthPlacement {
        let secret = self.secret.expose_secret().to_string();
        match self.method {
            AuthMethod::UrlToken => AuthPlacement::Parameters(vec![
                ("login".to_string(), self.login.clone()),
                ("token".to_string(), secret),
            ]),
            AuthMethod::HttpPassword => AuthPlacement::Basic {
                username: self.login.clone(),
                password: secret,
            },
            AuthMethod::HttpToken => AuthPlacement::Basic {
                username: format!("{}/token", self.login),
                password: secret,
            },
        }
    }
}

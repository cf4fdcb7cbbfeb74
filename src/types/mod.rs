//! Decoded response values.

use crate::errors::{GitHubError, GitHubResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A decoded response body, fully owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedResponse {
    /// Body parsed as JSON.
    Json(Value),
    /// Body returned verbatim.
    Text(String),
}

impl DecodedResponse {
    /// Returns the JSON value, if this is a JSON response.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Returns the raw text, if this is a text response.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Consumes the response, returning the JSON value.
    pub fn into_json(self) -> GitHubResult<Value> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Text(_) => Err(GitHubError::decode("expected a JSON response, got text")),
        }
    }

    /// Consumes the response, returning the raw text.
    pub fn into_text(self) -> GitHubResult<String> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Json(_) => Err(GitHubError::decode("expected a text response, got JSON")),
        }
    }

    /// Consumes the response, returning one top-level field of a JSON object.
    ///
    /// The v2 API wraps every payload in a single named key
    /// (`{"user": {...}}`, `{"issues": [...]}`).
    pub fn into_field(self, key: &str) -> GitHubResult<Value> {
        match self.into_json()? {
            Value::Object(mut map) => map
                .remove(key)
                .ok_or_else(|| GitHubError::decode(format!("response has no `{}` field", key))),
            _ => Err(GitHubError::decode(format!(
                "expected a JSON object holding `{}`",
                key
            ))),
        }
    }

    /// Deserializes the JSON value into `T`.
    pub fn deserialize<T: DeserializeOwned>(self) -> GitHubResult<T> {
        let value = self.into_json()?;
        serde_json::from_value(value).map_err(|e| {
            GitHubError::decode(format!("Failed to deserialize response: {}", e)).with_cause(e)
        })
    }
}

//! Resource facades over the GitHub v2 API.
//!
//! Each facade borrows a [`GitHubClient`](crate::client::GitHubClient),
//! prefixes paths with its resource segment and unwraps the named field the
//! v2 API wraps every payload in.

mod commits;
mod issues;
mod objects;
mod organizations;
mod pull_requests;
mod repositories;
mod users;

pub use commits::*;
pub use issues::*;
pub use objects::*;
pub use organizations::*;
pub use pull_requests::*;
pub use repositories::*;
pub use users::*;

use crate::transport::Parameters;
use serde_json::Value;

/// Builds a parameter map from key/value pairs.
pub(crate) fn params<const N: usize>(pairs: [(&str, Value); N]) -> Parameters {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Encodes a free-text search term for use as a path segment.
pub(crate) fn encode_term(term: &str) -> String {
    url::form_urlencoded::byte_serialize(term.as_bytes()).collect()
}

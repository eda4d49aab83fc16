//! Wire types for VK method responses.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use vkgraph_core::{FetchError, FetchResult};

/// Top-level body: exactly one of `response` or `error` is expected.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub response: Option<T>,
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error_code: i64,
    #[serde(default)]
    pub error_msg: String,
}

/// Payload of `users.getFollowers`.
#[derive(Debug, Deserialize)]
pub(crate) struct FollowersPage {
    pub items: Vec<i64>,
}

/// Minimal user shape used for handle lookup.
#[derive(Debug, Deserialize)]
pub(crate) struct UserRef {
    pub id: i64,
}

/// Decode a raw body into the `response` payload or a typed failure.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> FetchResult<T> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|_| FetchError::malformed(body))?;

    if let Some(err) = envelope.error {
        return Err(FetchError::Api {
            code: err.error_code,
            message: err.error_msg,
        });
    }

    envelope.response.ok_or_else(|| FetchError::malformed(body))
}

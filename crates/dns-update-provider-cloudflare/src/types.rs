//! Cloudflare API v4 response schema

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Response envelope shared by every Cloudflare endpoint
///
/// `result` is kept raw until the envelope has been checked, so that an
/// empty result can be told apart from a result of the wrong shape.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<ApiError>,
}

/// One entry of the envelope's `errors` list
#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_chain: Vec<ChainedError>,
}

/// Nested cause of an [`ApiError`]
#[derive(Debug, Deserialize)]
pub(crate) struct ChainedError {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Zone list entry; only the id is used
#[derive(Debug, Deserialize)]
pub(crate) struct Zone {
    pub id: String,
}

impl Envelope {
    /// Message of the first reported error
    ///
    /// Prefers the first chained message over the top-level one.
    pub fn first_error_message(&self) -> String {
        self.errors
            .first()
            .map(|e| match e.error_chain.first() {
                Some(chained) => chained.message.clone(),
                None => e.message.clone(),
            })
            .unwrap_or_else(|| "Unknown error".to_string())
    }

    /// Take the result if it carries anything
    ///
    /// Missing, null, `false`, `""` and `[]` all count as empty.
    pub fn into_result(self) -> Option<Value> {
        match self.result? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Array(items) if items.is_empty() => None,
            value => Some(value),
        }
    }
}

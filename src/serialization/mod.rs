//! JSON serialization for directory documents.
//!
//! Every payload written to the directory is a UTF-8 encoded JSON document:
//! - the Index is a JSON array of proposal ids
//! - each proposal is a JSON object under its own key
//!
//! Schema evolution relies on `#[serde(default)]` so older records without a
//! field still parse.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Serialization errors.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// JSON encoding failed.
    #[error("JSON encoding failed: {0}")]
    Encode(String),

    /// JSON decoding failed.
    #[error("JSON decoding failed: {0}")]
    Decode(String),
}

/// Serialize to UTF-8 JSON bytes.
pub fn to_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    serde_json::to_vec(value).map_err(|e| SerializationError::Encode(e.to_string()))
}

/// Deserialize from UTF-8 JSON bytes.
///
/// Bytes that are not valid UTF-8 are rejected before JSON parsing so the
/// error names the real problem.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| SerializationError::Decode(format!("payload is not UTF-8: {}", e)))?;
    serde_json::from_str(text).map_err(|e| SerializationError::Decode(e.to_string()))
}

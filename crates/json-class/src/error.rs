//! Error type for the fallible edges of the mapper.
//!
//! The mapping engine itself never fails; only decoding JSON text and
//! loading option documents can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonClassError {
    #[error("invalid JSON text: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("invalid options document: {0}")]
    Config(#[source] serde_json::Error),
}

/// Decodes JSON text into a tree.
pub fn decode_tree(text: &str) -> Result<serde_json::Value, JsonClassError> {
    serde_json::from_str(text).map_err(JsonClassError::Decode)
}

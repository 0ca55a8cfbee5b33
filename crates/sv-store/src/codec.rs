//! # Versioned Column Codec
//!
//! Collection-valued columns are stored as a JSON envelope
//! `{"v":1,"data":<collection>}`. The version field lets a future schema
//! change re-interpret old rows without guessing; the decode path is
//! plain serde and can never execute anything from stored text.
//!
//! Decode rules:
//! - NULL or empty/whitespace text decodes to the collection's default.
//! - Non-empty text that is not a well-formed envelope is a hard error,
//!   never silently treated as empty.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current envelope version.
pub const CODEC_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    v: u32,
    data: T,
}

/// Codec failure detail, mapped to `StoreError::CorruptState` by callers
/// that know which (table, column, row) was being decoded.
#[derive(Debug, Clone, Error)]
pub enum CodecError {
    /// Text is not a well-formed envelope.
    #[error("malformed envelope: {0}")]
    Malformed(String),

    /// Envelope version is newer than this build understands.
    #[error("unsupported envelope version {found}, supported {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Collection value failed to serialize (should not happen for the
    /// plain value types used here).
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Encode a collection value into its column representation.
pub fn encode<T: Serialize>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string(&Envelope {
        v: CODEC_VERSION,
        data: value,
    })
    .map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode a column value. `None` and empty text yield the default.
pub fn decode<T: DeserializeOwned + Default>(raw: Option<&str>) -> Result<T, CodecError> {
    let text = match raw {
        None => return Ok(T::default()),
        Some(t) if t.trim().is_empty() => return Ok(T::default()),
        Some(t) => t,
    };

    let envelope: Envelope<T> =
        serde_json::from_str(text).map_err(|e| CodecError::Malformed(e.to_string()))?;

    if envelope.v != CODEC_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: envelope.v,
            supported: CODEC_VERSION,
        });
    }

    Ok(envelope.data)
}

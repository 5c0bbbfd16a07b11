//! Inline image payloads for analysis requests.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// An image carried inline in an analysis request: base64-encoded bytes
/// plus their declared MIME type.
///
/// The upload flow hands over images as base64 (that is how a browser's
/// file reader delivers them), so [`from_base64`](Self::from_base64) is the
/// common path; [`from_bytes`](Self::from_bytes) encodes for callers that
/// hold raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Base64-encoded image bytes (standard alphabet, padded).
    pub data: String,
    /// Declared MIME type, e.g. `image/jpeg`.
    pub mime_type: String,
}

impl ImagePayload {
    /// Build a payload by base64-encoding raw image bytes.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Build a payload from already-encoded base64 data.
    pub fn from_base64(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Convenience for the common wire contract: base64 data declared as
    /// `image/jpeg`.
    pub fn jpeg_from_base64(data: impl Into<String>) -> Self {
        Self::from_base64(data, "image/jpeg")
    }

    /// True when the payload carries no image data. Empty payloads are
    /// rejected by clients before any network request is made.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

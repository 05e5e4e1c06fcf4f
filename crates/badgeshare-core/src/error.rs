//! Error types for `badgeshare-core`.

use badgeshare_storage::StorageError;

/// Errors from the configuration record store.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The underlying storage backend returned an error.
    #[error("record storage error: {0}")]
    Storage(#[from] StorageError),

    /// The record could not be serialized for storage.
    #[error("failed to encode record '{key}': {reason}")]
    Encode { key: String, reason: String },

    /// A stored value exists but is not a valid record.
    #[error("stored record '{key}' is unreadable: {reason}")]
    Decode { key: String, reason: String },
}

/// Errors from decoding a stateless-link payload.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The payload is not valid base64.
    #[error("payload is not valid base64: {reason}")]
    Base64 { reason: String },

    /// The decoded bytes are not valid UTF-8 text.
    #[error("payload is not valid UTF-8: {reason}")]
    Utf8 { reason: String },
}

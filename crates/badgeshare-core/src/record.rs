//! Configuration records and their store.
//!
//! A record is written once under `badge_<id>` with a fixed 24-hour TTL and
//! never modified afterwards. Expiry is delegated to the storage backend: an
//! expired record reads back as `None`, the same as one that never existed.
//!
//! Records are stored as JSON:
//! `{"content": "...", "timestamp": 1760000000000, "created": "2026-10-18T12:00:00Z"}`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::debug;

use badgeshare_storage::StorageBackend;

use crate::error::RecordError;

/// Storage prefix for configuration records.
pub const RECORD_KEY_PREFIX: &str = "badge_";

/// How long a stored record stays readable.
pub const RECORD_TTL: Duration = Duration::from_secs(86_400);

/// A stored badge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    /// The configuration text.
    pub content: String,
    /// Caller-supplied timestamp, normally milliseconds since the Unix epoch.
    /// Any JSON number is kept as given.
    pub timestamp: Number,
    /// When the record was written.
    pub created: DateTime<Utc>,
}

/// Reads and writes [`ConfigRecord`]s through a storage backend.
pub struct RecordStore {
    backend: Arc<dyn StorageBackend>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore").finish_non_exhaustive()
    }
}

impl RecordStore {
    /// Create a record store on top of the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Storage key for a record identifier.
    #[must_use]
    pub fn key_for(id: &str) -> String {
        format!("{RECORD_KEY_PREFIX}{id}")
    }

    /// Write a record for `id`, replacing any existing one.
    ///
    /// `timestamp` defaults to the write time when absent or zero. Returns
    /// the record as stored.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Storage`] if the backend write fails.
    pub async fn save(
        &self,
        id: &str,
        content: &str,
        timestamp: Option<Number>,
    ) -> Result<ConfigRecord, RecordError> {
        let key = Self::key_for(id);
        let created = Utc::now();
        let record = ConfigRecord {
            content: content.to_owned(),
            timestamp: timestamp
                .filter(|ts| ts.as_f64() != Some(0.0))
                .unwrap_or_else(|| Number::from(created.timestamp_millis())),
            created,
        };

        let bytes = serde_json::to_vec(&record).map_err(|e| RecordError::Encode {
            key: key.clone(),
            reason: e.to_string(),
        })?;

        self.backend.put(&key, &bytes, Some(RECORD_TTL)).await?;
        debug!(key = %key, bytes = bytes.len(), "record written");
        Ok(record)
    }

    /// Read the record for `id`.
    ///
    /// Returns `Ok(None)` if no record exists or it has expired.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Storage`] if the backend read fails, or
    /// [`RecordError::Decode`] if the stored value is not a record.
    pub async fn load(&self, id: &str) -> Result<Option<ConfigRecord>, RecordError> {
        let key = Self::key_for(id);
        let Some(bytes) = self.backend.get(&key).await? else {
            return Ok(None);
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| RecordError::Decode {
                key,
                reason: e.to_string(),
            })
    }
}

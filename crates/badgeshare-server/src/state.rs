//! Shared application state for the `BadgeShare` server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. Handlers keep no state of their own between
//! requests; the record store is the only shared resource.

use std::sync::Arc;

use badgeshare_core::record::RecordStore;
use badgeshare_storage::StorageBackend;

/// Shared application state passed to all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// Configuration records with their fixed TTL.
    pub records: RecordStore,
}

impl AppState {
    /// Build state over the given storage backend.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            records: RecordStore::new(backend),
        }
    }
}

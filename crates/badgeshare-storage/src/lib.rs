//! Storage backend abstraction for `BadgeShare`.
//!
//! This crate defines the [`StorageBackend`] trait — a key-value interface
//! with optional per-key expiry. It knows nothing about badge records or
//! HTML; the record store in `badgeshare-core` serializes records and picks
//! the key namespace and TTL before anything reaches this layer.
//!
//! Two implementations are provided:
//!
//! - [`MemoryBackend`] — in-memory, honours TTLs; the default for local runs and tests
//! - [`RedisBackend`] — Redis / Vercel KV / Upstash (feature `redis-backend`)

use std::time::Duration;

mod error;
mod memory;
#[cfg(feature = "redis-backend")]
mod redis_backend;

pub use error::StorageError;
pub use memory::MemoryBackend;
#[cfg(feature = "redis-backend")]
pub use redis_backend::RedisBackend;

/// A pluggable key-value storage backend with expiring entries.
///
/// Keys are opaque UTF-8 strings. Values are opaque byte arrays. An entry
/// written with a TTL must be reported as absent by [`get`](Self::get) once
/// the TTL has elapsed, exactly as if it had never been written.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key does not exist or has expired.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying backend fails.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store a key-value pair, overwriting any existing value.
    ///
    /// With `ttl = Some(d)` the entry becomes unavailable `d` after the write.
    /// With `None` it never expires.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying backend fails.
    async fn put(&self, key: &str, value: &[u8], ttl: Option<Duration>)
    -> Result<(), StorageError>;

    /// Delete a key. Deleting a non-existent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Delete`] if the underlying backend fails.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

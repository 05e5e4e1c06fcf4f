//! In-memory storage backend.
//!
//! Stores all data in a `BTreeMap` behind a `RwLock`. Not persistent — all
//! data is lost when the process exits. Expiry uses [`tokio::time::Instant`],
//! so tests can drive it with a paused clock.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::{StorageBackend, StorageError};

#[derive(Debug, Clone)]
struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| now < deadline)
    }
}

/// An in-memory storage backend backed by a `BTreeMap`.
///
/// Expired entries are invisible to readers immediately and are pruned
/// lazily on the next write.
///
/// # Examples
///
/// ```
/// # use std::time::Duration;
/// # use badgeshare_storage::{MemoryBackend, StorageBackend};
/// # #[tokio::main]
/// # async fn main() {
/// let backend = MemoryBackend::new();
/// backend.put("badge_abc", b"data", Some(Duration::from_secs(60))).await.unwrap();
/// let val = backend.get("badge_abc").await.unwrap();
/// assert_eq!(val, Some(b"data".to_vec()));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    data: Arc<RwLock<BTreeMap<String, Entry>>>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let data = self.data.read().await;
        data.values().filter(|e| e.is_live(now)).count()
    }

    /// Whether there are no live entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let now = Instant::now();
        let data = self.data.read().await;
        Ok(data
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone()))
    }

    async fn put(
        &self,
        key: &str,
        value: &[u8],
        ttl: Option<Duration>,
    ) -> Result<(), StorageError> {
        let now = Instant::now();
        let expires_at = match ttl {
            Some(ttl) => Some(now.checked_add(ttl).ok_or_else(|| StorageError::Write {
                key: key.to_owned(),
                reason: format!("ttl of {}s overflows the clock", ttl.as_secs()),
            })?),
            None => None,
        };

        let mut data = self.data.write().await;
        data.retain(|_, e| e.is_live(now));
        data.insert(
            key.to_owned(),
            Entry {
                value: value.to_vec(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut data = self.data.write().await;
        data.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(86_400);

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let backend = MemoryBackend::new();
        let result = backend.get("does_not_exist").await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn put_and_get_roundtrip() {
        let backend = MemoryBackend::new();
        backend.put("badge_a", b"hello", None).await.unwrap();
        let val = backend.get("badge_a").await.unwrap();
        assert_eq!(val, Some(b"hello".to_vec()));
    }

    #[tokio::test]
    async fn put_overwrites_existing() {
        let backend = MemoryBackend::new();
        backend.put("key", b"v1", Some(DAY)).await.unwrap();
        backend.put("key", b"v2", Some(DAY)).await.unwrap();
        let val = backend.get("key").await.unwrap();
        assert_eq!(val, Some(b"v2".to_vec()));
    }

    #[tokio::test]
    async fn delete_existing_key() {
        let backend = MemoryBackend::new();
        backend.put("key", b"val", None).await.unwrap();
        backend.delete("key").await.unwrap();
        assert_eq!(backend.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_nonexistent_is_noop() {
        let backend = MemoryBackend::new();
        backend.delete("nope").await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn entry_visible_until_ttl_elapses() {
        let backend = MemoryBackend::new();
        backend.put("key", b"val", Some(DAY)).await.unwrap();

        tokio::time::advance(DAY - Duration::from_secs(1)).await;
        assert_eq!(backend.get("key").await.unwrap(), Some(b"val".to_vec()));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(backend.get("key").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_without_ttl_never_expires() {
        let backend = MemoryBackend::new();
        backend.put("key", b"val", None).await.unwrap();
        tokio::time::advance(DAY * 30).await;
        assert_eq!(backend.get("key").await.unwrap(), Some(b"val".to_vec()));
    }

    #[tokio::test(start_paused = true)]
    async fn rewrite_resets_expiry() {
        let backend = MemoryBackend::new();
        backend.put("key", b"v1", Some(DAY)).await.unwrap();
        tokio::time::advance(DAY / 2).await;
        backend.put("key", b"v2", Some(DAY)).await.unwrap();
        tokio::time::advance(DAY * 3 / 4).await;
        assert_eq!(backend.get("key").await.unwrap(), Some(b"v2".to_vec()));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entries_pruned_on_write() {
        let backend = MemoryBackend::new();
        backend.put("old", b"1", Some(Duration::from_secs(10))).await.unwrap();
        tokio::time::advance(Duration::from_secs(11)).await;
        backend.put("new", b"2", Some(DAY)).await.unwrap();

        assert_eq!(backend.len().await, 1);
        assert_eq!(backend.data.read().await.len(), 1);
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let backend = MemoryBackend::new();
        let clone = backend.clone();
        backend.put("key", b"val", None).await.unwrap();
        assert_eq!(clone.get("key").await.unwrap(), Some(b"val".to_vec()));
        assert!(!clone.is_empty().await);
    }
}

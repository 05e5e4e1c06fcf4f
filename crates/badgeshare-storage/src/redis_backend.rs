//! Redis storage backend.
//!
//! Talks to any Redis-protocol server, including Vercel KV and Upstash
//! (`rediss://` URLs work through the native-tls connector). Expiry is
//! delegated to the server via `SET ... EX`, so an expired key simply reads
//! back as nil.

use std::time::Duration;

use redis::aio::MultiplexedConnection;

use crate::{StorageBackend, StorageError};

/// A storage backend backed by a Redis server.
///
/// Holds a single multiplexed connection; clones of it share the underlying
/// socket, so one backend can serve every request task.
#[derive(Clone)]
pub struct RedisBackend {
    conn: MultiplexedConnection,
    url: String,
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("url", &redact(&self.url))
            .finish_non_exhaustive()
    }
}

impl RedisBackend {
    /// Connect to the Redis server at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Connect`] if the URL is invalid or the server
    /// is unreachable.
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(url).map_err(|e| StorageError::Connect {
            url: redact(url),
            reason: e.to_string(),
        })?;

        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StorageError::Connect {
                url: redact(url),
                reason: e.to_string(),
            })?;

        tracing::debug!(url = %redact(url), "connected to redis");

        Ok(Self {
            conn,
            url: url.to_owned(),
        })
    }
}

#[async_trait::async_trait]
impl StorageBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| StorageError::Read {
                key: key.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(value)
    }

    async fn put(
        &self,
        key: &str,
        value: &[u8],
        ttl: Option<Duration>,
    ) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl {
            // EX rejects 0; round sub-second TTLs up to one second.
            cmd.arg("EX").arg(ttl.as_secs().max(1));
        }

        let (): () = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| StorageError::Write {
                key: key.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        let _removed: i64 = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| StorageError::Delete {
                key: key.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

/// Strip credentials from a connection URL before it reaches logs or errors.
fn redact(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_owned();
    };
    match rest.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://[redacted]@{host}"),
        None => url.to_owned(),
    }
}

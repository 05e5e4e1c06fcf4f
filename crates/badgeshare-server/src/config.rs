//! Server configuration for `BadgeShare`.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `BADGESHARE_*` environment variables.

use std::net::SocketAddr;

/// Default bind port.
const DEFAULT_PORT: u16 = 3000;

/// Default Redis URL when `redis` storage is selected without a URL.
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Storage backend type.
    pub storage_backend: StorageBackendType,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
}

/// Supported storage backend types.
#[derive(Clone, PartialEq, Eq)]
pub enum StorageBackendType {
    /// In-memory (data lost on restart).
    Memory,
    /// Redis-protocol server (Redis, Vercel KV, Upstash).
    Redis { url: String },
}

impl std::fmt::Debug for StorageBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => f.write_str("Memory"),
            // URLs for hosted KV stores carry the access token.
            Self::Redis { .. } => f.debug_struct("Redis").finish_non_exhaustive(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `BADGESHARE_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `BADGESHARE_STORAGE` — `memory` or `redis` (default: `memory`)
    /// - `KV_URL` / `REDIS_URL` — Redis connection string (first one set wins)
    /// - `BADGESHARE_LOG_LEVEL` — log filter (default: `info`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Priority: BADGESHARE_BIND_ADDR > PORT > default 127.0.0.1:3000
        let bind_addr = if let Some(addr) = lookup("BADGESHARE_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)))
        } else if let Some(port_str) = lookup("PORT") {
            let port: u16 = port_str.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT))
        };

        let storage_backend = match lookup("BADGESHARE_STORAGE")
            .unwrap_or_else(|| "memory".to_owned())
            .to_lowercase()
            .as_str()
        {
            "redis" | "kv" => {
                let url = lookup("KV_URL")
                    .or_else(|| lookup("REDIS_URL"))
                    .unwrap_or_else(|| DEFAULT_REDIS_URL.to_owned());
                StorageBackendType::Redis { url }
            }
            _ => StorageBackendType::Memory,
        };

        let log_level = lookup("BADGESHARE_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        Self {
            bind_addr,
            storage_backend,
            log_level,
        }
    }
}

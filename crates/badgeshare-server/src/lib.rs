//! `BadgeShare` HTTP server.
//!
//! Wires the record store and storage backend into an Axum router serving
//! the save API and the two configuration page routes.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

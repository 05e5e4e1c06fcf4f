//! Core library for `BadgeShare`.
//!
//! Holds the configuration record model and its TTL-bound store, badge
//! counting, base64 payload handling for stateless links, and the HTML page
//! template shared by both rendering paths. Depends on `badgeshare-storage`
//! for the backend trait and knows nothing about HTTP.

pub mod badge;
pub mod error;
pub mod links;
pub mod page;
pub mod payload;
pub mod record;

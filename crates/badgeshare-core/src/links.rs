//! Route paths and share-link construction.
//!
//! The server mounts its handlers at these paths and the CLI builds links
//! against them, so both sides agree on the URL layout.

use crate::payload::encode_payload;

/// Route that stores a configuration.
pub const SAVE_ROUTE: &str = "/api/save";

/// Route prefix that renders a stored configuration; the id follows.
pub const STORED_ROUTE_PREFIX: &str = "/api/badge-config";

/// Route that renders a configuration carried in the `data` query parameter.
pub const INLINE_ROUTE: &str = "/api/simple";

/// Link to the rendered page of a stored configuration.
pub fn stored_link(base_url: &str, id: &str) -> String {
    format!(
        "{}{STORED_ROUTE_PREFIX}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}

/// Link that carries `content` itself, with nothing stored server-side.
pub fn inline_link(base_url: &str, content: &str) -> String {
    format!(
        "{}{INLINE_ROUTE}?data={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(&encode_payload(content))
    )
}

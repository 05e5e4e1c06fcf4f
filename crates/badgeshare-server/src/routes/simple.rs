//! Stateless configuration page: `GET /api/simple?data=<base64>`.
//!
//! The whole configuration travels in the `data` parameter; nothing is
//! read from or written to the store.

use std::sync::Arc;

use axum::extract::Query;
use axum::http::{Method, header};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use badgeshare_core::links::INLINE_ROUTE;
use badgeshare_core::page::ConfigPage;
use badgeshare_core::payload::decode_payload;

use crate::error::PageError;
use crate::state::AppState;

/// Build the stateless-page router.
pub fn router() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            INLINE_ROUTE,
            get(show_inline_config).post(show_inline_config),
        )
        .layer(cors)
}

/// Query parameters of the stateless page.
#[derive(Debug, Deserialize)]
pub struct InlineParams {
    pub data: Option<String>,
}

async fn show_inline_config(
    Query(params): Query<InlineParams>,
) -> Result<Html<String>, PageError> {
    let data = params
        .data
        .filter(|d| !d.is_empty())
        .ok_or(PageError::NoData)?;
    let content = decode_payload(&data)?;

    Ok(Html(ConfigPage::inline(&content).render()))
}

//! Stored configuration page: `GET /api/badge-config/{id}`.
//!
//! A missing or expired record is a normal outcome and renders the
//! "Configuration Not Found" page with a 404.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::debug;

use badgeshare_core::links::STORED_ROUTE_PREFIX;
use badgeshare_core::page::{ConfigPage, render_not_found_page};

use crate::error::PageError;
use crate::state::AppState;

/// Build the stored-page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(&format!("{STORED_ROUTE_PREFIX}/{{id}}"), get(show_config))
}

async fn show_config(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, PageError> {
    let Some(record) = state.records.load(&id).await? else {
        debug!(id = %id, "configuration not found or expired");
        return Ok((StatusCode::NOT_FOUND, Html(render_not_found_page())).into_response());
    };

    Ok(Html(ConfigPage::stored(&id, &record).render()).into_response())
}

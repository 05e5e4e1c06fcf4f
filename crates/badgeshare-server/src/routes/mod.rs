//! HTTP route handlers for the `BadgeShare` server.

pub mod badge_config;
pub mod health;
pub mod save;
pub mod simple;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, header};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
///
/// CORS is applied per route group: only the save API and the stateless
/// page advertise `Access-Control-Allow-Origin: *`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(save::router())
        .merge(badge_config::router())
        .merge(simple::router())
        .merge(health::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                )),
        )
        .with_state(state)
}

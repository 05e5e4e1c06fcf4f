//! Save route: `POST /api/save`.
//!
//! Stores a badge configuration under its caller-chosen id for 24 hours.
//! The request body is validated here, before anything touches the store.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{Method, header};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use badgeshare_core::badge::count_badges;
use badgeshare_core::links::SAVE_ROUTE;

use crate::error::AppError;
use crate::state::AppState;

/// Writes allowed to reach the store at once; later ones wait for a slot.
pub const SAVE_CONCURRENCY_LIMIT: usize = 64;

/// Build the save router.
///
/// The CORS layer answers every `OPTIONS` request itself with an empty 200,
/// so the method router only sees `POST` and the methods it rejects with a
/// JSON 405.
pub fn router() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            SAVE_ROUTE,
            post(save_config).fallback(method_not_allowed),
        )
        // Global variant: axum layers each method endpoint separately and
        // the slots must be shared between them.
        .layer(GlobalConcurrencyLimitLayer::new(SAVE_CONCURRENCY_LIMIT))
        .layer(cors)
}

// ── Request / response types ─────────────────────────────────────────

/// Body of a save request.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub id: Option<String>,
    pub content: Option<String>,
    /// Any JSON number, normally milliseconds since the Unix epoch;
    /// defaults to the write time.
    pub timestamp: Option<Number>,
}

/// A save request that passed validation.
#[derive(Debug)]
struct ValidSave {
    id: String,
    content: String,
    timestamp: Option<Number>,
}

impl SaveRequest {
    /// Require a non-empty `id` and `content`, naming every one that is missing.
    fn validate(self) -> Result<ValidSave, AppError> {
        let id = self.id.filter(|s| !s.is_empty());
        let content = self.content.filter(|s| !s.is_empty());

        match (id, content) {
            (Some(id), Some(content)) => Ok(ValidSave {
                id,
                content,
                timestamp: self.timestamp,
            }),
            (id, content) => {
                let missing: Vec<&str> = [("id", id.is_none()), ("content", content.is_none())]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                Err(AppError::BadRequest(format!(
                    "missing required fields: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
}

// ── Handlers ─────────────────────────────────────────────────────────

async fn save_config(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, AppError> {
    let Json(request) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let save = request.validate()?;

    state
        .records
        .save(&save.id, &save.content, save.timestamp)
        .await?;

    info!(
        id = %save.id,
        bytes = save.content.len(),
        badges = count_badges(&save.content),
        "badge configuration saved"
    );

    Ok(Json(SaveResponse { success: true }))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

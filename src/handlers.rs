use crate::client::LookupClient;
use crate::counter::{self, VisitCounter};
use crate::errors::AppError;
use crate::models::LookupOutcome;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client for the upstream lookup API.
    pub lookup_client: LookupClient,
    /// Visit counter, bumped on every successful search.
    pub visit_counter: Arc<dyn VisitCounter>,
}

/// Query string of the lookup endpoint.
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub mobile: String,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "sim-lookup-api",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// GET /api/v1/lookup?mobile=...
///
/// Runs one search and answers with the normalized outcome. The HTTP status
/// mirrors the failure kind; the body always carries the outcome.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `params` - Query parameters holding the mobile number. A missing number is blank input.
pub async fn lookup(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupParams>,
) -> (StatusCode, Json<LookupOutcome>) {
    let outcome = state.lookup_client.search(&params.mobile).await;

    let status = match outcome.error() {
        None => {
            // A broken counter must not hide a successful search
            if let Err(e) = state.visit_counter.increment().await {
                tracing::error!("Failed to record visit: {}", e);
            }
            StatusCode::OK
        }
        Some(e) => e.status_code(),
    };

    (status, Json(outcome))
}

/// GET /api/v1/stats
///
/// Visit total and the simulated active-users figure.
pub async fn stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let visits = state.visit_counter.get().await?;

    Ok(Json(json!({
        "visits": visits,
        "active_users": counter::active_users(),
    })))
}

//! SIM Lookup API Library
//!
//! Looks up a mobile number against a third-party SIM database API and normalizes
//! the inconsistent payloads it returns into uniform person records.
//!
//! # Modules
//!
//! - `client`: Upstream lookup client.
//! - `config`: Configuration management.
//! - `counter`: Visit counter and active-users figure.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Normalized records, outcomes and upstream payload shapes.
//! - `normalizer`: Payload shape detection and normalization.
//! - `phone`: Mobile number canonicalization.

pub mod client;
pub mod config;
pub mod counter;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod phone;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the HTTP router around shared state.
pub fn app(state: Arc<handlers::AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/lookup", get(handlers::lookup))
        .route("/api/v1/stats", get(handlers::stats))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

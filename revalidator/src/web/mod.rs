//! Web server module for the content backend webhook.
//!
//! This module provides a small web server that:
//! - Receives entry change notifications from the content backend
//! - Verifies the HMAC signature over the raw body
//! - Marks the affected pages (and the home page) as stale
//!
//! Page rendering itself happens elsewhere.

pub mod error;
pub mod handlers;
pub mod signature;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use error::WebhookError;
pub use handlers::{health, revalidate_webhook, AppState, HealthResponse, RevalidateResponse};
pub use signature::{compute_signature, verify_signature, SignatureError};

/// Path the content backend is configured to call.
pub const REVALIDATE_ROUTE: &str = "/api/revalidate";

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health))
        .route(REVALIDATE_ROUTE, post(revalidate_webhook))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Webhook endpoint handlers.
//!
//! The revalidation handler runs strictly in order and short-circuits on
//! the first failure:
//! 1. Require a configured secret
//! 2. Verify the signature over the raw body
//! 3. Parse the payload
//! 4. Resolve the page path and invalidate it (plus the home page)

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::{revalidate_target, PageRevalidator};
use crate::content::{RevalidationTarget, WebhookPayload};
use crate::web::error::WebhookError;
use crate::web::signature::{verify_signature, SignatureError};
use crate::Config;

/// Longest raw body prefix written to development diagnostics.
const BODY_PREVIEW_LIMIT: usize = 512;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub revalidator: Arc<dyn PageRevalidator>,
}

impl AppState {
    pub fn new(config: Config, revalidator: Arc<dyn PageRevalidator>) -> Self {
        Self {
            config: Arc::new(config),
            revalidator,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Revalidation Webhook
// =============================================================================

/// Response body for both success and failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct RevalidateResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revalidated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Content backend change notification endpoint.
///
/// The body is taken as raw bytes because the signature covers the exact
/// bytes sent, not a re-serialization.
pub async fn revalidate_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RevalidateResponse>, WebhookError> {
    let config = &state.config;
    let secret = config.webhook_secret();

    info!(
        body_length = body.len(),
        has_signature = headers.contains_key(config.signature_header.as_str()),
        "revalidate_webhook_received"
    );

    if config.diagnostics {
        debug!(
            body_length = body.len(),
            secret_configured = secret.is_some(),
            signature_header = %config.signature_header,
            "revalidate_diagnostics_request"
        );
        if config.may_log_raw_body() {
            let preview_len = body.len().min(BODY_PREVIEW_LIMIT);
            debug!(
                body_preview = %String::from_utf8_lossy(&body[..preview_len]),
                truncated = body.len() > preview_len,
                "revalidate_diagnostics_body"
            );
        }
    }

    let secret = secret.ok_or(WebhookError::SecretNotConfigured)?;

    let signature = headers
        .get(config.signature_header.as_str())
        .ok_or(WebhookError::MissingSignature)?
        .to_str()
        .map_err(|_| WebhookError::InvalidSignature(SignatureError::Malformed))?;

    verify_signature(secret, &body, signature).map_err(WebhookError::InvalidSignature)?;

    let payload = WebhookPayload::from_slice(&body).map_err(WebhookError::MalformedPayload)?;

    let content_type = payload.content_type_id();
    let slug = payload.slug(&config.default_locale);

    if config.diagnostics {
        debug!(
            content_type = ?content_type,
            locale = %payload.locale_or(&config.default_locale),
            slug = ?slug,
            "revalidate_diagnostics_payload"
        );
    }

    let target = RevalidationTarget::resolve(content_type, slug);

    let invalidated = revalidate_target(state.revalidator.as_ref(), &target)
        .await
        .map_err(WebhookError::Revalidation)?;

    info!(
        content_type = ?content_type,
        path = %target,
        invalidated = ?invalidated,
        "revalidate_complete"
    );

    Ok(Json(RevalidateResponse {
        message: "Revalidation successful".to_string(),
        revalidated: Some(target.path),
        error: None,
    }))
}

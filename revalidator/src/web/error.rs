//! Terminal webhook failures and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use super::handlers::RevalidateResponse;
use super::signature::SignatureError;
use crate::cache::CacheError;

#[derive(Debug, Error)]
pub enum WebhookError {
    /// No shared secret configured; identical on every request until fixed
    #[error("Webhook secret not configured")]
    SecretNotConfigured,

    #[error("Missing signature")]
    MissingSignature,

    #[error("Invalid signature")]
    InvalidSignature(#[source] SignatureError),

    #[error("Error processing webhook")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("Error processing webhook")]
    Revalidation(#[source] CacheError),
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSignature | WebhookError::InvalidSignature(_) => {
                StatusCode::UNAUTHORIZED
            }
            WebhookError::SecretNotConfigured
            | WebhookError::MalformedPayload(_)
            | WebhookError::Revalidation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Diagnostic detail safe to return to the caller.
    fn detail(&self) -> Option<String> {
        match self {
            WebhookError::MalformedPayload(e) => Some(e.to_string()),
            WebhookError::Revalidation(e) => Some(e.public_detail()),
            _ => None,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        match &self {
            WebhookError::SecretNotConfigured => {
                error!("revalidate_secret_not_configured");
            }
            WebhookError::MissingSignature => {
                warn!("revalidate_signature_missing");
            }
            WebhookError::InvalidSignature(reason) => {
                warn!(reason = %reason, "revalidate_signature_invalid");
            }
            WebhookError::MalformedPayload(e) => {
                error!(error = %e, "revalidate_payload_malformed");
            }
            WebhookError::Revalidation(e) => {
                error!(error = %e, "revalidate_invalidation_failed");
            }
        }

        let body = RevalidateResponse {
            message: self.to_string(),
            revalidated: None,
            error: self.detail(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

//! Webhook body signature verification.
//!
//! The content backend signs each request with HMAC-SHA256 over the raw,
//! unparsed body, keyed by the shared webhook secret, and sends the hex
//! digest in the signature header. Comparing the literal secret instead is
//! not supported: it does not bind the credential to the payload.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Reasons a supplied signature is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature is not valid hex")]
    Malformed,
    #[error("signature does not match body")]
    Mismatch,
    #[error("webhook secret cannot key the HMAC")]
    InvalidKey,
}

/// Compute the hex HMAC-SHA256 digest of `body` keyed by `secret`.
pub fn compute_signature(secret: &str, body: &[u8]) -> Result<String, SignatureError> {
    Ok(hex::encode(mac_for(secret, body)?.finalize().into_bytes()))
}

/// Verify a webhook signature against the raw request body.
///
/// Accepts the bare hex digest or a `sha256=` prefixed one, in either case.
/// The digest comparison runs in constant time.
pub fn verify_signature(secret: &str, body: &[u8], signature: &str) -> Result<(), SignatureError> {
    let trimmed = signature.trim();
    let hex_sig = trimmed.strip_prefix("sha256=").unwrap_or(trimmed);

    let provided = match hex::decode(hex_sig) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!(signature_length = signature.len(), "webhook_signature_malformed");
            return Err(SignatureError::Malformed);
        }
    };

    mac_for(secret, body)?.verify_slice(&provided).map_err(|_| {
        warn!(
            body_length = body.len(),
            provided_length = provided.len(),
            "webhook_signature_mismatch"
        );
        SignatureError::Mismatch
    })
}

fn mac_for(secret: &str, body: &[u8]) -> Result<HmacSha256, SignatureError> {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            warn!("webhook_signature_invalid_key");
            return Err(SignatureError::InvalidKey);
        }
    };
    mac.update(body);
    Ok(mac)
}

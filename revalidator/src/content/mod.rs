//! Content backend event model and path resolution.
//!
//! ```text
//! raw body → WebhookPayload → (content type, slug) → RevalidationTarget
//! ```

pub mod paths;
pub mod types;

pub use paths::{resolve_path, ContentType, RevalidationTarget, HOME_PATH};
pub use types::WebhookPayload;

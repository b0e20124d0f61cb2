//! Revalidator - cache invalidation for a CMS-driven site.
//!
//! The content backend calls a signed webhook whenever an entry changes.
//! This library verifies the call, works out which site paths show the
//! entry, and marks those pages stale so they are regenerated on next
//! access.
//!
//! ## Architecture
//!
//! ```text
//! Content backend → POST /api/revalidate → verify → resolve path → invalidate
//! ```

pub mod cache;
pub mod config;
pub mod content;
pub mod web;

// Re-export commonly used types
pub use cache::{revalidate_target, CacheError, MemoryPageCache, PageRevalidator, PurgeRevalidator};
pub use config::{Config, Environment};
pub use content::{resolve_path, ContentType, RevalidationTarget, WebhookPayload};
pub use web::{router, AppState, WebhookError};

//! Page cache invalidation.
//!
//! A [`PageRevalidator`] marks the rendered output for a path as stale so
//! the next request regenerates it from fresh content. Two backends exist:
//! - [`MemoryPageCache`]: in-process stale set, the default
//! - [`PurgeRevalidator`]: forwards each path to an external purge endpoint

pub mod memory;
pub mod purge;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::content::RevalidationTarget;

pub use memory::MemoryPageCache;
pub use purge::PurgeRevalidator;

/// Failure of the underlying invalidation call.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("purge request for {path} failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("purge endpoint rejected {path} with status {status}")]
    Rejected { path: String, status: u16 },
}

impl CacheError {
    /// Description safe to hand back to the webhook caller.
    ///
    /// Transport errors carry the purge URL, so only the failure class is kept.
    pub fn public_detail(&self) -> String {
        match self {
            CacheError::Request { path, source } => {
                let class = if source.is_timeout() {
                    "timeout"
                } else if source.is_connect() {
                    "connection error"
                } else {
                    "transport error"
                };
                format!("purge request for {} failed: {}", path, class)
            }
            CacheError::Rejected { .. } => self.to_string(),
        }
    }
}

/// Marks cached page output as stale.
#[async_trait]
pub trait PageRevalidator: Send + Sync {
    async fn revalidate_path(&self, path: &str) -> Result<(), CacheError>;
}

/// Invalidate a target and, when it is not the home page, the home page too.
///
/// Stops at the first failure. Returns the invalidated paths in order.
pub async fn revalidate_target(
    revalidator: &dyn PageRevalidator,
    target: &RevalidationTarget,
) -> Result<Vec<String>, CacheError> {
    let mut done = Vec::with_capacity(2);

    for path in target.paths() {
        revalidator.revalidate_path(path).await?;
        done.push(path.to_string());
    }

    info!(path = %target, invalidated = ?done, "cache_target_revalidated");

    Ok(done)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingRevalidator;

    #[async_trait]
    impl PageRevalidator for FailingRevalidator {
        async fn revalidate_path(&self, path: &str) -> Result<(), CacheError> {
            Err(CacheError::Rejected {
                path: path.to_string(),
                status: 503,
            })
        }
    }

    #[tokio::test]
    async fn test_revalidate_target_includes_home() {
        let cache = MemoryPageCache::new();
        let target = RevalidationTarget::resolve(Some("blogPost"), Some("hello"));

        let done = revalidate_target(&cache, &target).await.unwrap();

        assert_eq!(done, vec!["/blog/hello".to_string(), "/".to_string()]);
        assert!(cache.is_stale("/blog/hello").await);
        assert!(cache.is_stale("/").await);
    }

    #[tokio::test]
    async fn test_revalidate_home_target_once() {
        let cache = MemoryPageCache::new();
        let target = RevalidationTarget::resolve(Some("landingPage"), None);

        let done = revalidate_target(&cache, &target).await.unwrap();

        assert_eq!(done, vec!["/".to_string()]);
        assert_eq!(cache.invalidation_count("/").await, 1);
    }

    #[tokio::test]
    async fn test_revalidate_target_stops_on_failure() {
        let target = RevalidationTarget::resolve(Some("dynamicPage"), Some("pricing"));

        let err = revalidate_target(&FailingRevalidator, &target)
            .await
            .unwrap_err();

        assert!(matches!(err, CacheError::Rejected { ref path, status: 503 } if path == "/pricing"));
    }
}

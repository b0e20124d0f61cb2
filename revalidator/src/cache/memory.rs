//! In-process stale page registry.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{CacheError, PageRevalidator};

/// Tracks which rendered paths are stale.
///
/// Cloning shares the same registry, so the renderer and the webhook
/// handler can hold separate handles.
///
/// Nothing is evicted: the stale set shrinks only through [`take_stale`],
/// and the per-path counters live for the whole process. Both are keyed by
/// site path, so they grow with the number of distinct pages invalidated,
/// not with the number of webhooks.
///
/// [`take_stale`]: MemoryPageCache::take_stale
#[derive(Clone, Default)]
pub struct MemoryPageCache {
    inner: Arc<RwLock<CacheState>>,
}

#[derive(Default)]
struct CacheState {
    stale: BTreeSet<String>,
    invalidations: HashMap<String, u64>,
}

impl MemoryPageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_stale(&self, path: &str) -> bool {
        self.inner.read().await.stale.contains(path)
    }

    /// Stale paths in lexical order.
    pub async fn stale_paths(&self) -> Vec<String> {
        self.inner.read().await.stale.iter().cloned().collect()
    }

    /// How many times a path has been invalidated since startup.
    pub async fn invalidation_count(&self, path: &str) -> u64 {
        self.inner
            .read()
            .await
            .invalidations
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    /// Drain the stale set, e.g. after the renderer regenerated those pages.
    pub async fn take_stale(&self) -> Vec<String> {
        let mut state = self.inner.write().await;
        std::mem::take(&mut state.stale).into_iter().collect()
    }
}

#[async_trait]
impl PageRevalidator for MemoryPageCache {
    async fn revalidate_path(&self, path: &str) -> Result<(), CacheError> {
        let mut state = self.inner.write().await;
        state.stale.insert(path.to_string());
        let count = state.invalidations.entry(path.to_string()).or_insert(0);
        *count += 1;

        debug!(path = path, invalidations = *count, "memory_cache_path_marked_stale");

        Ok(())
    }
}

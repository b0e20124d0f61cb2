//! HTTP purge backend.
//!
//! Used when rendered pages live outside this process (an edge cache or a
//! separate renderer). Each invalidated path is POSTed as `{"path": "..."}`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info};

use super::{CacheError, PageRevalidator};

/// Forwards invalidations to an external purge endpoint.
#[derive(Clone)]
pub struct PurgeRevalidator {
    inner: Arc<PurgeInner>,
}

struct PurgeInner {
    client: Client,
    url: String,
    token: Option<String>,
    timeout: Duration,
}

#[derive(Serialize)]
struct PurgeRequest<'a> {
    path: &'a str,
}

impl PurgeRevalidator {
    pub fn new(client: Client, url: String, token: Option<String>, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(PurgeInner {
                client,
                url,
                token,
                timeout,
            }),
        }
    }

    pub fn url(&self) -> &str {
        &self.inner.url
    }
}

#[async_trait]
impl PageRevalidator for PurgeRevalidator {
    async fn revalidate_path(&self, path: &str) -> Result<(), CacheError> {
        let mut request = self
            .inner
            .client
            .post(&self.inner.url)
            .timeout(self.inner.timeout)
            .json(&PurgeRequest { path });

        if let Some(token) = &self.inner.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                error!(
                    path = path,
                    timeout_seconds = self.inner.timeout.as_secs_f64(),
                    error = %e,
                    "purge_request_timeout"
                );
            } else {
                error!(path = path, error = %e, "purge_request_error");
            }
            CacheError::Request {
                path: path.to_string(),
                source: e,
            }
        })?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            error!(path = path, status_code = status, "purge_request_rejected");
            return Err(CacheError::Rejected {
                path: path.to_string(),
                status,
            });
        }

        info!(path = path, status_code = status, "purge_request_complete");

        Ok(())
    }
}

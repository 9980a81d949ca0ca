//! Catalog documents served over HTTP.

use async_trait::async_trait;
use log::{debug, warn};

use crate::core::catalog::LoadError;
use crate::source::{CatalogSource, is_url};

/// Fetches documents relative to a base URL with a plain GET.
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url_for(&self, document: &str) -> String {
        if is_url(document) {
            document.to_string()
        } else {
            format!("{}/{}", self.base_url, document.trim_start_matches('/'))
        }
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, document: &str) -> Result<String, LoadError> {
        let url = self.url_for(document);
        let unreachable = |reason: String| LoadError::Unreachable {
            source: url.clone(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| unreachable(e.to_string()))?;

        debug!("GET {} -> {}", url, response.status());

        if !response.status().is_success() {
            let status = response.status();
            warn!("Catalog document {} returned {}", url, status);
            return Err(unreachable(format!("HTTP {}", status.as_u16())));
        }

        response.text().await.map_err(|e| unreachable(e.to_string()))
    }
}

//! # Catalog Sources
//!
//! Where catalog documents come from. The store in [`crate::core::catalog`] only
//! parses text; a [`CatalogSource`] fetches it.
//!
//! ```text
//! LoadPlan::Documents [HTML5 → html.json, CSS3 → css.json, ...]
//!        │  try_join_all(fetch)
//!        ▼
//! Vec<(name, raw)>  →  Catalog::from_documents
//! ```
//!
//! A load is one-shot: the first failed fetch fails the whole catalog and
//! nothing is retried.

mod file;
mod http;

pub use file::FileSource;
pub use http::HttpSource;

use async_trait::async_trait;
use futures::future::try_join_all;
use log::info;

use crate::core::catalog::{Catalog, LoadError};

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns the name of the source, for logs.
    fn name(&self) -> &str;

    /// Fetch one raw document, addressed relative to the source root.
    async fn fetch(&self, document: &str) -> Result<String, LoadError>;
}

/// One configured technology and the document holding its categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub technology: String,
    pub document: String,
}

/// What to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPlan {
    /// One `{category: [item]}` document per technology, in menu order.
    Documents(Vec<DocumentEntry>),
    /// A single `{technology: {category: [item]}}` document.
    Bundle(String),
}

pub async fn load_catalog(plan: &LoadPlan, source: &dyn CatalogSource) -> Result<Catalog, LoadError> {
    info!("Loading catalog from {} ({:?})", source.name(), plan);
    match plan {
        LoadPlan::Bundle(document) => {
            let raw = source.fetch(document).await?;
            Catalog::from_bundle(document, &raw)
        }
        LoadPlan::Documents(entries) => {
            let fetches = entries.iter().map(|entry| async move {
                let raw = source.fetch(&entry.document).await?;
                Ok::<_, LoadError>((entry.technology.clone(), raw))
            });
            let documents = try_join_all(fetches).await?;
            Catalog::from_documents(documents)
        }
    }
}

/// Pick a source for a root location: `http(s)://` roots go over HTTP,
/// anything else is a directory.
pub fn build_source(root: &str) -> Box<dyn CatalogSource> {
    if is_url(root) {
        Box::new(HttpSource::new(root))
    } else {
        Box::new(FileSource::new(root))
    }
}

pub fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Split a full document location into `(root, document)`.
///
/// `https://host/data/all.json` → `("https://host/data", "all.json")`,
/// `data.json` → `(".", "data.json")`.
pub fn split_location(location: &str) -> (String, String) {
    match location.rsplit_once('/') {
        Some((root, document)) if !root.is_empty() && !root.ends_with('/') => {
            (root.to_string(), document.to_string())
        }
        Some(("", document)) => ("/".to_string(), document.to_string()),
        _ => (".".to_string(), location.to_string()),
    }
}

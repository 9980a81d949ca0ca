//! Catalog documents on the local filesystem.

use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;

use crate::core::catalog::LoadError;
use crate::source::CatalogSource;

/// Reads documents from a directory.
pub struct FileSource {
    root: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            name: format!("file:{}", root.display()),
            root,
        }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, document: &str) -> Result<String, LoadError> {
        // Absolute documents replace the root (PathBuf::join semantics).
        let path = self.root.join(document);
        debug!("Reading catalog document {}", path.display());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| LoadError::Unreachable {
                source: path.display().to_string(),
                reason: e.to_string(),
            })
    }
}

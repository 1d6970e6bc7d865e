//! Image storage backends.
//!
//! Handlers only see the [`ImageStore`] trait. The filesystem backend keeps
//! every image flat inside one upload directory, named by its content key
//! (see [`crate::upload::storage_key`]).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::CoreError;
use crate::upload::{sanitize_filename, storage_key};

/// URL prefix under which stored images are served.
pub const DEFAULT_PUBLIC_PREFIX: &str = "uploads";

/// Outcome of a successful [`ImageStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Content key, also the file name inside the upload directory.
    pub key: String,
    /// Relative path recorded on the dog row, e.g. `uploads/<key>`.
    pub image_path: String,
}

/// Storage backend for uploaded images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist `data`, returning where it was stored. The write is complete
    /// once this returns `Ok`.
    async fn save(&self, original_filename: &str, data: &[u8]) -> Result<StoredImage, CoreError>;

    /// Remove the image recorded as `image_path`. A missing file is not an error.
    async fn remove(&self, image_path: &str) -> Result<(), CoreError>;

    /// Whether the image recorded as `image_path` is present.
    async fn exists(&self, image_path: &str) -> Result<bool, CoreError>;
}

/// Filesystem backend rooted at the upload directory.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalImageStore {
    /// Create a backend writing into `root`. The directory is created on the
    /// first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            public_prefix: DEFAULT_PUBLIC_PREFIX.to_string(),
        }
    }

    /// Override the prefix recorded in `image_path`.
    pub fn with_public_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.public_prefix = prefix.into().trim_matches('/').to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    fn image_path_for(&self, key: &str) -> String {
        format!("{}/{key}", self.public_prefix)
    }

    /// Map a recorded `image_path` back to a file inside the upload directory.
    ///
    /// Returns `None` for paths outside this store's prefix or paths that
    /// carry extra directory components.
    fn resolve(&self, image_path: &str) -> Option<PathBuf> {
        let key = image_path
            .trim_start_matches('/')
            .strip_prefix(&self.public_prefix)?
            .strip_prefix('/')?;
        match sanitize_filename(key) {
            Some(clean) if clean == key => Some(self.root.join(clean)),
            _ => None,
        }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, original_filename: &str, data: &[u8]) -> Result<StoredImage, CoreError> {
        if sanitize_filename(original_filename).is_none() {
            return Err(CoreError::Validation(format!(
                "Invalid upload filename '{original_filename}'"
            )));
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CoreError::Upload(format!("Failed to create upload dir: {e}")))?;

        let key = storage_key(original_filename, data);
        let dest = self.root.join(&key);
        let stored = StoredImage {
            image_path: self.image_path_for(&key),
            key,
        };

        if tokio::fs::try_exists(&dest).await.unwrap_or(false) {
            tracing::debug!(image_path = %stored.image_path, "Image already stored, reusing");
            return Ok(stored);
        }

        let partial = self.root.join(format!(".{}.part", uuid::Uuid::new_v4()));
        if let Err(e) = tokio::fs::write(&partial, data).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(CoreError::Upload(format!("Failed to write {}: {e}", stored.key)));
        }
        if let Err(e) = tokio::fs::rename(&partial, &dest).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(CoreError::Upload(format!("Failed to move {}: {e}", stored.key)));
        }

        tracing::info!(
            image_path = %stored.image_path,
            bytes = data.len(),
            "Stored uploaded image"
        );
        Ok(stored)
    }

    async fn remove(&self, image_path: &str) -> Result<(), CoreError> {
        let Some(path) = self.resolve(image_path) else {
            tracing::warn!(%image_path, "Refusing to remove image outside upload dir");
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(%image_path, "Removed image");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Internal(format!(
                "Failed to remove {image_path}: {e}"
            ))),
        }
    }

    async fn exists(&self, image_path: &str) -> Result<bool, CoreError> {
        let Some(path) = self.resolve(image_path) else {
            return Ok(false);
        };
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| CoreError::Internal(e.to_string()))
    }
}

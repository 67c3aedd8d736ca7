use std::path::{Path, PathBuf};

use super::MediaStore;
use crate::error::{Error, Result};

/// File name prefix of generated thumbnails
const THUMBNAIL_PREFIX: &str = "thumb_";

/// Extension used when the source image has none
const DEFAULT_EXTENSION: &str = "jpg";

impl MediaStore {
    /// Generate a thumbnail for an outfit photo.
    ///
    /// An existing thumbnail for `outfit_id` is returned as-is. Otherwise the
    /// full-resolution image is copied as the thumbnail (no resizing).
    /// On any failure the original `image_path` is returned instead.
    pub async fn generate_thumbnail(&self, image_path: &Path, outfit_id: &str) -> PathBuf {
        match self.try_generate_thumbnail(image_path, outfit_id).await {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(
                    "Failed to generate thumbnail for {}: {} (using original image)",
                    outfit_id,
                    e
                );
                image_path.to_path_buf()
            }
        }
    }

    async fn try_generate_thumbnail(&self, image_path: &Path, outfit_id: &str) -> Result<PathBuf> {
        validate_outfit_id(outfit_id)?;
        self.ensure_directories().await?;

        if let Some(existing) = self.find_thumbnail(outfit_id).await? {
            tracing::debug!("Thumbnail already present: {}", existing.display());
            return Ok(existing);
        }

        let extension = image_path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        let thumbnail_path = self
            .thumbnails_dir()
            .join(format!("{}{}.{}", THUMBNAIL_PREFIX, outfit_id, extension));

        tokio::fs::copy(image_path, &thumbnail_path).await?;

        tracing::info!("Generated thumbnail: {}", thumbnail_path.display());
        Ok(thumbnail_path)
    }

    /// Get the thumbnail path for an outfit, or None if none exists.
    /// Lookup failures are logged and treated as "not found".
    pub async fn thumbnail_path(&self, outfit_id: &str) -> Option<PathBuf> {
        if validate_outfit_id(outfit_id).is_err() {
            return None;
        }
        match self.find_thumbnail(outfit_id).await {
            Ok(found) => found,
            Err(e) => {
                tracing::error!("Failed to get thumbnail path for {}: {}", outfit_id, e);
                None
            }
        }
    }

    /// Delete an outfit's thumbnail if one exists.
    /// Returns whether a file was removed; failures are logged.
    pub async fn remove_thumbnail(&self, outfit_id: &str) -> bool {
        let Some(path) = self.thumbnail_path(outfit_id).await else {
            return false;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Removed thumbnail {}", path.display());
                true
            }
            Err(e) => {
                tracing::warn!("Failed to remove thumbnail {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Scan the thumbnail directory for `thumb_<outfit_id>.<any ext>`
    async fn find_thumbnail(&self, outfit_id: &str) -> Result<Option<PathBuf>> {
        let dir = self.thumbnails_dir();
        if !tokio::fs::try_exists(dir).await? {
            return Ok(None);
        }

        let wanted = format!("{}{}", THUMBNAIL_PREFIX, outfit_id);
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let stem_matches = path
                .file_stem()
                .map(|stem| stem.to_string_lossy() == wanted)
                .unwrap_or(false);
            if stem_matches && entry.file_type().await?.is_file() {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }
}

/// Outfit ids become part of a file name
fn validate_outfit_id(outfit_id: &str) -> Result<()> {
    let bad = outfit_id.is_empty()
        || outfit_id.contains(|c: char| c == '/' || c == '\\')
        || outfit_id == "."
        || outfit_id == "..";
    if bad {
        return Err(Error::InvalidInput(format!("invalid outfit id: {:?}", outfit_id)));
    }
    Ok(())
}

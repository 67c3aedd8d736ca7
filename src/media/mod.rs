/// Photo and thumbnail file management
///
/// This module handles:
/// - Copying captured photos into the app's photo directory
/// - Generating and looking up per-outfit thumbnails
/// - Reporting disk usage of both directories

pub mod thumbnail;

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Default photo directory name under the data root
pub const PHOTOS_DIR: &str = "FitCheckPhotos";
/// Default thumbnail directory name under the data root
pub const THUMBNAILS_DIR: &str = "FitCheckThumbnails";

/// Owns the photo and thumbnail directories
#[derive(Debug, Clone)]
pub struct MediaStore {
    photos_dir: PathBuf,
    thumbnails_dir: PathBuf,
}

/// File counts and sizes of the media directories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageUsage {
    pub photo_count: usize,
    pub photo_bytes: u64,
    pub thumbnail_count: usize,
    pub thumbnail_bytes: u64,
}

impl MediaStore {
    /// Use the default directory names under `root`
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::with_dirs(root.join(PHOTOS_DIR), root.join(THUMBNAILS_DIR))
    }

    pub fn with_dirs(photos_dir: impl Into<PathBuf>, thumbnails_dir: impl Into<PathBuf>) -> Self {
        MediaStore {
            photos_dir: photos_dir.into(),
            thumbnails_dir: thumbnails_dir.into(),
        }
    }

    pub fn photos_dir(&self) -> &Path {
        &self.photos_dir
    }

    pub fn thumbnails_dir(&self) -> &Path {
        &self.thumbnails_dir
    }

    /// Create both directories if they don't exist
    pub async fn ensure_directories(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.photos_dir).await?;
        tokio::fs::create_dir_all(&self.thumbnails_dir).await?;
        Ok(())
    }

    /// Copy `source` into the photo directory as `file_name`.
    /// Returns the new path. Never overwrites an existing photo.
    pub async fn save_photo(&self, source: &Path, file_name: &str) -> Result<PathBuf> {
        validate_file_name(file_name)?;
        self.ensure_directories().await?;

        let destination = self.photos_dir.join(file_name);
        if tokio::fs::try_exists(&destination).await? {
            return Err(Error::AlreadyExists(destination));
        }

        tokio::fs::copy(source, &destination).await?;
        tracing::info!("Saved photo {}", destination.display());
        Ok(destination)
    }

    /// Count files and bytes in both directories.
    /// Missing directories count as empty.
    pub async fn usage(&self) -> Result<StorageUsage> {
        let photos_dir = self.photos_dir.clone();
        let thumbnails_dir = self.thumbnails_dir.clone();

        let usage = tokio::task::spawn_blocking(move || {
            let (photo_count, photo_bytes) = dir_usage(&photos_dir);
            let (thumbnail_count, thumbnail_bytes) = dir_usage(&thumbnails_dir);
            StorageUsage {
                photo_count,
                photo_bytes,
                thumbnail_count,
                thumbnail_bytes,
            }
        })
        .await?;

        Ok(usage)
    }
}

/// Delete a file if it exists. Returns whether a file was removed.
pub async fn remove_if_exists(path: &Path) -> Result<bool> {
    if !tokio::fs::try_exists(path).await? {
        return Ok(false);
    }
    tokio::fs::remove_file(path).await?;
    tracing::debug!("Removed {}", path.display());
    Ok(true)
}

/// Reject names that would escape the target directory
fn validate_file_name(file_name: &str) -> Result<()> {
    let path = Path::new(file_name);
    let is_plain = path.file_name().map(|n| n == path.as_os_str()).unwrap_or(false);
    if file_name.is_empty() || !is_plain {
        return Err(Error::InvalidInput(format!("invalid file name: {:?}", file_name)));
    }
    Ok(())
}

fn dir_usage(dir: &Path) -> (usize, u64) {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .fold((0, 0), |(count, bytes), meta| (count + 1, bytes + meta.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_directories_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let media = MediaStore::new(root.path());

        media.ensure_directories().await.unwrap();
        media.ensure_directories().await.unwrap();

        assert!(root.path().join(PHOTOS_DIR).is_dir());
        assert!(root.path().join(THUMBNAILS_DIR).is_dir());
    }

    #[tokio::test]
    async fn test_save_photo_copies_source() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("capture.jpg");
        std::fs::write(&source, b"fake jpeg bytes").unwrap();

        let media = MediaStore::new(root.path().join("data"));
        let saved = media.save_photo(&source, "outfit_1.jpg").await.unwrap();

        assert_eq!(saved, media.photos_dir().join("outfit_1.jpg"));
        assert_eq!(std::fs::read(&saved).unwrap(), b"fake jpeg bytes");
        assert!(source.exists(), "source is copied, not moved");
    }

    #[tokio::test]
    async fn test_save_photo_refuses_overwrite() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("capture.jpg");
        std::fs::write(&source, b"one").unwrap();

        let media = MediaStore::new(root.path());
        media.save_photo(&source, "outfit_1.jpg").await.unwrap();

        let second = media.save_photo(&source, "outfit_1.jpg").await;
        assert!(matches!(second, Err(Error::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_save_photo_missing_source_fails() {
        let root = tempfile::tempdir().unwrap();
        let media = MediaStore::new(root.path());

        let result = media
            .save_photo(&root.path().join("nope.jpg"), "outfit_1.jpg")
            .await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_save_photo_rejects_path_names() {
        let root = tempfile::tempdir().unwrap();
        let source = root.path().join("capture.jpg");
        std::fs::write(&source, b"x").unwrap();
        let media = MediaStore::new(root.path());

        for name in ["", "../escape.jpg", "sub/dir.jpg"] {
            let result = media.save_photo(&source, name).await;
            assert!(matches!(result, Err(Error::InvalidInput(_))), "{:?}", name);
        }
    }

    #[tokio::test]
    async fn test_remove_if_exists() {
        let root = tempfile::tempdir().unwrap();
        let photo = root.path().join("p.jpg");
        std::fs::write(&photo, b"x").unwrap();

        assert!(remove_if_exists(&photo).await.unwrap());
        assert!(!remove_if_exists(&photo).await.unwrap());
    }

    #[tokio::test]
    async fn test_usage() {
        let root = tempfile::tempdir().unwrap();
        let media = MediaStore::new(root.path());
        assert_eq!(media.usage().await.unwrap(), StorageUsage::default());

        let source = root.path().join("capture.jpg");
        std::fs::write(&source, vec![0u8; 100]).unwrap();
        let saved = media.save_photo(&source, "outfit_1.jpg").await.unwrap();
        media.generate_thumbnail(&saved, "outfit_1").await;

        let usage = media.usage().await.unwrap();
        assert_eq!(usage.photo_count, 1);
        assert_eq!(usage.photo_bytes, 100);
        assert_eq!(usage.thumbnail_count, 1);
        assert_eq!(usage.thumbnail_bytes, 100);
    }
}

//! Development stand-in for a vision backend
//!
//! Returns canned detections after a fixed delay. No image content is
//! inspected; only the file's presence decides between the canned result
//! and the degraded fallback.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{BackgroundRemoval, ClothingAnalysis, ClothingAnalyzer, Occasion, StyleKind};
use crate::state::data::{BoundingBox, ClothingCategory, ClothingItem};

/// Simulated analysis latency
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(1500);

/// Simulated background-removal latency
pub const DEFAULT_REMOVAL_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct MockClothingAnalyzer {
    analysis_delay: Duration,
    removal_delay: Duration,
}

impl Default for MockClothingAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYSIS_DELAY, DEFAULT_REMOVAL_DELAY)
    }
}

impl MockClothingAnalyzer {
    pub fn new(analysis_delay: Duration, removal_delay: Duration) -> Self {
        Self {
            analysis_delay,
            removal_delay,
        }
    }

    /// No simulated latency, for tests
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// The canned result every readable photo gets
    pub fn canned_analysis() -> ClothingAnalysis {
        ClothingAnalysis {
            clothing_items: vec![
                detection(ClothingCategory::Top, 0.9, "blue", "casual", (100.0, 50.0, 200.0, 250.0)),
                detection(ClothingCategory::Bottom, 0.85, "black", "jeans", (80.0, 300.0, 240.0, 300.0)),
                detection(ClothingCategory::Shoes, 0.8, "white", "sneakers", (90.0, 600.0, 220.0, 100.0)),
            ],
            dominant_colors: vec!["blue".to_string(), "black".to_string(), "white".to_string()],
            occasion: Some(Occasion::Casual),
            style: Some(StyleKind::Minimalist),
            tags: vec![
                "comfortable".to_string(),
                "everyday".to_string(),
                "versatile".to_string(),
            ],
        }
    }
}

fn detection(
    category: ClothingCategory,
    confidence: f64,
    color: &str,
    style: &str,
    (x, y, width, height): (f64, f64, f64, f64),
) -> ClothingItem {
    ClothingItem {
        category,
        confidence,
        color: color.to_string(),
        style: Some(style.to_string()),
        brand: None,
        bounding_box: Some(BoundingBox { x, y, width, height }),
    }
}

/// `photo.jpg` -> `photo_no_bg.jpg`
fn no_background_path(image_path: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let file_name = match image_path.extension() {
        Some(ext) => format!("{}_no_bg.{}", stem, ext.to_string_lossy()),
        None => format!("{}_no_bg", stem),
    };
    image_path.with_file_name(file_name)
}

impl ClothingAnalyzer for MockClothingAnalyzer {
    async fn analyze_clothing(&self, image_path: &Path) -> ClothingAnalysis {
        tokio::time::sleep(self.analysis_delay).await;

        match tokio::fs::try_exists(image_path).await {
            Ok(true) => {
                tracing::debug!("Mock analysis for {}", image_path.display());
                Self::canned_analysis()
            }
            Ok(false) => {
                tracing::error!("AI analysis failed: {} not found", image_path.display());
                ClothingAnalysis::fallback()
            }
            Err(e) => {
                tracing::error!("AI analysis failed for {}: {}", image_path.display(), e);
                ClothingAnalysis::fallback()
            }
        }
    }

    async fn remove_background(&self, image_path: &Path) -> BackgroundRemoval {
        tokio::time::sleep(self.removal_delay).await;

        let exists = tokio::fs::try_exists(image_path).await.unwrap_or(false);
        if !exists {
            tracing::error!("Background removal failed: {} not found", image_path.display());
            return BackgroundRemoval {
                processed_image_path: image_path.to_path_buf(),
                original_image_path: image_path.to_path_buf(),
                success: false,
                error: Some(format!("image not found: {}", image_path.display())),
            };
        }

        BackgroundRemoval {
            processed_image_path: no_background_path(image_path),
            original_image_path: image_path.to_path_buf(),
            success: true,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{generate_tags, style_confidence};

    #[tokio::test]
    async fn test_canned_analysis_for_existing_photo() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("outfit.jpg");
        std::fs::write(&photo, b"anything").unwrap();

        let analysis = MockClothingAnalyzer::instant().analyze_clothing(&photo).await;
        assert_eq!(analysis, MockClothingAnalyzer::canned_analysis());
        assert_eq!(analysis.clothing_items.len(), 3);
        assert_eq!(analysis.occasion, Some(Occasion::Casual));
        assert_eq!(analysis.style, Some(StyleKind::Minimalist));
        assert_eq!(style_confidence(&analysis), 85);
    }

    #[tokio::test]
    async fn test_missing_photo_degrades_to_fallback() {
        let analysis = MockClothingAnalyzer::instant()
            .analyze_clothing(Path::new("/definitely/not/here.jpg"))
            .await;
        assert_eq!(analysis, ClothingAnalysis::fallback());
        assert_eq!(analysis.clothing_items[0].category, ClothingCategory::Unknown);
    }

    #[test]
    fn test_canned_tags() {
        let tags = generate_tags(&MockClothingAnalyzer::canned_analysis());
        assert_eq!(
            tags,
            vec![
                "comfortable", "everyday", "versatile", "top", "blue", "casual", "bottom",
                "black", "jeans", "shoes", "white", "sneakers", "minimalist",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_analysis_waits_for_delay() {
        let analyzer = MockClothingAnalyzer::default();
        let started = tokio::time::Instant::now();
        analyzer.analyze_clothing(Path::new("/missing.jpg")).await;
        assert!(started.elapsed() >= DEFAULT_ANALYSIS_DELAY);
    }

    #[tokio::test]
    async fn test_remove_background() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("outfit_1.jpg");
        std::fs::write(&photo, b"x").unwrap();

        let result = MockClothingAnalyzer::instant().remove_background(&photo).await;
        assert!(result.success);
        assert_eq!(result.original_image_path, photo);
        assert_eq!(result.processed_image_path, dir.path().join("outfit_1_no_bg.jpg"));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_remove_background_failure_keeps_original() {
        let missing = Path::new("/nope/outfit.jpg");
        let result = MockClothingAnalyzer::instant().remove_background(missing).await;
        assert!(!result.success);
        assert_eq!(result.processed_image_path, missing);
        assert!(result.error.is_some());
    }
}

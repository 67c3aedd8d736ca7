//! The capture flow: photo in, stored outfit record out.

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analysis::{
    generate_tags, outfit_complexity, weather_recommendations, ClothingAnalysis, ClothingAnalyzer,
    Complexity,
};
use crate::error::Result;
use crate::media::MediaStore;
use crate::state::data::Outfit;
use crate::state::library::OutfitLibrary;
use crate::weather::{comfort_score_for, suggestions_for, ComfortReport, OutfitSuggestion, WeatherProvider};

/// Extension used when the captured file has none
const DEFAULT_PHOTO_EXTENSION: &str = "jpg";

/// Everything a capture produced, for display
#[derive(Debug, Clone)]
pub struct CaptureReport {
    pub outfit: Outfit,
    /// Thumbnail, or the photo itself if thumbnail generation failed
    pub thumbnail_path: PathBuf,
    pub analysis: ClothingAnalysis,
    pub complexity: Complexity,
    /// Notes on wearing this outfit in the captured weather
    pub recommendations: Vec<String>,
    pub suggestions: Vec<OutfitSuggestion>,
    pub comfort: ComfortReport,
}

/// Runs the capture steps strictly in order.
///
/// A failed write step aborts the run. Steps already completed are not
/// rolled back: a copied photo stays on disk if the record save fails.
pub struct CapturePipeline<A, W> {
    library: Arc<OutfitLibrary>,
    media: MediaStore,
    analyzer: A,
    weather: W,
    latitude: f64,
    longitude: f64,
    remove_background: bool,
}

impl<A: ClothingAnalyzer, W: WeatherProvider> CapturePipeline<A, W> {
    pub fn new(library: Arc<OutfitLibrary>, media: MediaStore, analyzer: A, weather: W) -> Self {
        CapturePipeline {
            library,
            media,
            analyzer,
            weather,
            latitude: 37.7749,
            longitude: -122.4194,
            remove_background: false,
        }
    }

    /// Coordinates passed to the weather provider
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Also request a background-removed variant of each photo
    pub fn with_background_removal(mut self, enabled: bool) -> Self {
        self.remove_background = enabled;
        self
    }

    /// Capture one outfit from the photo at `source`.
    pub async fn capture(&self, source: &Path) -> Result<CaptureReport> {
        let now = Utc::now();
        let id = format!("outfit_{}", now.timestamp_millis());
        let extension = source
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| DEFAULT_PHOTO_EXTENSION.to_string());

        tracing::info!("Capturing {} from {}", id, source.display());

        // 1. Save photo to app storage
        let saved = self
            .media
            .save_photo(source, &format!("{}.{}", id, extension))
            .await?;

        // 2. Analyze clothing
        tracing::debug!("Analyzing clothing for {}", id);
        let analysis = self.analyzer.analyze_clothing(&saved).await;
        let tags = generate_tags(&analysis);

        // 3. Current weather
        tracing::debug!("Getting weather data for {}", id);
        let weather = self.weather.current_weather(self.latitude, self.longitude).await;

        // 4. Compose and persist the record
        let mut outfit = Outfit::new(
            id,
            format!("Outfit {}", now.format("%Y-%m-%d")),
            saved.to_string_lossy(),
            now,
        );
        outfit.tags = tags;
        outfit.ai_analysis = Some(analysis.summarize());
        outfit.weather_data = Some(weather.snapshot());
        if self.remove_background {
            let removal = self.analyzer.remove_background(&saved).await;
            if removal.success {
                outfit.processed_image_path =
                    Some(removal.processed_image_path.to_string_lossy().to_string());
            } else {
                tracing::warn!(
                    "Background removal failed for {}: {}",
                    outfit.id,
                    removal.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
        self.library.save(outfit.clone()).await?;

        // 5. Thumbnail for the gallery
        let thumbnail_path = self.media.generate_thumbnail(&saved, &outfit.id).await;

        let suggestions = suggestions_for(&weather);
        let comfort = comfort_score_for(&weather, &outfit.tags);
        tracing::info!(
            "Outfit {} saved: {} items, {}% confidence, comfort {}",
            outfit.id,
            analysis.clothing_items.len(),
            outfit.ai_analysis.as_ref().map(|a| a.confidence).unwrap_or(0),
            comfort.level.as_str()
        );

        let recommendations =
            weather_recommendations(weather.temperature, &weather.condition, &analysis);

        Ok(CaptureReport {
            outfit,
            thumbnail_path,
            complexity: outfit_complexity(&analysis),
            analysis,
            recommendations,
            suggestions,
            comfort,
        })
    }
}

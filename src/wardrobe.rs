//! Day-to-day operations on stored outfits: browse, wear, delete, assess.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::error::Result;
use crate::media::MediaStore;
use crate::state::data::Outfit;
use crate::state::gallery::{newest_first, GalleryQuery, GalleryStats};
use crate::state::library::OutfitLibrary;
use crate::weather::provider::is_fresh;
use crate::weather::{comfort_score_for, suggestions_for, ComfortReport, OutfitSuggestion, WeatherData};

/// Weather advice for a stored outfit
#[derive(Debug, Clone)]
pub struct Assessment {
    pub weather: WeatherData,
    pub suggestions: Vec<OutfitSuggestion>,
    pub comfort: ComfortReport,
    /// Reading is under an hour old; older ones describe the capture, not now
    pub fresh: bool,
}

/// Combines the record store with the media directories
#[derive(Debug, Clone)]
pub struct Wardrobe {
    library: Arc<OutfitLibrary>,
    media: MediaStore,
}

impl Wardrobe {
    pub fn new(library: Arc<OutfitLibrary>, media: MediaStore) -> Self {
        Self { library, media }
    }

    pub fn library(&self) -> &OutfitLibrary {
        &self.library
    }

    pub fn media(&self) -> &MediaStore {
        &self.media
    }

    /// Gallery listing: newest first, then the query's search and sort
    pub async fn browse(&self, query: &GalleryQuery) -> Vec<Outfit> {
        let outfits = newest_first(self.library.get_all().await);
        query.apply(&outfits)
    }

    pub async fn stats(&self, now: DateTime<Utc>) -> GalleryStats {
        GalleryStats::compute(&self.library.get_all().await, now)
    }

    /// Record that an outfit was worn today
    pub async fn log_wear(&self, id: &str) -> Result<Option<Outfit>> {
        self.library.increment_wear_count(id).await
    }

    /// Delete the record, its photo and its thumbnail.
    /// Thumbnail removal is best-effort and never fails the delete.
    pub async fn delete_outfit(&self, id: &str) -> Result<Option<Outfit>> {
        let removed = self.library.delete(id).await?;
        if removed.is_some() && !self.media.remove_thumbnail(id).await {
            tracing::debug!("No thumbnail removed for {}", id);
        }
        Ok(removed)
    }

    /// Suggestions and comfort for a stored outfit under its capture weather.
    /// None if the outfit is unknown or has no weather recorded.
    pub async fn assess(&self, id: &str) -> Option<Assessment> {
        let outfit = self.library.get(id).await?;
        let snapshot = outfit.weather_data.as_ref()?;
        let weather = WeatherData::from_snapshot(snapshot);

        Some(Assessment {
            suggestions: suggestions_for(&weather),
            comfort: comfort_score_for(&weather, &outfit.tags),
            fresh: is_fresh(outfit.date, Utc::now()),
            weather,
        })
    }
}

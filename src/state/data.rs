//! Shared data structures for the outfit library
//!
//! These structs represent the data model that flows between
//! the record store, the analysis/weather engines and the driver.
//! Field names are serialized in camelCase so the stored collection keeps
//! the same shape as the mobile app's storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a single logged outfit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outfit {
    /// Unique id, `outfit_<unix millis>` of the capture
    pub id: String,
    /// Display title (e.g., "Outfit 2026-10-18")
    pub title: String,
    /// Full path to the photo owned by this outfit
    pub image_path: String,
    /// Creation timestamp
    pub date: DateTime<Utc>,
    /// Tags in insertion order
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Number of times worn; only ever incremented
    #[serde(default)]
    pub wear_count: u32,
    /// Set on every wear event, absent until the first one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_worn: Option<DateTime<Utc>>,
    /// Background-removed variant of the photo, if one was produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<OutfitAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_data: Option<WeatherSnapshot>,
}

impl Outfit {
    /// Create a fresh, never-worn outfit record
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_path: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_path: image_path.into(),
            date,
            tags: Vec::new(),
            occasion: None,
            cost: None,
            wear_count: 0,
            last_worn: None,
            processed_image_path: None,
            ai_analysis: None,
            weather_data: None,
        }
    }

    /// Cost divided by wear count.
    /// None when the cost is unknown or zero, or the outfit was never worn.
    pub fn cost_per_wear(&self) -> Option<f64> {
        match self.cost {
            Some(cost) if cost > 0.0 && self.wear_count > 0 => {
                Some(cost / f64::from(self.wear_count))
            }
            _ => None,
        }
    }

    /// Record one wear event at `now`
    pub fn record_wear(&mut self, now: DateTime<Utc>) {
        self.wear_count = self.wear_count.saturating_add(1);
        self.last_worn = Some(now);
    }
}

/// Clothing categories the analyzer can detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClothingCategory {
    Top,
    Bottom,
    Shoes,
    Accessory,
    Outerwear,
    Dress,
    Unknown,
}

impl ClothingCategory {
    /// Lowercase name, as used in tags
    pub fn as_str(&self) -> &'static str {
        match self {
            ClothingCategory::Top => "top",
            ClothingCategory::Bottom => "bottom",
            ClothingCategory::Shoes => "shoes",
            ClothingCategory::Accessory => "accessory",
            ClothingCategory::Outerwear => "outerwear",
            ClothingCategory::Dress => "dress",
            ClothingCategory::Unknown => "unknown",
        }
    }
}

/// Pixel rectangle of a detection within the photo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One detected garment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub category: ClothingCategory,
    /// Detection confidence (0.0 to 1.0)
    pub confidence: f64,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

/// Analysis summary stored with an outfit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitAnalysis {
    pub clothing_items: Vec<ClothingItem>,
    pub dominant_colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Style confidence, 0 to 100
    pub confidence: u32,
}

/// Weather conditions at capture time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Degrees Fahrenheit
    pub temperature: f64,
    pub condition: String,
    pub location: String,
}

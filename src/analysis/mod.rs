/// Clothing analysis
///
/// This module handles:
/// - The `ClothingAnalyzer` seam a vision backend plugs into
/// - The development mock (mock.rs)
/// - Pure derivations over an analysis: tags, confidence, complexity

pub mod mock;

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::state::data::{ClothingCategory, ClothingItem, OutfitAnalysis};

pub use mock::MockClothingAnalyzer;

/// Items at or below this confidence contribute no tags
const TAG_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Source of clothing detections for a photo.
///
/// Implementations never fail: a backend error degrades to
/// `ClothingAnalysis::fallback()` and a failed background removal is
/// reported through `BackgroundRemoval::success`.
pub trait ClothingAnalyzer: Send + Sync {
    fn analyze_clothing(&self, image_path: &Path) -> impl Future<Output = ClothingAnalysis> + Send;

    fn remove_background(&self, image_path: &Path) -> impl Future<Output = BackgroundRemoval> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    Casual,
    Formal,
    Business,
    Athletic,
    Party,
}

impl Occasion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::Casual => "casual",
            Occasion::Formal => "formal",
            Occasion::Business => "business",
            Occasion::Athletic => "athletic",
            Occasion::Party => "party",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Minimalist,
    Bohemian,
    Classic,
    Trendy,
    Vintage,
}

impl StyleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKind::Minimalist => "minimalist",
            StyleKind::Bohemian => "bohemian",
            StyleKind::Classic => "classic",
            StyleKind::Trendy => "trendy",
            StyleKind::Vintage => "vintage",
        }
    }
}

/// Full analyzer output for one photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingAnalysis {
    pub clothing_items: Vec<ClothingItem>,
    pub dominant_colors: Vec<String>,
    pub occasion: Option<Occasion>,
    pub style: Option<StyleKind>,
    /// Tags the analyzer attaches regardless of detections
    pub tags: Vec<String>,
}

impl ClothingAnalysis {
    /// Degraded result used when analysis fails
    pub fn fallback() -> Self {
        ClothingAnalysis {
            clothing_items: vec![ClothingItem {
                category: ClothingCategory::Unknown,
                confidence: 0.5,
                color: "mixed".to_string(),
                style: None,
                brand: None,
                bounding_box: None,
            }],
            dominant_colors: vec!["mixed".to_string()],
            occasion: None,
            style: None,
            tags: vec!["outfit".to_string()],
        }
    }

    /// Summary stored on the outfit record
    pub fn summarize(&self) -> OutfitAnalysis {
        OutfitAnalysis {
            clothing_items: self.clothing_items.clone(),
            dominant_colors: self.dominant_colors.clone(),
            occasion: self.occasion.map(|o| o.as_str().to_string()),
            style: self.style.map(|s| s.as_str().to_string()),
            confidence: style_confidence(self),
        }
    }
}

/// Outcome of a background-removal request
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundRemoval {
    pub processed_image_path: PathBuf,
    pub original_image_path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }
}

/// Derive outfit tags from an analysis.
///
/// Order: analyzer tags, then category/color/style of confident items,
/// then occasion, style and dominant colors. First occurrence wins.
pub fn generate_tags(analysis: &ClothingAnalysis) -> Vec<String> {
    let mut candidates: Vec<&str> = analysis.tags.iter().map(String::as_str).collect();

    for item in &analysis.clothing_items {
        if item.confidence > TAG_CONFIDENCE_THRESHOLD {
            candidates.push(item.category.as_str());
            if !item.color.is_empty() {
                candidates.push(&item.color);
            }
            if let Some(style) = &item.style {
                candidates.push(style);
            }
        }
    }

    if let Some(occasion) = analysis.occasion {
        candidates.push(occasion.as_str());
    }
    if let Some(style) = analysis.style {
        candidates.push(style.as_str());
    }
    candidates.extend(analysis.dominant_colors.iter().map(String::as_str));

    let mut tags: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !tags.iter().any(|t| t == candidate) {
            tags.push(candidate.to_string());
        }
    }
    tags
}

/// Mean item confidence as a 0-100 percentage; 0 when nothing was detected
pub fn style_confidence(analysis: &ClothingAnalysis) -> u32 {
    let items = &analysis.clothing_items;
    if items.is_empty() {
        return 0;
    }
    let mean = items.iter().map(|i| i.confidence).sum::<f64>() / items.len() as f64;
    (mean * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Classify by item count and number of dominant colors
pub fn outfit_complexity(analysis: &ClothingAnalysis) -> Complexity {
    let item_count = analysis.clothing_items.len();
    let color_count = analysis.dominant_colors.len();

    if item_count <= 3 && color_count <= 2 {
        Complexity::Simple
    } else if item_count <= 5 && color_count <= 4 {
        Complexity::Moderate
    } else {
        Complexity::Complex
    }
}

/// Short recommendations for wearing the analyzed outfit in this weather
pub fn weather_recommendations(
    temperature: f64,
    condition: &str,
    analysis: &ClothingAnalysis,
) -> Vec<String> {
    let mut recommendations = Vec::new();
    let items = &analysis.clothing_items;

    if temperature < 50.0 && !items.iter().any(|i| i.category == ClothingCategory::Outerwear) {
        recommendations.push("Consider adding a jacket or coat".to_string());
    }

    if temperature > 80.0 {
        let heavy = items.iter().any(|i| {
            i.category == ClothingCategory::Outerwear
                || i.style.as_deref().map(|s| s.contains("heavy")).unwrap_or(false)
        });
        if heavy {
            recommendations.push("This outfit might be too warm for the weather".to_string());
        }
    }

    if condition.to_lowercase().contains("rain") {
        recommendations.push("Consider waterproof outerwear".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: ClothingCategory, confidence: f64, color: &str, style: Option<&str>) -> ClothingItem {
        ClothingItem {
            category,
            confidence,
            color: color.to_string(),
            style: style.map(str::to_string),
            brand: None,
            bounding_box: None,
        }
    }

    fn analysis(items: Vec<ClothingItem>, colors: &[&str]) -> ClothingAnalysis {
        ClothingAnalysis {
            clothing_items: items,
            dominant_colors: colors.iter().map(|c| c.to_string()).collect(),
            occasion: None,
            style: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_generate_tags_order_and_dedup() {
        let mut a = analysis(
            vec![
                item(ClothingCategory::Top, 0.9, "blue", Some("casual")),
                item(ClothingCategory::Shoes, 0.6, "red", Some("boots")),
                item(ClothingCategory::Bottom, 0.8, "blue", None),
            ],
            &["blue", "grey"],
        );
        a.tags = vec!["everyday".to_string(), "casual".to_string()];
        a.occasion = Some(Occasion::Casual);
        a.style = Some(StyleKind::Classic);

        let tags = generate_tags(&a);
        assert_eq!(
            tags,
            vec!["everyday", "casual", "top", "blue", "bottom", "classic", "grey"]
        );
    }

    #[test]
    fn test_generate_tags_skips_low_confidence() {
        let a = analysis(vec![item(ClothingCategory::Dress, 0.7, "red", None)], &[]);
        assert!(generate_tags(&a).is_empty(), "0.7 is not above the threshold");
    }

    #[test]
    fn test_generate_tags_never_duplicates() {
        let a = ClothingAnalysis {
            clothing_items: vec![
                item(ClothingCategory::Top, 0.95, "top", Some("top")),
                item(ClothingCategory::Top, 0.95, "top", Some("top")),
            ],
            dominant_colors: vec!["top".to_string(), "top".to_string()],
            occasion: Some(Occasion::Party),
            style: Some(StyleKind::Trendy),
            tags: vec!["party".to_string(), "party".to_string()],
        };
        let tags = generate_tags(&a);
        let mut deduped = tags.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(tags.len(), deduped.len());
        assert_eq!(tags, vec!["party", "top", "trendy"]);
    }

    #[test]
    fn test_style_confidence() {
        let a = analysis(
            vec![
                item(ClothingCategory::Top, 0.9, "blue", None),
                item(ClothingCategory::Bottom, 0.85, "black", None),
                item(ClothingCategory::Shoes, 0.8, "white", None),
            ],
            &[],
        );
        assert_eq!(style_confidence(&a), 85);
        assert_eq!(style_confidence(&ClothingAnalysis::fallback()), 50);
    }

    #[test]
    fn test_style_confidence_empty_is_zero() {
        assert_eq!(style_confidence(&analysis(Vec::new(), &["red"])), 0);
    }

    #[test]
    fn test_outfit_complexity() {
        let three = || {
            vec![
                item(ClothingCategory::Top, 0.9, "a", None),
                item(ClothingCategory::Bottom, 0.9, "b", None),
                item(ClothingCategory::Shoes, 0.9, "c", None),
            ]
        };
        assert_eq!(outfit_complexity(&analysis(three(), &["a", "b"])), Complexity::Simple);
        assert_eq!(outfit_complexity(&analysis(three(), &["a", "b", "c"])), Complexity::Moderate);

        let mut six = three();
        six.extend(three());
        assert_eq!(outfit_complexity(&analysis(six, &["a"])), Complexity::Complex);
        assert_eq!(
            outfit_complexity(&analysis(three(), &["a", "b", "c", "d", "e"])),
            Complexity::Complex
        );
    }

    #[test]
    fn test_summarize() {
        let mut a = ClothingAnalysis::fallback();
        a.occasion = Some(Occasion::Business);
        let summary = a.summarize();
        assert_eq!(summary.confidence, 50);
        assert_eq!(summary.occasion.as_deref(), Some("business"));
        assert_eq!(summary.style, None);
        assert_eq!(summary.clothing_items, a.clothing_items);
    }

    #[test]
    fn test_weather_recommendations() {
        let no_coat = analysis(vec![item(ClothingCategory::Top, 0.9, "blue", None)], &[]);
        assert_eq!(
            weather_recommendations(40.0, "Clear sky", &no_coat),
            vec!["Consider adding a jacket or coat"]
        );

        let coat = analysis(vec![item(ClothingCategory::Outerwear, 0.9, "tan", None)], &[]);
        assert!(weather_recommendations(40.0, "Clear sky", &coat).is_empty());
        assert_eq!(
            weather_recommendations(85.0, "Light rain", &coat),
            vec![
                "This outfit might be too warm for the weather",
                "Consider waterproof outerwear"
            ]
        );

        let heavy = analysis(vec![item(ClothingCategory::Top, 0.9, "grey", Some("heavy knit"))], &[]);
        assert_eq!(weather_recommendations(90.0, "Sunny", &heavy).len(), 1);
    }
}

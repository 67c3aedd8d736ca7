//! Threshold rules mapping a weather reading to outfit advice.
//!
//! Everything here is pure: same inputs, same output, no failure mode.

use serde::{Deserialize, Serialize};

use super::WeatherData;

/// Starting point of every comfort score
const BASE_COMFORT_SCORE: i32 = 50;

const JACKET_TERMS: [&str; 4] = ["jacket", "coat", "outerwear", "sweater"];
const LIGHT_CLOTHING_TERMS: [&str; 4] = ["t-shirt", "tank top", "shorts", "dress"];
const WATERPROOF_TERMS: [&str; 3] = ["waterproof", "rain", "umbrella"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Add,
    Remove,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub item: String,
    pub reason: String,
    pub priority: Priority,
}

impl OutfitSuggestion {
    fn new(kind: SuggestionKind, item: &str, reason: &str, priority: Priority) -> Self {
        Self {
            kind,
            item: item.to_string(),
            reason: reason.to_string(),
            priority,
        }
    }
}

/// Suggestions for the given conditions.
///
/// At most one temperature band fires, then every matching condition rule
/// appends its own suggestions. Nothing is suppressed or reordered.
pub fn suggestions_for(weather: &WeatherData) -> Vec<OutfitSuggestion> {
    use Priority::*;
    use SuggestionKind::*;

    let mut suggestions = Vec::new();
    let temp = weather.temperature;
    let condition = weather.condition.to_lowercase();

    if temp < 32.0 {
        suggestions.push(OutfitSuggestion::new(Add, "Heavy winter coat", "Freezing temperature", High));
        suggestions.push(OutfitSuggestion::new(Add, "Warm layers", "Very cold weather", High));
    } else if temp < 50.0 {
        suggestions.push(OutfitSuggestion::new(Add, "Light jacket or sweater", "Cool temperature", Medium));
    } else if temp > 80.0 {
        suggestions.push(OutfitSuggestion::new(Remove, "Heavy layers", "Hot weather", Medium));
        suggestions.push(OutfitSuggestion::new(Add, "Light, breathable fabrics", "High temperature", Medium));
    }

    if condition.contains("rain") {
        suggestions.push(OutfitSuggestion::new(Add, "Waterproof jacket", "Rain expected", High));
        suggestions.push(OutfitSuggestion::new(Add, "Waterproof shoes", "Wet conditions", Medium));
    }

    if condition.contains("snow") {
        suggestions.push(OutfitSuggestion::new(Add, "Winter boots", "Snow on ground", High));
        suggestions.push(OutfitSuggestion::new(
            Add,
            "Warm accessories (hat, gloves)",
            "Snowy conditions",
            Medium,
        ));
    }

    if condition.contains("wind") && weather.wind_speed > 15.0 {
        suggestions.push(OutfitSuggestion::new(Add, "Windbreaker", "Windy conditions", Medium));
    }

    if weather.humidity > 70.0 && temp > 70.0 {
        suggestions.push(OutfitSuggestion::new(Add, "Moisture-wicking fabrics", "High humidity", Low));
    }

    suggestions
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComfortLevel {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ComfortLevel {
    /// Band a clamped 0-100 score
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ComfortLevel::Excellent,
            65..=79 => ComfortLevel::Good,
            45..=64 => ComfortLevel::Fair,
            _ => ComfortLevel::Poor,
        }
    }

    pub fn feedback(&self) -> &'static str {
        match self {
            ComfortLevel::Excellent => "Perfect outfit for the weather!",
            ComfortLevel::Good => "Great choice for the conditions",
            ComfortLevel::Fair => "Decent outfit, might need minor adjustments",
            ComfortLevel::Poor => "Consider changing outfit for better comfort",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComfortLevel::Excellent => "excellent",
            ComfortLevel::Good => "good",
            ComfortLevel::Fair => "fair",
            ComfortLevel::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComfortReport {
    pub level: ComfortLevel,
    /// 0 to 100
    pub score: u8,
    pub feedback: String,
}

fn has_any(tags: &[String], terms: &[&str]) -> bool {
    tags.iter()
        .any(|tag| terms.iter().any(|term| tag.eq_ignore_ascii_case(term)))
}

/// Score how well an outfit with `tags` suits the weather
pub fn comfort_score_for(weather: &WeatherData, tags: &[String]) -> ComfortReport {
    let temp = weather.temperature;
    let condition = weather.condition.to_lowercase();

    let has_jacket = has_any(tags, &JACKET_TERMS);
    let has_light_clothing = has_any(tags, &LIGHT_CLOTHING_TERMS);
    let has_waterproof = has_any(tags, &WATERPROOF_TERMS);

    let mut score = BASE_COMFORT_SCORE;

    if temp < 50.0 {
        score += if has_jacket { 20 } else { -30 };
    }
    if temp > 75.0 {
        if has_light_clothing {
            score += 15;
        }
        if has_jacket {
            score -= 20;
        }
    }
    if condition.contains("rain") {
        score += if has_waterproof { 25 } else { -25 };
    }

    let score = score.clamp(0, 100) as u8;
    let level = ComfortLevel::from_score(score);
    ComfortReport {
        level,
        score,
        feedback: level.feedback().to_string(),
    }
}

/// Weather readings and weather-based outfit advice
///
/// - Current conditions come from a `WeatherProvider` (provider.rs)
/// - Suggestions and comfort scoring are pure rules (rules.rs)

pub mod provider;
pub mod rules;

use serde::{Deserialize, Serialize};

use crate::state::data::WeatherSnapshot;

pub use provider::{MockWeatherProvider, WeatherProvider};
pub use rules::{comfort_score_for, suggestions_for, ComfortLevel, ComfortReport, OutfitSuggestion};

/// Humidity (%) assumed when replaying a stored snapshot
const REPLAY_HUMIDITY: f64 = 50.0;
/// Wind speed (mph) assumed when replaying a stored snapshot
const REPLAY_WIND_SPEED: f64 = 8.0;

/// Current conditions at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    /// Degrees Fahrenheit
    pub temperature: f64,
    pub condition: String,
    /// Relative humidity, percent
    pub humidity: f64,
    /// Miles per hour
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
    pub location: String,
}

impl WeatherData {
    /// Reading used when no provider data is available
    pub fn fallback() -> Self {
        WeatherData {
            temperature: 70.0,
            condition: "Partly cloudy".to_string(),
            humidity: 50.0,
            wind_speed: 8.0,
            description: "Pleasant weather".to_string(),
            icon: "🌤️".to_string(),
            location: "Unknown Location".to_string(),
        }
    }

    /// Subset stored on an outfit record
    pub fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: self.temperature,
            condition: self.condition.clone(),
            location: self.location.clone(),
        }
    }

    /// Rebuild a reading from a stored snapshot.
    /// Fields the snapshot lacks take neutral values that no rule fires on.
    /// Snapshots keep no humidity or wind; replays assume typical values.
    pub fn from_snapshot(snapshot: &WeatherSnapshot) -> Self {
        WeatherData {
            temperature: snapshot.temperature,
            condition: snapshot.condition.clone(),
            humidity: REPLAY_HUMIDITY,
            wind_speed: REPLAY_WIND_SPEED,
            description: snapshot.condition.clone(),
            icon: provider::weather_emoji(&snapshot.condition).to_string(),
            location: snapshot.location.clone(),
        }
    }
}

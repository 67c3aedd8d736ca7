use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::future::Future;
use std::sync::Mutex;

use super::WeatherData;

/// Source of current conditions.
/// Implementations never fail; they fall back to `WeatherData::fallback()`.
pub trait WeatherProvider: Send + Sync {
    fn current_weather(&self, latitude: f64, longitude: f64) -> impl Future<Output = WeatherData> + Send;
}

/// (condition, temperature °F, description)
const MOCK_CONDITIONS: [(&str, f64, &str); 4] = [
    ("Clear sky", 72.0, "Sunny and pleasant"),
    ("Light rain", 58.0, "Light rain showers"),
    ("Partly cloudy", 68.0, "Partly cloudy skies"),
    ("Snow", 28.0, "Light snow falling"),
];

/// Development provider returning one of a few canned readings
#[derive(Debug)]
pub struct MockWeatherProvider {
    rng: Mutex<StdRng>,
}

impl Default for MockWeatherProvider {
    fn default() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl MockWeatherProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reproducible readings for tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn sample(&self) -> Option<WeatherData> {
        let mut rng = self.rng.lock().ok()?;
        let (condition, temperature, description) =
            MOCK_CONDITIONS[rng.gen_range(0..MOCK_CONDITIONS.len())];

        Some(WeatherData {
            temperature,
            condition: condition.to_string(),
            humidity: f64::from(rng.gen_range(40u8..80)),
            wind_speed: f64::from(rng.gen_range(5u8..20)),
            description: description.to_string(),
            icon: weather_emoji(condition).to_string(),
            location: "Your Location".to_string(),
        })
    }
}

impl WeatherProvider for MockWeatherProvider {
    async fn current_weather(&self, latitude: f64, longitude: f64) -> WeatherData {
        tracing::debug!("Mock weather lookup at ({}, {})", latitude, longitude);
        match self.sample() {
            Some(reading) => reading,
            None => {
                tracing::error!("Failed to fetch weather: mock generator unavailable");
                WeatherData::fallback()
            }
        }
    }
}

/// Display icon for a condition string
pub fn weather_emoji(condition: &str) -> &'static str {
    let condition = condition.to_lowercase();

    if condition.contains("clear") || condition.contains("sunny") {
        "☀️"
    } else if condition.contains("cloud") {
        "☁️"
    } else if condition.contains("rain") {
        "🌧️"
    } else if condition.contains("snow") {
        "❄️"
    } else if condition.contains("thunder") || condition.contains("storm") {
        "⛈️"
    } else if condition.contains("fog") || condition.contains("mist") {
        "🌫️"
    } else if condition.contains("wind") {
        "💨"
    } else {
        "🌤️"
    }
}

/// Dressing tips for a zero-based month (0 = January)
pub fn seasonal_tips(month0: u32) -> &'static [&'static str] {
    match month0 {
        0 => &["Layer up for winter", "Don't forget warm accessories"],
        1 => &["Still cold - keep layering", "Waterproof boots recommended"],
        2 => &["Spring layers are key", "Light jacket for cool mornings"],
        3 => &["Perfect for light jackets", "Comfortable walking weather"],
        4 => &["Great weather for most outfits", "Light layers work well"],
        5 => &["Summer is here", "Light, breathable fabrics"],
        6 => &["Stay cool and comfortable", "Sun protection recommended"],
        7 => &["Hot weather continues", "Minimal layers needed"],
        8 => &["Early fall transition", "Light layers return"],
        9 => &["Sweater weather begins", "Perfect for layering"],
        10 => &["Cool and crisp", "Time for coats and jackets"],
        11 => &["Winter prep time", "Heavy layers and warm accessories"],
        _ => &["Dress appropriately for the weather"],
    }
}

/// Whether a reading taken at `fetched_at` is less than an hour old
pub fn is_fresh(fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    fetched_at > now - Duration::hours(1)
}

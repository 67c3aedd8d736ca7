//! # fitcheck
//!
//! Outfit logging core:
//! - Outfit records in a key-value store (state)
//! - Photo and thumbnail files (media)
//! - Mock clothing analysis behind `ClothingAnalyzer` (analysis)
//! - Weather provider and comfort rules (weather)
//! - Capture flow and day-to-day outfit operations (capture, wardrobe)

pub mod analysis;
pub mod capture;
pub mod config;
pub mod error;
pub mod media;
pub mod state;
pub mod wardrobe;
pub mod weather;

pub use capture::{CapturePipeline, CaptureReport};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use media::MediaStore;
pub use state::data::Outfit;
pub use state::library::OutfitLibrary;
pub use wardrobe::Wardrobe;

//! Search, sort and summary views over a loaded outfit collection

use chrono::{DateTime, Duration, Utc};
use std::str::FromStr;

use super::data::Outfit;
use crate::error::Error;

/// Sort order selected in the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GalleryFilter {
    /// Keep the input order
    #[default]
    All,
    /// Newest date first
    Recent,
    /// Highest wear count first
    MostWorn,
}

impl FromStr for GalleryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(GalleryFilter::All),
            "recent" => Ok(GalleryFilter::Recent),
            "most_worn" => Ok(GalleryFilter::MostWorn),
            other => Err(Error::InvalidInput(format!("unknown gallery filter: {}", other))),
        }
    }
}

/// A search string plus sort order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryQuery {
    pub search: String,
    pub filter: GalleryFilter,
}

impl GalleryQuery {
    pub fn new(search: impl Into<String>, filter: GalleryFilter) -> Self {
        Self {
            search: search.into(),
            filter,
        }
    }

    /// Filter by search, then sort.
    /// Sorts are stable: ties keep their input order.
    pub fn apply(&self, outfits: &[Outfit]) -> Vec<Outfit> {
        let needle = self.search.to_lowercase();
        let mut filtered: Vec<Outfit> = outfits
            .iter()
            .filter(|o| matches_search(o, &needle))
            .cloned()
            .collect();

        match self.filter {
            GalleryFilter::All => {}
            GalleryFilter::Recent => filtered.sort_by(|a, b| b.date.cmp(&a.date)),
            GalleryFilter::MostWorn => filtered.sort_by(|a, b| b.wear_count.cmp(&a.wear_count)),
        }

        filtered
    }
}

/// `needle` must already be lowercase; an empty needle matches everything
fn matches_search(outfit: &Outfit, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    outfit.title.to_lowercase().contains(needle)
        || outfit.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

/// Reverse insertion order, the gallery's default newest-first listing
pub fn newest_first(mut outfits: Vec<Outfit>) -> Vec<Outfit> {
    outfits.reverse();
    outfits
}

/// Headline numbers for the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryStats {
    pub total_outfits: usize,
    /// Outfits dated within the last seven days
    pub this_week: usize,
    pub total_wears: u64,
}

impl GalleryStats {
    pub fn compute(outfits: &[Outfit], now: DateTime<Utc>) -> Self {
        let week_ago = now - Duration::days(7);
        GalleryStats {
            total_outfits: outfits.len(),
            this_week: outfits
                .iter()
                .filter(|o| o.date >= week_ago && o.date <= now)
                .count(),
            total_wears: outfits.iter().map(|o| u64::from(o.wear_count)).sum(),
        }
    }
}

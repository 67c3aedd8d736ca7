use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use fitcheck::analysis::MockClothingAnalyzer;
use fitcheck::config::{AppConfig, DATABASE_FILE};
use fitcheck::state::data::Outfit;
use fitcheck::state::gallery::{GalleryFilter, GalleryQuery};
use fitcheck::state::kv::SqliteStore;
use fitcheck::weather::provider::seasonal_tips;
use fitcheck::weather::{suggestions_for, MockWeatherProvider, OutfitSuggestion, WeatherProvider};
use fitcheck::{CapturePipeline, MediaStore, OutfitLibrary, Wardrobe};

/// Log outfits, track wears and check them against the weather
#[derive(Parser, Debug)]
#[command(name = "fitcheck", version, about)]
struct Cli {
    /// Data directory (database, photos, thumbnails)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a photo as a new outfit
    Capture {
        photo: PathBuf,
        /// Also produce a background-removed copy
        #[arg(long)]
        remove_background: bool,
    },
    /// List outfits, newest first
    List {
        /// Match against titles and tags
        #[arg(short, long, default_value = "")]
        search: String,
        /// all, recent or most_worn
        #[arg(short, long, default_value = "all")]
        filter: GalleryFilter,
    },
    /// Show one outfit
    Show {
        id: String,
    },
    /// Log that an outfit was worn
    Wear {
        id: String,
    },
    /// Delete an outfit and its files
    Delete {
        id: String,
    },
    /// Weather advice for a stored outfit
    Advise {
        id: String,
    },
    /// Current weather and what to wear
    Forecast,
    /// Library and storage summary
    Status,
}

/// Services built from the resolved configuration
struct App {
    config: AppConfig,
    library: Arc<OutfitLibrary>,
    media: MediaStore,
}

impl App {
    async fn open(cli: &Cli) -> Result<Self> {
        let config = AppConfig::load(cli.config.as_deref())?;
        let data_dir = config.resolve_data_dir(cli.data_dir.as_deref());

        let store = SqliteStore::open(data_dir.join(DATABASE_FILE))
            .context("Failed to open the outfit database")?;
        let library = Arc::new(OutfitLibrary::with_key(
            Arc::new(store),
            config.storage_key.clone(),
        ));
        let media = MediaStore::with_dirs(
            data_dir.join(&config.photos_dir),
            data_dir.join(&config.thumbnails_dir),
        );

        if let Err(e) = media.ensure_directories().await {
            warn!("Failed to initialize storage: {}", e);
        }

        info!("Data directory: {}", data_dir.display());
        Ok(App { config, library, media })
    }

    fn wardrobe(&self) -> Wardrobe {
        Wardrobe::new(Arc::clone(&self.library), self.media.clone())
    }

    fn pipeline(&self, remove_background: bool) -> CapturePipeline<MockClothingAnalyzer, MockWeatherProvider> {
        CapturePipeline::new(
            Arc::clone(&self.library),
            self.media.clone(),
            MockClothingAnalyzer::new(
                self.config.analysis_delay(),
                self.config.background_removal_delay(),
            ),
            MockWeatherProvider::new(),
        )
        .with_location(self.config.latitude, self.config.longitude)
        .with_background_removal(remove_background)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let app = App::open(&cli).await?;
    let wardrobe = app.wardrobe();

    match &cli.command {
        Command::Capture {
            photo,
            remove_background,
        } => {
            let report = app
                .pipeline(*remove_background)
                .capture(photo)
                .await
                .with_context(|| format!("Failed to save outfit from {}", photo.display()))?;

            let outfit = &report.outfit;
            let confidence = outfit.ai_analysis.as_ref().map(|a| a.confidence).unwrap_or(0);
            println!("✅ Outfit analyzed: {}", outfit.id);
            println!(
                "   Detected {} clothing items with {}% confidence ({})",
                report.analysis.clothing_items.len(),
                confidence,
                report.complexity.as_str()
            );
            println!("   Tags: {}", outfit.tags.iter().take(3).cloned().collect::<Vec<_>>().join(", "));
            println!("   Thumbnail: {}", report.thumbnail_path.display());
            if let Some(processed) = &outfit.processed_image_path {
                println!("   Background removed: {}", processed);
            }
            for note in &report.recommendations {
                println!("   • {}", note);
            }
            println!(
                "   Comfort: {} ({}) - {}",
                report.comfort.level.as_str(),
                report.comfort.score,
                report.comfort.feedback
            );
            print_suggestions(&report.suggestions);
        }
        Command::List { search, filter } => {
            let outfits = wardrobe.browse(&GalleryQuery::new(search.clone(), *filter)).await;
            if outfits.is_empty() {
                println!("No outfits found");
            }
            for outfit in &outfits {
                println!(
                    "{}  {}  {}  worn {}x  [{}]",
                    outfit.id,
                    outfit.date.format("%Y-%m-%d"),
                    outfit.title,
                    outfit.wear_count,
                    outfit.tags.join(", ")
                );
            }
        }
        Command::Show { id } => {
            let outfit = wardrobe
                .library()
                .get(id)
                .await
                .with_context(|| format!("No outfit with id {}", id))?;
            let thumbnail = wardrobe.media().thumbnail_path(id).await;
            print_outfit(&outfit, thumbnail.as_deref());
        }
        Command::Wear { id } => match wardrobe.log_wear(id).await? {
            Some(outfit) => println!("Outfit logged! Wear count: {}", outfit.wear_count),
            None => println!("No outfit with id {}", id),
        },
        Command::Delete { id } => match wardrobe.delete_outfit(id).await? {
            Some(outfit) => println!("Deleted {}", outfit.id),
            None => println!("No outfit with id {}", id),
        },
        Command::Advise { id } => match wardrobe.assess(id).await {
            Some(assessment) => {
                println!(
                    "{} {}°F {} ({})",
                    assessment.weather.icon,
                    assessment.weather.temperature,
                    assessment.weather.condition,
                    assessment.weather.location
                );
                if !assessment.fresh {
                    println!("   (recorded when the outfit was captured)");
                }
                println!(
                    "Comfort: {} ({}) - {}",
                    assessment.comfort.level.as_str(),
                    assessment.comfort.score,
                    assessment.comfort.feedback
                );
                print_suggestions(&assessment.suggestions);
            }
            None => println!("No weather recorded for {}", id),
        },
        Command::Forecast => {
            let weather = MockWeatherProvider::new()
                .current_weather(app.config.latitude, app.config.longitude)
                .await;
            println!(
                "{} {}°F {} - {} (humidity {}%, wind {} mph)",
                weather.icon,
                weather.temperature,
                weather.condition,
                weather.description,
                weather.humidity,
                weather.wind_speed
            );
            print_suggestions(&suggestions_for(&weather));
            for tip in seasonal_tips(Utc::now().month0()) {
                println!("   💡 {}", tip);
            }
        }
        Command::Status => {
            let stats = wardrobe.stats(Utc::now()).await;
            let usage = wardrobe.media().usage().await?;
            println!(
                "{} outfits ({} this week), {} wears logged",
                stats.total_outfits, stats.this_week, stats.total_wears
            );
            println!(
                "{} photos ({} KB), {} thumbnails ({} KB)",
                usage.photo_count,
                usage.photo_bytes / 1024,
                usage.thumbnail_count,
                usage.thumbnail_bytes / 1024
            );
        }
    }

    Ok(())
}

fn print_suggestions(suggestions: &[OutfitSuggestion]) {
    for s in suggestions {
        println!("   [{:?}] {:?} {}: {}", s.priority, s.kind, s.item, s.reason);
    }
}

fn print_outfit(outfit: &Outfit, thumbnail: Option<&Path>) {
    println!("{} - {}", outfit.id, outfit.title);
    println!("   Taken on {}", outfit.date.format("%Y-%m-%d %H:%M"));
    println!("   Photo: {}", outfit.image_path);
    if let Some(thumb) = thumbnail {
        println!("   Thumbnail: {}", thumb.display());
    }
    println!("   Worn {} times", outfit.wear_count);
    if let Some(last) = outfit.last_worn {
        println!("   Last worn: {}", last.format("%Y-%m-%d"));
    }
    if let Some(cost) = outfit.cost {
        println!("   Cost: ${:.2}", cost);
    }
    if let Some(per_wear) = outfit.cost_per_wear() {
        println!("   Cost per wear: ${:.2}", per_wear);
    }
    if !outfit.tags.is_empty() {
        println!("   Tags: {}", outfit.tags.join(", "));
    }
    if let Some(analysis) = &outfit.ai_analysis {
        println!(
            "   {} items, {}% confidence",
            analysis.clothing_items.len(),
            analysis.confidence
        );
    }
}

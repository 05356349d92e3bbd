//! Anime catalog CLI application.

use anime_catalog::api::{CatalogApi, JikanClient, RequestGate, Season};
use anime_catalog::controller::SearchController;
use anime_catalog::render;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::{Config, DataPaths, Language, PreferenceStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse the MyAnimeList catalog", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the most popular anime
    Top,

    /// Search the catalog, optionally loading further pages
    Search {
        /// Search text
        query: String,

        /// Number of result pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },

    /// Show full details for one entry
    Show {
        /// MyAnimeList ID
        id: u32,
    },

    /// List anime of a broadcast season (defaults to the current one)
    Seasonal {
        #[arg(long)]
        year: Option<i32>,

        /// winter, spring, summer or fall
        #[arg(long)]
        season: Option<Season>,
    },

    /// List entries recommended alongside one entry
    Recommend {
        /// MyAnimeList ID
        id: u32,

        /// Maximum recommendations to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Show, set or toggle the display language
    Language {
        #[command(subcommand)]
        action: Option<LanguageAction>,
    },
}

#[derive(Subcommand, Debug)]
enum LanguageAction {
    /// Switch between Indonesian and English
    Toggle,
    /// Set a specific language (id or en)
    Set { language: Language },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        shared::logging::parse_level(&config.logging.default_level)
    };

    shared::logging::init(shared::LogConfig {
        log_dir: config.log_dir().to_string_lossy().to_string(),
        component: "anime-catalog".to_string(),
        default_level: log_level,
        console: config.logging.console,
        file: config.logging.file,
        json_format: config.logging.json_format,
    })?;

    info!(config_file = %args.config.display(), "Anime catalog starting");

    let data_paths = DataPaths::new(config.data_dir());
    data_paths
        .create_dirs()
        .context("Failed to create data directories")?;

    let preferences = PreferenceStore::new(data_paths.preferences_file());
    let language = preferences.language();

    if let Command::Language { action } = &args.command {
        let language = match action {
            None => language,
            Some(LanguageAction::Toggle) => preferences.toggle_language()?,
            Some(LanguageAction::Set { language }) => {
                preferences.set_language(*language)?;
                *language
            }
        };
        let t = language.translations();
        println!("{}: {}", t.language, t.language_name(language));
        return Ok(());
    }

    let t = language.translations();

    // One gate for the whole process
    let gate = Arc::new(RequestGate::with_interval(config.min_interval()));
    let client = JikanClient::builder()
        .base_url(config.catalog.base_url.clone())
        .user_agent(config.catalog.user_agent.clone())
        .timeout(config.request_timeout())
        .gate(gate)
        .build()
        .context("Failed to create Jikan client")?;

    let controller = SearchController::new(client)
        .with_page_size(config.catalog.page_size)
        .with_selection_linger(config.selection_linger());

    match args.command {
        Command::Top => {
            controller.mount().await;
            print!("{}", render::listing(&controller.snapshot(), t));
        }
        Command::Search { query, pages } => {
            controller.submit_search(&query).await;
            for _ in 1..pages {
                if !controller.load_more().await {
                    break;
                }
            }
            print!("{}", render::listing(&controller.snapshot(), t));
        }
        Command::Show { id } => {
            let entry = controller
                .api()
                .anime_by_id(id)
                .await
                .with_context(|| format!("Failed to fetch anime {}", id))?;
            controller.select(entry);
            if let Some(entry) = controller.selected() {
                print!("{}", render::details(&entry, t));
            }
            controller.close_detail();
        }
        Command::Seasonal { year, season } => {
            let page = controller
                .api()
                .seasonal_anime(year, season)
                .await
                .context("Failed to fetch seasonal anime")?;
            for entry in &page.data {
                println!("{}", render::entry_line(entry, t));
            }
        }
        Command::Recommend { id, limit } => {
            let recs = controller
                .api()
                .recommendations(id)
                .await
                .with_context(|| format!("Failed to fetch recommendations for {}", id))?;
            for rec in recs.iter().take(limit) {
                println!("{}", render::recommendation_line(rec));
            }
        }
        Command::Language { .. } => {}
    }

    info!("Anime catalog finished");

    Ok(())
}

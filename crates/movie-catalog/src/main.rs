//! Movie catalog CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use movie_catalog::{FilterCriteria, Movie, MovieCatalog, RATING_THRESHOLDS};
use shared::{Config, DataPaths};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Filter the local movie catalog", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Movie catalog JSON file (overrides the configured catalog)
    #[arg(long, conflicts_with = "named")]
    catalog: Option<PathBuf>,

    /// Name of a catalog stored under the data directory
    #[arg(long)]
    named: Option<String>,

    /// Text to look for in title, description or director
    #[arg(short, long, default_value = "")]
    search: String,

    /// Exact genre to keep
    #[arg(short, long)]
    genre: Option<String>,

    /// Release year to keep
    #[arg(short, long)]
    year: Option<i32>,

    /// Minimum rating (presets: 0, 7, 8, 8.5)
    #[arg(short, long, default_value_t = 0.0)]
    min_rating: f64,

    /// Print the available genres and years instead of movies
    #[arg(long)]
    options: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
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
        component: "movie-catalog".to_string(),
        default_level: log_level,
        console: config.logging.console,
        file: config.logging.file,
        json_format: config.logging.json_format,
    })?;

    info!(config_file = %args.config.display(), "Movie catalog starting");

    let data_paths = DataPaths::new(config.data_dir());
    let source = match (&args.catalog, &args.named) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(name)) => Some(data_paths.movie_catalog(name)?),
        (None, None) => config.movie_catalog_path(),
    };

    let mut catalog = match source {
        Some(path) => MovieCatalog::from_file(&path)?,
        None => MovieCatalog::bundled()?,
    };

    if args.options {
        if args.json {
            println!("{}", serde_json::to_string_pretty(catalog.options())?);
        } else {
            let options = catalog.options();
            println!("Genres: {}", options.genres.join(", "));
            let years: Vec<String> = options.years.iter().map(|y| y.to_string()).collect();
            println!("Years: {}", years.join(", "));
            let ratings: Vec<String> = RATING_THRESHOLDS.iter().map(|r| format!("{}+", r)).collect();
            println!("Ratings: {}", ratings.join(", "));
        }
        return Ok(());
    }

    if !RATING_THRESHOLDS.contains(&args.min_rating) {
        warn!(min_rating = args.min_rating, "Minimum rating is not one of the presets");
    }

    let criteria = FilterCriteria {
        search_term: args.search,
        genre: args.genre,
        year: args.year,
        min_rating: args.min_rating,
    };

    let total = catalog.movies().len();
    let matches = catalog.filtered(&criteria);
    info!(matches = matches.len(), total, "Catalog filtered");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No movies match the current filters.");
        return Ok(());
    }

    if criteria.is_active() {
        println!("{} of {} movies (filters active)", matches.len(), total);
    } else {
        println!("All {} movies", total);
    }
    println!();
    for movie in matches {
        print_movie(movie);
    }

    Ok(())
}

fn print_movie(movie: &Movie) {
    println!(
        "{} ({}) ★ {:.1}  {}",
        movie.title,
        movie.year,
        movie.rating,
        movie.runtime_label()
    );
    if !movie.genre.is_empty() {
        println!("  Genre: {}", movie.genre.join(", "));
    }
    if !movie.director.is_empty() {
        println!("  Director: {}", movie.director);
    }
    if !movie.cast.is_empty() {
        println!("  Cast: {}", movie.cast.join(", "));
    }
    if let Some(trailer) = &movie.trailer {
        println!("  Trailer: {}", trailer);
    }
    println!();
}

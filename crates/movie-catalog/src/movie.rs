//! Movie records and the static catalog they come from.

use crate::filter::{matching_indices, FilterCriteria, FilterOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Catalog compiled into the binary
const BUNDLED_CATALOG: &str = include_str!("../data/movies.json");

/// One movie in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub backdrop: String,
    pub year: i32,
    #[serde(default)]
    pub genre: Vec<String>,
    pub rating: f64,
    /// Minutes
    #[serde(default)]
    pub runtime: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub trailer: Option<String>,
}

impl Movie {
    /// Runtime as "2h 28m"
    pub fn runtime_label(&self) -> String {
        let (hours, minutes) = (self.runtime / 60, self.runtime % 60);
        if hours == 0 {
            format!("{}m", minutes)
        } else {
            format!("{}h {}m", hours, minutes)
        }
    }
}

/// In-memory catalog with filter options derived once
#[derive(Debug, Clone)]
pub struct MovieCatalog {
    movies: Vec<Movie>,
    options: FilterOptions,
    /// Last criteria and the matching indices
    last: Option<(FilterCriteria, Vec<usize>)>,
}

impl MovieCatalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        let options = FilterOptions::from_catalog(&movies);
        debug!(
            movies = movies.len(),
            genres = options.genres.len(),
            years = options.years.len(),
            "Catalog indexed"
        );
        Self {
            movies,
            options,
            last: None,
        }
    }

    /// The catalog shipped with the binary
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG).context("Failed to parse bundled movie catalog")
    }

    /// Load a catalog from a JSON array of movies
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read movie catalog: {}", path.display()))?;

        let catalog = Self::from_json(&content)
            .with_context(|| format!("Failed to parse movie catalog: {}", path.display()))?;

        info!(
            path = %path.display(),
            movies = catalog.movies.len(),
            "Movie catalog loaded"
        );
        Ok(catalog)
    }

    fn from_json(content: &str) -> Result<Self> {
        let movies: Vec<Movie> = serde_json::from_str(content)?;
        Ok(Self::new(movies))
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Movies matching the criteria, in catalog order
    ///
    /// The previous result is reused while the criteria stay the same.
    pub fn filtered(&mut self, criteria: &FilterCriteria) -> Vec<&Movie> {
        let fresh = match &self.last {
            Some((last, _)) => last != criteria,
            None => true,
        };

        if fresh {
            let indices = matching_indices(&self.movies, criteria);
            debug!(matches = indices.len(), "Filter recomputed");
            self.last = Some((criteria.clone(), indices));
        }

        match &self.last {
            Some((_, indices)) => indices.iter().map(|&i| &self.movies[i]).collect(),
            None => Vec::new(),
        }
    }
}

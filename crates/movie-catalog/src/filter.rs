//! Local filter engine over the movie catalog.
//!
//! A movie is shown when every active criterion accepts it: the search term
//! appears in its title, description or director (case-insensitive), its
//! genres include the chosen genre, its year equals the chosen year, and its
//! rating reaches the minimum.

use crate::movie::Movie;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Minimum-rating presets offered to the user
pub const RATING_THRESHOLDS: [f64; 4] = [0.0, 7.0, 8.0, 8.5];

/// Current filter selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free text; blank matches everything
    pub search_term: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub min_rating: f64,
}

impl FilterCriteria {
    pub fn matches(&self, movie: &Movie) -> bool {
        self.matches_term(movie)
            && self.genre.as_ref().map_or(true, |g| movie.genre.contains(g))
            && self.year.map_or(true, |y| movie.year == y)
            && movie.rating >= self.min_rating
    }

    fn matches_term(&self, movie: &Movie) -> bool {
        let term = self.search_term.trim();
        if term.is_empty() {
            return true;
        }

        let term = term.to_lowercase();
        [&movie.title, &movie.description, &movie.director]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    /// Whether any criterion narrows the catalog
    pub fn is_active(&self) -> bool {
        !self.search_term.trim().is_empty()
            || self.genre.is_some()
            || self.year.is_some()
            || self.min_rating > 0.0
    }
}

/// Movies matching the criteria, in catalog order
pub fn filter_movies<'a>(movies: &'a [Movie], criteria: &FilterCriteria) -> Vec<&'a Movie> {
    matching_indices(movies, criteria)
        .into_iter()
        .map(|i| &movies[i])
        .collect()
}

/// Positions of the matching movies, ascending
pub fn matching_indices(movies: &[Movie], criteria: &FilterCriteria) -> Vec<usize> {
    movies
        .iter()
        .enumerate()
        .filter(|(_, movie)| criteria.matches(movie))
        .map(|(index, _)| index)
        .collect()
}

/// Choices for the genre and year pickers
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Alphabetical, deduplicated
    pub genres: Vec<String>,
    /// Newest first, deduplicated
    pub years: Vec<i32>,
}

impl FilterOptions {
    pub fn from_catalog(movies: &[Movie]) -> Self {
        let genres: BTreeSet<&str> = movies
            .iter()
            .flat_map(|m| m.genre.iter().map(String::as_str))
            .collect();
        let years: BTreeSet<i32> = movies.iter().map(|m| m.year).collect();

        Self {
            genres: genres.into_iter().map(String::from).collect(),
            years: years.into_iter().rev().collect(),
        }
    }
}

//! Movie catalog browser library.
//!
//! Loads a static movie catalog and derives filtered views over it.

pub mod filter;
pub mod movie;

pub use filter::{
    filter_movies, matching_indices, FilterCriteria, FilterOptions, RATING_THRESHOLDS,
};
pub use movie::{Movie, MovieCatalog};

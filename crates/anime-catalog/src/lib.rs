//! Anime catalog browser library.
//!
//! Provides a gated client for the Jikan API v4 and the search/pagination
//! controller that turns user actions into catalog requests.

pub mod api;
pub mod clock;
pub mod controller;
pub mod render;

pub use api::{CatalogApi, CatalogError, JikanClient, RequestGate};
pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{QueryState, SearchController, View};

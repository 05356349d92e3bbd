//! Jikan API v4 client implementation.
//!
//! This module provides a gated client for the Jikan API (the unofficial
//! MyAnimeList API): every request passes through one shared
//! [`RequestGate`] that keeps outbound calls at least a fixed interval apart.

pub mod catalog;
pub mod client;
pub mod error;
pub mod gate;
pub mod season;
pub mod types;

pub use catalog::{CatalogApi, LocalCatalogApi};
pub use client::{JikanClient, JikanClientBuilder, DEFAULT_BASE_URL};
pub use error::CatalogError;
pub use gate::{RequestGate, DEFAULT_MIN_INTERVAL};
pub use season::Season;
pub use types::*;

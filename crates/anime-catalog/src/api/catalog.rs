//! `CatalogApi` trait definition.

use super::error::CatalogError;
use super::season::Season;
use super::types::{AnimeEntry, PaginatedResponse, Recommendation};

/// Read-only operations against the remote catalog.
///
/// The controller only depends on this trait, so tests can drive it with a
/// scripted fake instead of a live server.
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Most popular entries, one page at a time
    async fn top_anime(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<PaginatedResponse<AnimeEntry>, CatalogError>;

    /// Free-text search ordered by ascending popularity rank
    async fn search_anime(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<PaginatedResponse<AnimeEntry>, CatalogError>;

    /// Full record for one entry
    async fn anime_by_id(&self, id: u32) -> Result<AnimeEntry, CatalogError>;

    /// Entries broadcast in a season; missing arguments mean "now"
    async fn seasonal_anime(
        &self,
        year: Option<i32>,
        season: Option<Season>,
    ) -> Result<PaginatedResponse<AnimeEntry>, CatalogError>;

    /// Entries users recommend alongside the given one
    async fn recommendations(&self, id: u32) -> Result<Vec<Recommendation>, CatalogError>;
}

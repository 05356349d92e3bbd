//! Jikan API v4 response types.
//!
//! These types represent the JSON responses from the Jikan API. Jikan sends
//! `null` for most fields it does not know, so nearly everything is optional.

use serde::{Deserialize, Serialize};

/// Generic pagination wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    /// Whether the server reported a following page
    pub fn has_next_page(&self) -> bool {
        self.pagination.has_next_page
    }
}

/// Single-item wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse<T> {
    pub data: T,
}

/// Unpaginated list wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

/// Pagination metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub last_visible_page: u32,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub items: Option<PaginationItems>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationItems {
    pub count: u32,
    pub total: u32,
    pub per_page: u32,
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeEntry {
    pub mal_id: u32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub images: AnimeImages,

    // Titles
    pub title: String,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(default)]
    pub title_japanese: Option<String>,

    // Type and status
    #[serde(rename = "type", default)]
    pub anime_type: Option<String>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub aired: Option<Aired>,
    #[serde(default)]
    pub duration: Option<String>,

    // Scores and rankings
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub scored_by: Option<u32>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub members: Option<u32>,
    #[serde(default)]
    pub favorites: Option<u32>,

    // Synopsis
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub background: Option<String>,

    // Season
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,

    // Attribution and tags
    #[serde(default)]
    pub producers: Vec<MalEntity>,
    #[serde(default)]
    pub studios: Vec<MalEntity>,
    #[serde(default)]
    pub genres: Vec<MalEntity>,
}

/// Airing state derived from the free-text status field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiringStatus {
    CurrentlyAiring,
    FinishedAiring,
    NotYetAired,
    Other,
}

impl AnimeEntry {
    /// English title when present, otherwise the primary title
    pub fn display_title(&self) -> &str {
        self.title_english
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(Some(self.title.as_str()).filter(|t| !t.is_empty()))
            .unwrap_or("Unknown Title")
    }

    /// Score with one decimal, or "N/A"
    pub fn score_label(&self) -> String {
        match self.score {
            Some(score) if score > 0.0 => format!("{:.1}", score),
            _ => "N/A".to_string(),
        }
    }

    pub fn airing_status(&self) -> Option<AiringStatus> {
        let status = self.status.as_deref()?;
        Some(match status.to_ascii_lowercase().as_str() {
            "currently airing" => AiringStatus::CurrentlyAiring,
            "finished airing" => AiringStatus::FinishedAiring,
            "not yet aired" => AiringStatus::NotYetAired,
            _ => AiringStatus::Other,
        })
    }

    /// First studio credited, if any
    pub fn lead_studio(&self) -> Option<&str> {
        self.studios.first().map(|s| s.name.as_str())
    }
}

/// Anime images
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimeImages {
    #[serde(default)]
    pub jpg: ImageSet,
    #[serde(default)]
    pub webp: Option<ImageSet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSet {
    pub image_url: Option<String>,
    pub small_image_url: Option<String>,
    pub large_image_url: Option<String>,
}

/// Aired dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aired {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub string: Option<String>,
}

/// MAL entity (genre, studio, producer, etc.)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MalEntity {
    pub mal_id: u32,
    #[serde(rename = "type", default)]
    pub entity_type: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One recommendation pointing at another entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub entry: RecommendedEntry,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub votes: u32,
}

/// The abbreviated entry embedded in a recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedEntry {
    pub mal_id: u32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub images: AnimeImages,
    pub title: String,
}

/// Error response from Jikan API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanError {
    pub status: u16,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOP_PAGE: &str = r#"{
        "pagination": {
            "last_visible_page": 1093,
            "has_next_page": true,
            "current_page": 1,
            "items": { "count": 2, "total": 27000, "per_page": 2 }
        },
        "data": [
            {
                "mal_id": 5114,
                "url": "https://myanimelist.net/anime/5114",
                "images": { "jpg": { "image_url": "a.jpg", "small_image_url": null, "large_image_url": "a_l.jpg" } },
                "title": "Fullmetal Alchemist: Brotherhood",
                "title_english": "Fullmetal Alchemist: Brotherhood",
                "title_japanese": "鋼の錬金術師 FULLMETAL ALCHEMIST",
                "type": "TV",
                "episodes": 64,
                "status": "Finished Airing",
                "score": 9.1,
                "members": 3400000,
                "year": 2009,
                "studios": [{ "mal_id": 4, "type": "anime", "name": "Bones", "url": "" }],
                "genres": [{ "mal_id": 1, "type": "anime", "name": "Action", "url": "" }]
            },
            {
                "mal_id": 60000,
                "title": "Untitled Project",
                "title_english": null,
                "episodes": null,
                "score": null,
                "status": "Not yet aired"
            }
        ]
    }"#;

    #[test]
    fn test_decode_paginated_page() {
        let page: PaginatedResponse<AnimeEntry> = serde_json::from_str(TOP_PAGE).unwrap();

        assert!(page.has_next_page());
        assert_eq!(page.pagination.current_page, Some(1));
        assert_eq!(page.data.len(), 2);

        let fma = &page.data[0];
        assert_eq!(fma.mal_id, 5114);
        assert_eq!(fma.anime_type.as_deref(), Some("TV"));
        assert_eq!(fma.lead_studio(), Some("Bones"));
        assert_eq!(fma.airing_status(), Some(AiringStatus::FinishedAiring));
        assert_eq!(fma.score_label(), "9.1");

        let sparse = &page.data[1];
        assert_eq!(sparse.display_title(), "Untitled Project");
        assert_eq!(sparse.score_label(), "N/A");
        assert_eq!(sparse.airing_status(), Some(AiringStatus::NotYetAired));
        assert!(sparse.genres.is_empty());
    }

    #[test]
    fn test_missing_pagination_defaults() {
        let page: PaginatedResponse<AnimeEntry> =
            serde_json::from_str(r#"{ "data": [] }"#).unwrap();

        assert!(!page.has_next_page());
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_display_title_fallbacks() {
        let mut entry: AnimeEntry =
            serde_json::from_str(r#"{ "mal_id": 1, "title": "Cowboy Bebop" }"#).unwrap();
        assert_eq!(entry.display_title(), "Cowboy Bebop");

        entry.title_english = Some("Cowboy Bebop (EN)".to_string());
        assert_eq!(entry.display_title(), "Cowboy Bebop (EN)");

        entry.title_english = None;
        entry.title = String::new();
        assert_eq!(entry.display_title(), "Unknown Title");
    }

    #[test]
    fn test_decode_recommendations() {
        let body = r#"{ "data": [
            { "entry": { "mal_id": 11061, "url": "u", "images": { "jpg": {} }, "title": "Hunter x Hunter (2011)" },
              "url": "https://myanimelist.net/recommendations/anime/5114-11061", "votes": 93 }
        ] }"#;

        let recs: DataResponse<Recommendation> = serde_json::from_str(body).unwrap();
        assert_eq!(recs.data[0].entry.mal_id, 11061);
        assert_eq!(recs.data[0].votes, 93);
    }
}

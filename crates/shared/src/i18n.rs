//! Display language and translated interface strings.

use serde::{Deserialize, Serialize};

/// Supported display languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Indonesian
    #[default]
    Id,
    /// English
    En,
}

impl Language {
    /// The other language
    pub fn toggled(self) -> Self {
        match self {
            Language::Id => Language::En,
            Language::En => Language::Id,
        }
    }

    /// Strings for this language
    pub fn translations(self) -> &'static Translations {
        match self {
            Language::Id => &INDONESIAN,
            Language::En => &ENGLISH,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Id => write!(f, "id"),
            Language::En => write!(f, "en"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Language::Id),
            "en" => Ok(Language::En),
            _ => Err(anyhow::anyhow!("Invalid language: {}", s)),
        }
    }
}

/// Interface strings for one language
#[derive(Debug)]
pub struct Translations {
    pub app_name: &'static str,
    pub popular_anime: &'static str,
    pub search_results: &'static str,
    pub found: &'static str,
    pub episodes: &'static str,
    pub studio: &'static str,
    pub synopsis: &'static str,
    pub background: &'static str,
    pub status: &'static str,
    pub aired: &'static str,
    pub studios: &'static str,
    pub producers: &'static str,
    pub genres: &'static str,
    pub rank: &'static str,
    pub popularity: &'static str,
    pub members: &'static str,
    pub favorites: &'static str,
    pub currently_airing: &'static str,
    pub finished_airing: &'static str,
    pub not_yet_aired: &'static str,
    pub load_more: &'static str,
    pub try_again: &'static str,
    pub error_title: &'static str,
    pub load_error: &'static str,
    pub search_error: &'static str,
    pub no_results: &'static str,
    pub no_results_desc: &'static str,
    pub language: &'static str,
    pub indonesian: &'static str,
    pub english: &'static str,
}

impl Translations {
    /// Human name of a language in this translation
    pub fn language_name(&self, language: Language) -> &'static str {
        match language {
            Language::Id => self.indonesian,
            Language::En => self.english,
        }
    }
}

static INDONESIAN: Translations = Translations {
    app_name: "VederixAnimeList",
    popular_anime: "Anime Populer",
    search_results: "Hasil Pencarian untuk",
    found: "ditemukan",
    episodes: "episode",
    studio: "Studio",
    synopsis: "Sinopsis",
    background: "Latar Belakang",
    status: "Status",
    aired: "Ditayangkan",
    studios: "Studio",
    producers: "Produser",
    genres: "Genre",
    rank: "Peringkat",
    popularity: "Popularitas",
    members: "Anggota",
    favorites: "Favorit",
    currently_airing: "Sedang Tayang",
    finished_airing: "Selesai Tayang",
    not_yet_aired: "Belum Tayang",
    load_more: "Muat Lebih Banyak Anime",
    try_again: "Coba Lagi",
    error_title: "Ups! Terjadi kesalahan",
    load_error: "Gagal memuat anime populer. Silakan coba lagi nanti.",
    search_error: "Gagal mencari anime. Silakan coba lagi.",
    no_results: "Anime tidak ditemukan",
    no_results_desc: "Coba cari dengan kata kunci yang berbeda atau periksa ejaan Anda",
    language: "Bahasa",
    indonesian: "Indonesia",
    english: "English",
};

static ENGLISH: Translations = Translations {
    app_name: "VederixAnimeList",
    popular_anime: "Popular Anime",
    search_results: "Search Results for",
    found: "found",
    episodes: "episodes",
    studio: "Studio",
    synopsis: "Synopsis",
    background: "Background",
    status: "Status",
    aired: "Aired",
    studios: "Studios",
    producers: "Producers",
    genres: "Genres",
    rank: "Rank",
    popularity: "Popularity",
    members: "Members",
    favorites: "Favorites",
    currently_airing: "Currently Airing",
    finished_airing: "Finished Airing",
    not_yet_aired: "Not Yet Aired",
    load_more: "Load More Anime",
    try_again: "Try Again",
    error_title: "Oops! Something went wrong",
    load_error: "Failed to load popular anime. Please try again later.",
    search_error: "Failed to search anime. Please try again.",
    no_results: "No anime found",
    no_results_desc: "Try searching with different keywords or check your spelling",
    language: "Language",
    indonesian: "Indonesia",
    english: "English",
};

//! Jikan API client behind the shared request gate.

use super::catalog::CatalogApi;
use super::error::CatalogError;
use super::gate::RequestGate;
use super::season::{resolve_season, Season};
use super::types::{
    AnimeEntry, DataResponse, ItemResponse, JikanError, PaginatedResponse, Recommendation,
};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default base URL for Jikan API v4
pub const DEFAULT_BASE_URL: &str = "https://api.jikan.moe/v4";

const DEFAULT_USER_AGENT: &str = concat!("anime-catalog/", env!("CARGO_PKG_VERSION"));

/// Jikan API v4 client
#[derive(Debug, Clone)]
pub struct JikanClient {
    /// HTTP client
    client: Client,
    /// Base URL for Jikan API
    base_url: String,
    /// Throttle shared with every other client in the process
    gate: Arc<RequestGate>,
}

/// Builder for `JikanClient`
#[derive(Debug, Default)]
pub struct JikanClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    gate: Option<Arc<RequestGate>>,
}

impl JikanClientBuilder {
    /// Override the base URL (used for wiremock in tests)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Transport timeout; without one a slow server delays the caller indefinitely
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Gate to throttle through (default: the process-wide gate)
    pub fn gate(mut self, gate: Arc<RequestGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn build(self) -> Result<JikanClient, CatalogError> {
        let mut builder = Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(CatalogError::Client)?;

        Ok(JikanClient {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            gate: self.gate.unwrap_or_else(RequestGate::global),
        })
    }
}

impl JikanClient {
    /// Create a client for the given base URL using the process-wide gate
    pub fn new(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> JikanClientBuilder {
        JikanClientBuilder::default()
    }

    /// Gate this client throttles through
    pub fn gate(&self) -> &Arc<RequestGate> {
        &self.gate
    }

    /// Build a fully-qualified endpoint URL with escaped query parameters
    pub(crate) fn endpoint(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Url, CatalogError> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params.iter())
        };

        parsed.map_err(|e| CatalogError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    /// Make a single throttled GET request and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        self.gate.acquire().await;

        debug!(url = %url, "Making API request");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| CatalogError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            // Jikan explains most failures in a small JSON body
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<JikanError>(&body).ok())
                .map(|e| e.message)
                .filter(|m| !m.is_empty());
            warn!(url = %url, status = %status, message = ?message, "Request failed");
            return Err(CatalogError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| CatalogError::Network {
                url: url.to_string(),
                source,
            })?;

        let data = serde_json::from_str(&body).map_err(|source| {
            warn!(url = %url, error = %source, "Failed to parse response");
            CatalogError::Decode {
                url: url.to_string(),
                source,
            }
        })?;

        debug!(url = %url, "Request successful");
        Ok(data)
    }
}

impl CatalogApi for JikanClient {
    async fn top_anime(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<PaginatedResponse<AnimeEntry>, CatalogError> {
        info!(page = page, limit = limit, "Fetching top anime");
        let url = self.endpoint(
            "/top/anime",
            &[("page", page.to_string()), ("limit", limit.to_string())],
        )?;
        self.get(url).await
    }

    async fn search_anime(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<PaginatedResponse<AnimeEntry>, CatalogError> {
        info!(query = query, page = page, limit = limit, "Searching anime");
        let url = self.endpoint(
            "/anime",
            &[
                ("q", query.to_string()),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
                ("order_by", "popularity".to_string()),
                ("sort", "asc".to_string()),
            ],
        )?;
        self.get(url).await
    }

    async fn anime_by_id(&self, id: u32) -> Result<AnimeEntry, CatalogError> {
        debug!(mal_id = id, "Fetching anime details");
        let url = self.endpoint(&format!("/anime/{}", id), &[])?;
        let response: ItemResponse<AnimeEntry> = self.get(url).await?;
        Ok(response.data)
    }

    async fn seasonal_anime(
        &self,
        year: Option<i32>,
        season: Option<Season>,
    ) -> Result<PaginatedResponse<AnimeEntry>, CatalogError> {
        let today = chrono::Local::now().date_naive();
        let (year, season) = resolve_season(today, year, season);
        info!(year = year, season = %season, "Fetching seasonal anime");
        let url = self.endpoint(&format!("/seasons/{}/{}", year, season), &[])?;
        self.get(url).await
    }

    async fn recommendations(&self, id: u32) -> Result<Vec<Recommendation>, CatalogError> {
        info!(mal_id = id, "Fetching recommendations");
        let url = self.endpoint(&format!("/anime/{}/recommendations", id), &[])?;
        let response: DataResponse<Recommendation> = self.get(url).await?;
        Ok(response.data)
    }
}

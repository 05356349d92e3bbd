//! Errors raised by catalog requests.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a response (DNS, connect, TLS, timeout, body read)
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("request to {url} failed with status {status}{}", detail(.message))]
    HttpStatus {
        url: String,
        status: u16,
        /// Message from Jikan's error body, when it sent one
        message: Option<String>,
    },

    /// The body was not the JSON shape we expected
    #[error("failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl CatalogError {
    /// HTTP status when the failure came from the server
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

//! External search and photo providers.
//!
//! Pipeline agents depend only on the traits below. Each concrete client owns
//! its API key, passed in at construction; nothing here reads the environment.

use async_trait::async_trait;
use thiserror::Error;

use crate::blog::models::{ImageData, ResearchResult};

pub mod newsapi;
pub mod serpapi;
pub mod unsplash;

pub use newsapi::NewsApiClient;
pub use serpapi::SerpApiClient;
pub use unsplash::UnsplashClient;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0} is not configured (missing API key)")]
    NotConfigured(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A free-text search provider that yields research hits in its own rank order.
#[async_trait]
pub trait ResearchSource: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str) -> Result<Vec<ResearchResult>, SourceError>;
}

/// A stock-photo provider.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Returns landscape photos for `query`, unscored.
    async fn search_photos(&self, query: &str, per_page: u32)
        -> Result<Vec<ImageData>, SourceError>;

    /// Notifies the provider that a photo was used. Required by Unsplash's terms.
    async fn track_download(&self, photo_id: &str) -> Result<(), SourceError>;
}

/// Turns a non-2xx response into `SourceError::Api`, keeping the body for the log line.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(SourceError::Api {
        status: status.as_u16(),
        message,
    })
}

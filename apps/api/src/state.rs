use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextModel;
use crate::sources::{PhotoSource, ResearchSource};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds only stateless clients; pipeline agents are built fresh per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: Arc<dyn TextModel>,
    /// News search (NewsAPI in production).
    pub news: Arc<dyn ResearchSource>,
    /// Web search (SerpAPI in production).
    pub web: Arc<dyn ResearchSource>,
    pub photos: Arc<dyn PhotoSource>,
}

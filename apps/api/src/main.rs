mod blog;
mod config;
mod errors;
mod llm_client;
mod routes;
mod sources;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::sources::{NewsApiClient, SerpApiClient, UnsplashClient};
use crate::state::AppState;

/// Upper bound for any single outbound call (model, search, photos).
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Blogsmith API v{}", env!("CARGO_PKG_VERSION"));

    // One connection pool shared by every outbound client
    let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;

    // Initialize LLM client
    let llm = LlmClient::new(http.clone(), config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize research and photo sources (missing keys degrade to empty results)
    for (name, key) in [
        ("NEWS_API_KEY", &config.news_api_key),
        ("SERP_API_KEY", &config.serp_api_key),
        ("UNSPLASH_ACCESS_KEY", &config.unsplash_access_key),
    ] {
        if key.is_none() {
            warn!("{name} not set; that source will return no results");
        }
    }
    let news = NewsApiClient::new(http.clone(), config.news_api_key.clone());
    let web = SerpApiClient::new(http.clone(), config.serp_api_key.clone());
    let photos = UnsplashClient::new(http, config.unsplash_access_key.clone());

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm: Arc::new(llm),
        news: Arc::new(news),
        web: Arc::new(web),
        photos: Arc::new(photos),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

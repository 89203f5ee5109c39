//! NewsAPI `/v2/everything`: recent articles, newest first, English only.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::blog::models::ResearchResult;
use crate::sources::{ensure_success, ResearchSource, SourceError};

const NEWS_API_URL: &str = "https://newsapi.org/v2/everything";
const PAGE_SIZE: &str = "10";

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsArticle {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    source: Option<NewsSourceName>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsSourceName {
    name: Option<String>,
}

impl NewsArticle {
    /// Articles without a URL can't be cited and are dropped.
    fn into_result(self) -> Option<ResearchResult> {
        Some(ResearchResult {
            url: self.url?,
            title: self.title.unwrap_or_default(),
            snippet: self.description.unwrap_or_default(),
            source: self
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "NewsAPI".to_string()),
            published_at: self.published_at,
        })
    }
}

#[derive(Clone)]
pub struct NewsApiClient {
    client: Client,
    api_key: Option<String>,
}

impl NewsApiClient {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl ResearchSource for NewsApiClient {
    fn name(&self) -> &'static str {
        "newsapi"
    }

    async fn search(&self, query: &str) -> Result<Vec<ResearchResult>, SourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SourceError::NotConfigured("NewsAPI"))?;

        let response = self
            .client
            .get(NEWS_API_URL)
            .query(&[
                ("q", query),
                ("sortBy", "publishedAt"),
                ("language", "en"),
                ("pageSize", PAGE_SIZE),
            ])
            .header("X-Api-Key", api_key)
            .send()
            .await?;

        let body: NewsResponse = ensure_success(response).await?.json().await?;

        Ok(body
            .articles
            .into_iter()
            .filter_map(NewsArticle::into_result)
            .collect())
    }
}

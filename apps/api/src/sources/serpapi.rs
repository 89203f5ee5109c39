//! SerpAPI Google engine: general web results (`organic_results`).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::blog::models::ResearchResult;
use crate::sources::{ensure_success, ResearchSource, SourceError};

const SERP_API_URL: &str = "https://serpapi.com/search.json";
const NUM_RESULTS: &str = "10";

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
    date: Option<String>,
}

impl OrganicResult {
    fn into_result(self) -> Option<ResearchResult> {
        let link = self.link?;
        let source = url::Url::parse(&link)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
            .unwrap_or_else(|| "Web".to_string());
        Some(ResearchResult {
            title: self.title.unwrap_or_default(),
            url: link,
            snippet: self.snippet.unwrap_or_default(),
            source,
            published_at: self.date,
        })
    }
}

#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    api_key: Option<String>,
}

impl SerpApiClient {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl ResearchSource for SerpApiClient {
    fn name(&self) -> &'static str {
        "serpapi"
    }

    async fn search(&self, query: &str) -> Result<Vec<ResearchResult>, SourceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SourceError::NotConfigured("SerpAPI"))?;

        let response = self
            .client
            .get(SERP_API_URL)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("num", NUM_RESULTS),
                ("api_key", api_key),
            ])
            .send()
            .await?;

        let body: SerpResponse = ensure_success(response).await?.json().await?;

        Ok(body
            .organic_results
            .into_iter()
            .filter_map(OrganicResult::into_result)
            .collect())
    }
}

//! Research: gathers citable sources for a topic from a news and a web search provider.
//!
//! Order of operations matters: news results come first, so on a URL collision
//! the news record (with its publisher name and date) is the one kept.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::blog::models::ResearchResult;
use crate::blog::text::topic_keywords;
use crate::sources::ResearchSource;

/// Hard cap on results handed to content generation.
pub const MAX_RESEARCH_RESULTS: usize = 10;
const MIN_TITLE_CHARS: usize = 10;
const MIN_SNIPPET_CHARS: usize = 20;
/// Topic words must be longer than this to count as relevance keywords.
const TOPIC_KEYWORD_MIN_LEN: usize = 3;

/// Social platforms are never cited. Matches the host itself and any subdomain.
const BLOCKED_DOMAINS: &[&str] = &[
    "facebook.com",
    "twitter.com",
    "x.com",
    "instagram.com",
    "tiktok.com",
    "pinterest.com",
    "linkedin.com",
    "snapchat.com",
];

pub struct ResearchAgent {
    news: Arc<dyn ResearchSource>,
    web: Arc<dyn ResearchSource>,
}

impl ResearchAgent {
    pub fn new(news: Arc<dyn ResearchSource>, web: Arc<dyn ResearchSource>) -> Self {
        Self { news, web }
    }

    /// Queries both sources, then merges, filters and truncates.
    /// A failing source contributes nothing; this never errors.
    pub async fn research_topic(&self, topic: &str) -> Vec<ResearchResult> {
        let (news, web) = tokio::join!(
            query_source(self.news.as_ref(), topic),
            query_source(self.web.as_ref(), topic)
        );
        let fetched = news.len() + web.len();

        let merged = dedupe_by_url(news.into_iter().chain(web));
        let results = filter_results(merged, topic);

        info!(
            "Research for {:?}: {} fetched, {} kept",
            topic,
            fetched,
            results.len()
        );
        results
    }
}

async fn query_source(source: &dyn ResearchSource, topic: &str) -> Vec<ResearchResult> {
    match source.search(topic).await {
        Ok(results) => results,
        Err(e) => {
            warn!("Research source {} failed, continuing without it: {e}", source.name());
            vec![]
        }
    }
}

/// Keeps the first record seen for each URL.
pub fn dedupe_by_url(results: impl IntoIterator<Item = ResearchResult>) -> Vec<ResearchResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert(r.url.clone()))
        .collect()
}

/// Applies the blocklist, quality and relevance filters in source order,
/// then truncates to `MAX_RESEARCH_RESULTS`.
pub fn filter_results(results: Vec<ResearchResult>, topic: &str) -> Vec<ResearchResult> {
    let keywords = topic_keywords(topic, TOPIC_KEYWORD_MIN_LEN);

    results
        .into_iter()
        .filter(|r| !is_blocked_url(&r.url))
        .filter(|r| {
            r.title.chars().count() >= MIN_TITLE_CHARS
                && r.snippet.chars().count() >= MIN_SNIPPET_CHARS
        })
        .filter(|r| is_relevant(r, &keywords))
        .take(MAX_RESEARCH_RESULTS)
        .collect()
}

/// True for blocked social hosts, and for URLs that do not parse at all.
pub fn is_blocked_url(raw: &str) -> bool {
    let Some(host) = url::Url::parse(raw)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
    else {
        return true;
    };
    BLOCKED_DOMAINS
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{d}")))
}

/// At least one topic keyword must appear. A topic with no qualifying keywords
/// (e.g. "AI") therefore keeps nothing.
fn is_relevant(result: &ResearchResult, keywords: &[String]) -> bool {
    let haystack = format!("{} {}", result.title, result.snippet).to_lowercase();
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}

//! Stub collaborators for pipeline tests. No network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::blog::models::{ImageData, ResearchResult};
use crate::llm_client::{LlmError, TextModel};
use crate::sources::{PhotoSource, ResearchSource, SourceError};

pub fn research(title: &str, url: &str, snippet: &str, source: &str) -> ResearchResult {
    ResearchResult {
        title: title.to_string(),
        url: url.to_string(),
        snippet: snippet.to_string(),
        source: source.to_string(),
        published_at: None,
    }
}

pub fn image(id: &str, alt: &str) -> ImageData {
    ImageData {
        id: id.to_string(),
        url: format!("https://images.example.com/{id}.jpg"),
        alt: alt.to_string(),
        photographer: format!("Photographer {id}"),
        photographer_username: format!("user_{id}"),
        download_url: format!("https://unsplash.com/photos/{id}/download"),
        relevance_score: None,
    }
}

/// Research source returning canned results, or failing when built with `failing`.
pub struct StubResearchSource {
    pub name: &'static str,
    pub results: Vec<ResearchResult>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl StubResearchSource {
    pub fn new(name: &'static str, results: Vec<ResearchResult>) -> Arc<Self> {
        Arc::new(Self {
            name,
            results,
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            results: vec![],
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResearchSource for StubResearchSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(&self, _query: &str) -> Result<Vec<ResearchResult>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SourceError::Api {
                status: 503,
                message: "upstream unavailable".to_string(),
            });
        }
        Ok(self.results.clone())
    }
}

/// Text model returning a canned completion, or an API error.
pub struct StubTextModel {
    pub response: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubTextModel {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(text.to_string()),
            prompts: Mutex::new(vec![]),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            prompts: Mutex::new(vec![]),
        })
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextModel for StubTextModel {
    fn model_name(&self) -> &str {
        "stub-model"
    }

    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(LlmError::Api {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}

/// Photo source keyed by query. Unknown queries return nothing; queries listed in
/// `failing_queries` return an error.
pub struct StubPhotoSource {
    pub by_query: Vec<(String, Vec<ImageData>)>,
    pub failing_queries: Vec<String>,
    pub queries: Mutex<Vec<String>>,
    pub tracked: Mutex<Vec<String>>,
}

impl StubPhotoSource {
    pub fn new(by_query: Vec<(&str, Vec<ImageData>)>) -> Arc<Self> {
        Self::with_failures(by_query, vec![])
    }

    pub fn with_failures(by_query: Vec<(&str, Vec<ImageData>)>, failing: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            by_query: by_query
                .into_iter()
                .map(|(q, images)| (q.to_string(), images))
                .collect(),
            failing_queries: failing.into_iter().map(str::to_string).collect(),
            queries: Mutex::new(vec![]),
            tracked: Mutex::new(vec![]),
        })
    }

    pub fn search_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn searched(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn tracked(&self) -> Vec<String> {
        self.tracked.lock().unwrap().clone()
    }
}

#[async_trait]
impl PhotoSource for StubPhotoSource {
    async fn search_photos(
        &self,
        query: &str,
        _per_page: u32,
    ) -> Result<Vec<ImageData>, SourceError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.failing_queries.iter().any(|q| q == query) {
            return Err(SourceError::Api {
                status: 403,
                message: "rate limit exceeded".to_string(),
            });
        }
        Ok(self
            .by_query
            .iter()
            .find(|(q, _)| q == query)
            .map(|(_, images)| images.clone())
            .unwrap_or_default())
    }

    async fn track_download(&self, photo_id: &str) -> Result<(), SourceError> {
        self.tracked.lock().unwrap().push(photo_id.to_string());
        Ok(())
    }
}

/// Yields until `condition` holds or the attempt budget runs out.
/// Spawned tracking tasks only run when the test task yields.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
}

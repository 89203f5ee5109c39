//! Data shapes passed between pipeline stages and returned to API callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blog::tone::Tone;

// ────────────────────────────────────────────────────────────────────────────
// Research
// ────────────────────────────────────────────────────────────────────────────

/// A single search hit. Deduplicated by `url`; never modified after research.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// Publisher or site name.
    pub source: String,
    pub published_at: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Content
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogMetadata {
    pub tone: Tone,
    pub generated_at: DateTime<Utc>,
    pub model_used: String,
}

/// Parsed output of the content generation step.
///
/// `content` excludes the `# Title` line. Downstream steps rewrite it with
/// images and references before it reaches the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedBlog {
    pub title: String,
    pub content: String,
    pub word_count: usize,
    pub sections: Vec<String>,
    pub keywords: Vec<String>,
    pub metadata: BlogMetadata,
}

/// Result of a single-shot rewrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditedBlog {
    pub title: String,
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Images
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub id: String,
    pub url: String,
    pub alt: String,
    pub photographer: String,
    pub photographer_username: String,
    pub download_url: String,
    /// 1–10, set once by the image agent.
    pub relevance_score: Option<u8>,
}

// ────────────────────────────────────────────────────────────────────────────
// References
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_at: Option<String>,
}

impl From<&ResearchResult> for Reference {
    fn from(result: &ResearchResult) -> Self {
        Self {
            title: result.title.clone(),
            url: result.url.clone(),
            source: result.source.clone(),
            published_at: result.published_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceList {
    pub references: Vec<Reference>,
    pub total_count: usize,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline request / result
// ────────────────────────────────────────────────────────────────────────────

/// Request body for blog generation.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogRequest {
    pub topic: String,
    #[serde(default)]
    pub tone: Tone,
    pub max_words: u32,
    #[serde(default)]
    pub include_images: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub generation_time_ms: u64,
    pub word_count: usize,
    pub model_used: String,
    pub generated_at: DateTime<Utc>,
    pub research_sources: usize,
    pub images_found: usize,
    pub references_count: usize,
}

/// Terminal artifact of a pipeline run. Intermediate values are dropped after assembly.
///
/// `images` and `all_images` are currently identical: every scored image is embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogGenerationResult {
    pub title: String,
    pub content: String,
    pub images: Vec<ImageData>,
    pub all_images: Vec<ImageData>,
    pub references: Vec<Reference>,
    pub metadata: GenerationMetadata,
}

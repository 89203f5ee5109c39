//! Content generation: one model call per post, then a tolerant parse of the markdown.
//!
//! The model is asked for a `# Title` line, `##` sections, a `**Keywords:**` line and a
//! `**Word Count:**` line. None of these are trusted to be present: a missing title
//! falls back to the topic and missing keywords are recomputed locally.

use std::sync::{Arc, LazyLock};

use chrono::Utc;
use regex::Regex;
use tracing::info;

use crate::blog::models::{BlogMetadata, EditedBlog, GeneratedBlog, ResearchResult};
use crate::blog::prompts::{
    BLOG_PROMPT_TEMPLATE, BLOG_SYSTEM, EDIT_PROMPT_TEMPLATE, EDIT_SYSTEM,
    NO_RESEARCH_PLACEHOLDER, STRUCTURE_TEXT_ONLY, STRUCTURE_WITH_IMAGES,
};
use crate::blog::text::{count_words, top_keywords_by_frequency};
use crate::blog::tone::{get_tone_profile, Tone};
use crate::errors::AppError;
use crate::llm_client::prompts::{MARKDOWN_ONLY_SYSTEM, NO_META_COMMENTARY};
use crate::llm_client::{strip_markdown_fences, TextModel};

/// Number of keywords produced by the frequency fallback.
const FALLBACK_KEYWORD_COUNT: usize = 5;
const SECTION_DELIMITER: &str = "\n## ";

/// Tried in order; first match wins.
static KEYWORD_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        // **Keywords:** [a, b]
        Regex::new(r"(?i)\*\*Keywords:\*\*[ \t]*\[([^\]\n]+)\]").expect("valid regex"),
        // Keywords: [a, b]
        Regex::new(r"(?i)Keywords:[ \t]*\[([^\]\n]+)\]").expect("valid regex"),
        // Keywords: a, b
        Regex::new(r"(?im)^[ \t]*Keywords:[ \t]*(\S.*)$").expect("valid regex"),
        // **Keywords:** a, b
        Regex::new(r"(?i)\*\*Keywords:\*\*[ \t]*(\S.*)").expect("valid regex"),
    ]
});

/// Input to a single generation call.
#[derive(Debug, Clone)]
pub struct ContentRequest<'a> {
    pub topic: &'a str,
    pub tone: Tone,
    pub max_words: u32,
    pub research_data: &'a [ResearchResult],
    pub include_images: bool,
}

pub struct ContentGenerationAgent {
    llm: Arc<dyn TextModel>,
}

impl ContentGenerationAgent {
    pub fn new(llm: Arc<dyn TextModel>) -> Self {
        Self { llm }
    }

    /// Generates a post. The model is called exactly once; its error propagates as-is.
    pub async fn generate_blog(&self, request: &ContentRequest<'_>) -> Result<GeneratedBlog, AppError> {
        let prompt = build_blog_prompt(request);
        let system = format!("{BLOG_SYSTEM} {MARKDOWN_ONLY_SYSTEM}");

        let raw = self
            .llm
            .complete(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("Content generation failed: {e}")))?;

        let blog = parse_blog_response(&raw, request.topic, request.tone, self.llm.model_name());
        info!(
            "Generated {:?}: {} words, {} sections, keywords={:?}",
            blog.title,
            blog.word_count,
            blog.sections.len(),
            blog.keywords
        );
        Ok(blog)
    }

    /// Rewrites an existing post according to `edit_request`.
    pub async fn edit_blog(
        &self,
        original_content: &str,
        edit_request: &str,
    ) -> Result<EditedBlog, AppError> {
        let prompt = EDIT_PROMPT_TEMPLATE
            .replace("{edit_request}", edit_request)
            .replace("{original_content}", original_content)
            .replace("{no_meta_commentary}", NO_META_COMMENTARY);
        let system = format!("{EDIT_SYSTEM} {MARKDOWN_ONLY_SYSTEM}");

        let raw = self
            .llm
            .complete(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("Blog edit failed: {e}")))?;

        let fallback_title = extract_title(original_content)
            .map(|(title, _)| title)
            .unwrap_or_else(|| "Untitled".to_string());
        let raw = strip_markdown_fences(&raw);
        let (title, content) = match extract_title(raw) {
            Some((title, rest)) => (title, rest),
            None => (fallback_title, raw.trim().to_string()),
        };

        Ok(EditedBlog { title, content })
    }
}

/// Fills the generation template for one request.
pub fn build_blog_prompt(request: &ContentRequest<'_>) -> String {
    let profile = get_tone_profile(request.tone);

    let research = if request.research_data.is_empty() {
        NO_RESEARCH_PLACEHOLDER.to_string()
    } else {
        request
            .research_data
            .iter()
            .map(|r| format!("- {}: {} (Source: {})", r.title, r.snippet, r.source))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let structure_hint = if request.include_images {
        STRUCTURE_WITH_IMAGES
    } else {
        STRUCTURE_TEXT_ONLY
    };

    BLOG_PROMPT_TEMPLATE
        .replace("{topic}", request.topic)
        .replace("{tone}", &request.tone.to_string())
        .replace("{tone_instruction}", profile.instruction)
        .replace("{voice_hints}", &profile.voice_hints.join(", "))
        .replace("{avoid}", &profile.avoid.join(", "))
        .replace("{max_words}", &request.max_words.to_string())
        .replace("{research}", &research)
        .replace("{structure_hint}", structure_hint)
}

/// Turns raw model output into a `GeneratedBlog`. Never fails.
pub fn parse_blog_response(raw: &str, topic: &str, tone: Tone, model: &str) -> GeneratedBlog {
    let raw = strip_markdown_fences(raw);

    let (title, body) = extract_title(raw).unwrap_or_else(|| (topic.to_string(), raw.to_string()));
    let keywords = extract_keywords(&body)
        .unwrap_or_else(|| top_keywords_by_frequency(&body, FALLBACK_KEYWORD_COUNT));

    // Everything below the title stays in the body, metadata lines included.
    GeneratedBlog {
        word_count: count_words(&body),
        sections: split_sections(&body),
        title,
        content: body,
        keywords,
        metadata: BlogMetadata {
            tone,
            generated_at: Utc::now(),
            model_used: model.to_string(),
        },
    }
}

/// Returns the first `# ` heading and the text with that line removed.
pub fn extract_title(markdown: &str) -> Option<(String, String)> {
    let lines: Vec<&str> = markdown.lines().collect();
    let index = lines.iter().position(|l| l.trim_start().starts_with("# "))?;
    let title = lines[index].trim_start()[2..].trim().to_string();
    if title.is_empty() {
        return None;
    }
    let rest = lines
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, l)| *l)
        .collect::<Vec<_>>()
        .join("\n");
    Some((title, rest.trim().to_string()))
}

/// Keywords from an explicit `Keywords:` line, or `None` when no pattern matches.
pub fn extract_keywords(text: &str) -> Option<Vec<String>> {
    KEYWORD_PATTERNS.iter().find_map(|pattern| {
        let captured = pattern.captures(text)?.get(1)?.as_str();
        let keywords: Vec<String> = captured
            .split(',')
            .map(|k| {
                k.trim_matches(|c: char| {
                    c.is_whitespace() || matches!(c, '"' | '\'' | '[' | ']' | '*' | '`')
                })
                .to_string()
            })
            .filter(|k| !k.is_empty())
            .collect();
        (!keywords.is_empty()).then_some(keywords)
    })
}

pub fn split_sections(content: &str) -> Vec<String> {
    content.split(SECTION_DELIMITER).map(str::to_string).collect()
}

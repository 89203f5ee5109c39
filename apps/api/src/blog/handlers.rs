//! Axum route handlers for the Blog API.

use axum::{
    extract::{FromRequest, State},
    Json,
};
use serde::Deserialize;

use crate::blog::content::ContentGenerationAgent;
use crate::blog::models::{BlogGenerationResult, BlogRequest, EditedBlog, Reference};
use crate::blog::orchestrator::AgentOrchestrator;
use crate::blog::references::{validate_references, ReferenceValidation};
use crate::errors::AppError;
use crate::state::AppState;

pub const MIN_WORDS: u32 = 100;
pub const MAX_WORDS: u32 = 5000;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// `Json` extractor whose rejection is an `AppError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub content: String,
    pub edit_request: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateReferencesRequest {
    pub references: Vec<Reference>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/blog/generate
///
/// Runs the full pipeline: research, writing, optional images, references.
pub async fn handle_generate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BlogRequest>,
) -> Result<Json<BlogGenerationResult>, AppError> {
    validate_blog_request(&request)?;

    let orchestrator = AgentOrchestrator::from_state(&state);
    let result = orchestrator.generate_blog(&request).await?;

    Ok(Json(result))
}

/// POST /api/v1/blog/edit
pub async fn handle_edit(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EditRequest>,
) -> Result<Json<EditedBlog>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }
    if request.edit_request.trim().is_empty() {
        return Err(AppError::Validation("edit_request cannot be empty".to_string()));
    }

    let agent = ContentGenerationAgent::new(state.llm.clone());
    let edited = agent.edit_blog(&request.content, &request.edit_request).await?;

    Ok(Json(edited))
}

/// POST /api/v1/blog/references/validate
///
/// Advisory only: never rejects the request for bad references.
pub async fn handle_validate_references(
    ApiJson(request): ApiJson<ValidateReferencesRequest>,
) -> Json<ReferenceValidation> {
    Json(validate_references(&request.references))
}

pub fn validate_blog_request(request: &BlogRequest) -> Result<(), AppError> {
    if request.topic.trim().is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }
    if !(MIN_WORDS..=MAX_WORDS).contains(&request.max_words) {
        return Err(AppError::Validation(format!(
            "max_words must be between {MIN_WORDS} and {MAX_WORDS}, got {}",
            request.max_words
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::tone::Tone;

    fn request(topic: &str, max_words: u32) -> BlogRequest {
        BlogRequest {
            topic: topic.to_string(),
            tone: Tone::Professional,
            max_words,
            include_images: false,
        }
    }

    #[test]
    fn test_accepts_bounds() {
        assert!(validate_blog_request(&request("solar energy", 100)).is_ok());
        assert!(validate_blog_request(&request("solar energy", 5000)).is_ok());
    }

    #[test]
    fn test_rejects_blank_topic() {
        let err = validate_blog_request(&request("   ", 500)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_rejects_out_of_range_word_budget() {
        assert!(validate_blog_request(&request("solar energy", 99)).is_err());
        assert!(validate_blog_request(&request("solar energy", 5001)).is_err());
    }
}

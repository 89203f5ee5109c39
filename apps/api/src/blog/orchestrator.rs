//! Blog Generation: orchestrates the full pipeline for one request.
//!
//! Flow: research → generate content → find + embed images (optional) → embed references.
//!
//! Steps run strictly in order; each consumes the previous step's output.
//! Any failure aborts the run with `AppError::Generation`. There is no partial
//! result and no retry.

use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::blog::content::{ContentGenerationAgent, ContentRequest};
use crate::blog::images::{summarize_images, ImageRetrievalAgent};
use crate::blog::models::{BlogGenerationResult, BlogRequest, GenerationMetadata};
use crate::blog::references::ReferenceManagementAgent;
use crate::blog::research::ResearchAgent;
use crate::errors::AppError;
use crate::state::AppState;

// Cumulative progress after each step: research 20, content 50, images 20, references 10.
const PROGRESS_AFTER_RESEARCH: u8 = 20;
const PROGRESS_AFTER_CONTENT: u8 = 70;
const PROGRESS_AFTER_IMAGES: u8 = 90;
const PROGRESS_DONE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    Research,
    Content,
    Images,
    References,
}

/// Emitted by `generate_blog_with_progress` for UI progress bars.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpdate {
    pub step: PipelineStep,
    /// 0–100, cumulative.
    pub progress: u8,
    pub message: String,
}

impl ProgressUpdate {
    fn new(step: PipelineStep, progress: u8, message: impl Into<String>) -> Self {
        Self {
            step,
            progress,
            message: message.into(),
        }
    }
}

pub struct AgentOrchestrator {
    research: ResearchAgent,
    content: ContentGenerationAgent,
    images: ImageRetrievalAgent,
    references: ReferenceManagementAgent,
}

impl AgentOrchestrator {
    pub fn new(
        research: ResearchAgent,
        content: ContentGenerationAgent,
        images: ImageRetrievalAgent,
        references: ReferenceManagementAgent,
    ) -> Self {
        Self {
            research,
            content,
            images,
            references,
        }
    }

    /// Fresh agents over the shared, stateless clients. Build one per request.
    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            ResearchAgent::new(state.news.clone(), state.web.clone()),
            ContentGenerationAgent::new(state.llm.clone()),
            ImageRetrievalAgent::new(state.photos.clone(), state.config.unsplash_app_name.clone()),
            ReferenceManagementAgent::new(),
        )
    }

    pub async fn generate_blog(&self, request: &BlogRequest) -> Result<BlogGenerationResult, AppError> {
        self.run(request, |_| {}).await
    }

    /// Same pipeline and output as `generate_blog`, reporting progress after each step.
    pub async fn generate_blog_with_progress<F>(
        &self,
        request: &BlogRequest,
        on_progress: F,
    ) -> Result<BlogGenerationResult, AppError>
    where
        F: FnMut(ProgressUpdate) + Send,
    {
        self.run(request, on_progress).await
    }

    async fn run<F>(&self, request: &BlogRequest, mut on_progress: F) -> Result<BlogGenerationResult, AppError>
    where
        F: FnMut(ProgressUpdate) + Send,
    {
        let generation_id = Uuid::new_v4();
        let span = info_span!("blog_generation", %generation_id, topic = %request.topic);

        self.pipeline(request, &mut on_progress)
            .instrument(span)
            .await
            .map_err(|e| AppError::Generation(e.to_string()))
    }

    async fn pipeline<F>(
        &self,
        request: &BlogRequest,
        on_progress: &mut F,
    ) -> Result<BlogGenerationResult, AppError>
    where
        F: FnMut(ProgressUpdate) + Send,
    {
        let started = Instant::now();
        let topic = request.topic.as_str();

        // Step 1: Research
        on_progress(ProgressUpdate::new(PipelineStep::Research, 0, "Researching topic"));
        let step = Instant::now();
        let research = self.research.research_topic(topic).await;
        info!(
            "Research step: {} sources in {}ms",
            research.len(),
            step.elapsed().as_millis()
        );
        on_progress(ProgressUpdate::new(
            PipelineStep::Research,
            PROGRESS_AFTER_RESEARCH,
            format!("Found {} sources", research.len()),
        ));

        // Step 2: Content
        let step = Instant::now();
        let blog = self
            .content
            .generate_blog(&ContentRequest {
                topic,
                tone: request.tone,
                max_words: request.max_words,
                research_data: &research,
                include_images: request.include_images,
            })
            .await?;
        info!(
            "Content step: {} words in {}ms",
            blog.word_count,
            step.elapsed().as_millis()
        );
        on_progress(ProgressUpdate::new(
            PipelineStep::Content,
            PROGRESS_AFTER_CONTENT,
            format!("Drafted {} words", blog.word_count),
        ));

        // Step 3: Images (skipped entirely unless requested)
        let (content, images) = if request.include_images {
            let step = Instant::now();
            let images = self
                .images
                .find_relevant_images(&blog.content, topic, Some(blog.keywords.as_slice()))
                .await;
            debug!("Image summary: {:?}", summarize_images(&images));
            let content = self.images.embed_images_in_markdown(&blog.content, &images);
            info!(
                "Image step: {} images in {}ms",
                images.len(),
                step.elapsed().as_millis()
            );
            on_progress(ProgressUpdate::new(
                PipelineStep::Images,
                PROGRESS_AFTER_IMAGES,
                format!("Added {} images", images.len()),
            ));
            (content, images)
        } else {
            on_progress(ProgressUpdate::new(
                PipelineStep::Images,
                PROGRESS_AFTER_IMAGES,
                "Images not requested",
            ));
            (blog.content.clone(), Vec::new())
        };

        // Step 4: References
        let reference_list = self.references.extract_references(&research, &content);
        let content = self
            .references
            .embed_references_in_blog(&content, &reference_list.references);
        on_progress(ProgressUpdate::new(
            PipelineStep::References,
            PROGRESS_DONE,
            format!("Cited {} references", reference_list.total_count),
        ));

        let generation_time_ms = started.elapsed().as_millis() as u64;
        info!(
            "Blog {:?} generated in {}ms ({} sources, {} images)",
            blog.title,
            generation_time_ms,
            research.len(),
            images.len()
        );

        Ok(BlogGenerationResult {
            title: blog.title,
            content,
            metadata: GenerationMetadata {
                generation_time_ms,
                word_count: blog.word_count,
                model_used: blog.metadata.model_used,
                generated_at: Utc::now(),
                research_sources: research.len(),
                images_found: images.len(),
                references_count: reference_list.total_count,
            },
            // Every scored image is used; there is no top-K cut.
            all_images: images.clone(),
            images,
            references: reference_list.references,
        })
    }
}

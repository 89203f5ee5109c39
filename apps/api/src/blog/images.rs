//! Image retrieval: finds stock photos for a post, scores them, and places them
//! under section headings with the attribution Unsplash requires.
//!
//! Scoring is a deterministic keyword-overlap heuristic, not a semantic model:
//!   score = round(matched_topic_keywords / topic_keywords × 10 + min(alt_len / 20, 2))
//! clamped to 1–10.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::blog::models::ImageData;
use crate::blog::text::{candidate_keywords, tokenize, topic_keywords};
use crate::sources::PhotoSource;

/// Only the first few keywords are searched; each is its own query.
const MAX_QUERIES: usize = 3;
const FALLBACK_KEYWORD_COUNT: usize = 5;
const PHOTOS_PER_QUERY: u32 = 5;
/// Topic words must be longer than this to count toward the score.
const SCORING_KEYWORD_MIN_LEN: usize = 4;
/// Alt-text words this short are ignored when matching.
const MIN_ALT_WORD_LEN: usize = 3;
/// Threshold for "high relevance" in summaries.
pub const HIGH_RELEVANCE_SCORE: u8 = 7;
const SECTION_DELIMITER: &str = "\n## ";

/// Aggregate view of a scored image set, for logs and debugging.
#[derive(Debug, Clone, Serialize)]
pub struct ImageSummary {
    pub total: usize,
    pub high_relevance: usize,
    pub average_score: f64,
    pub top_image_id: Option<String>,
}

pub struct ImageRetrievalAgent {
    photos: Arc<dyn PhotoSource>,
    /// `utm_source` for attribution links.
    app_name: String,
}

impl ImageRetrievalAgent {
    pub fn new(photos: Arc<dyn PhotoSource>, app_name: String) -> Self {
        Self { photos, app_name }
    }

    /// Returns every image found, scored and sorted best-first.
    ///
    /// `keywords`, when non-empty, are used as queries; otherwise queries come from
    /// the post body. A failing query is skipped.
    pub async fn find_relevant_images(
        &self,
        blog_content: &str,
        topic: &str,
        keywords: Option<&[String]>,
    ) -> Vec<ImageData> {
        let queries: Vec<String> = match keywords {
            Some(k) if !k.is_empty() => k.to_vec(),
            _ => candidate_keywords(blog_content, FALLBACK_KEYWORD_COUNT),
        };

        let mut seen = HashSet::new();
        let mut images = Vec::new();
        for query in queries.iter().take(MAX_QUERIES) {
            match self.photos.search_photos(query, PHOTOS_PER_QUERY).await {
                Ok(found) => {
                    images.extend(found.into_iter().filter(|img| seen.insert(img.id.clone())))
                }
                Err(e) => warn!("Image search for {query:?} failed, skipping: {e}"),
            }
        }

        let scoring_keywords = topic_keywords(topic, SCORING_KEYWORD_MIN_LEN);
        for image in &mut images {
            image.relevance_score = Some(score_image(&image.alt, &scoring_keywords));
        }
        images.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

        info!(
            "Found {} images for {:?} from queries {:?}",
            images.len(),
            topic,
            queries.iter().take(MAX_QUERIES).collect::<Vec<_>>()
        );
        images
    }

    /// Places images under section headings, cycling through `images`, and fires a
    /// download-tracking ping for each placement. Pings never affect the result.
    pub fn embed_images_in_markdown(&self, markdown: &str, images: &[ImageData]) -> String {
        let (embedded, placed) = place_images(markdown, images, &self.app_name);
        self.track_downloads(placed);
        embedded
    }

    /// Spawns one detached tracking request per placed photo.
    fn track_downloads(&self, photo_ids: Vec<String>) {
        if photo_ids.is_empty() {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime; skipping {} download pings", photo_ids.len());
            return;
        };
        for id in photo_ids {
            let photos = Arc::clone(&self.photos);
            handle.spawn(async move {
                if let Err(e) = photos.track_download(&id).await {
                    warn!("Download tracking for photo {id} failed: {e}");
                }
            });
        }
    }
}

/// Keyword-overlap score in 1..=10.
pub fn score_image(alt: &str, topic_keywords: &[String]) -> u8 {
    let alt_words: Vec<String> = tokenize(alt)
        .into_iter()
        .filter(|w| w.chars().count() >= MIN_ALT_WORD_LEN)
        .collect();

    let keyword_score = if topic_keywords.is_empty() {
        0.0
    } else {
        let matched = topic_keywords
            .iter()
            .filter(|k| {
                alt_words
                    .iter()
                    .any(|w| w.contains(k.as_str()) || k.contains(w.as_str()))
            })
            .count();
        matched as f64 / topic_keywords.len() as f64 * 10.0
    };

    let descriptiveness = (alt.chars().count() as f64 / 20.0).min(2.0);

    (keyword_score + descriptiveness).round().clamp(1.0, 10.0) as u8
}

/// Splits on `## ` headings; body section `k` gets `images[k % len]`.
/// Returns the new markdown and the ids of photos placed, in placement order.
pub fn place_images(markdown: &str, images: &[ImageData], app_name: &str) -> (String, Vec<String>) {
    if images.is_empty() {
        return (markdown.to_string(), vec![]);
    }

    let mut placed = Vec::new();
    let sections: Vec<String> = markdown
        .split(SECTION_DELIMITER)
        .enumerate()
        .map(|(i, section)| {
            if i == 0 {
                return section.to_string();
            }
            let image = &images[(i - 1) % images.len()];
            placed.push(image.id.clone());
            insert_under_heading(section, &image_block(image, app_name))
        })
        .collect();

    (sections.join(SECTION_DELIMITER), placed)
}

fn insert_under_heading(section: &str, block: &str) -> String {
    match section.split_once('\n') {
        Some((heading, body)) => format!("{heading}\n\n{block}\n\n{}", body.trim_start_matches('\n')),
        None => format!("{section}\n\n{block}\n"),
    }
}

/// Markdown image plus the photographer/Unsplash attribution line.
pub fn image_block(image: &ImageData, app_name: &str) -> String {
    let alt: String = image.alt.chars().filter(|c| !matches!(c, '[' | ']')).collect();
    format!(
        "![{alt}]({url})\n\
         *Photo by [{name}](https://unsplash.com/@{username}?utm_source={app_name}&utm_medium=referral) \
         on [Unsplash](https://unsplash.com/?utm_source={app_name}&utm_medium=referral)*",
        url = image.url,
        name = image.photographer,
        username = image.photographer_username,
    )
}

pub fn summarize_images(images: &[ImageData]) -> ImageSummary {
    let scores: Vec<u8> = images.iter().filter_map(|i| i.relevance_score).collect();
    let average_score = if scores.is_empty() {
        0.0
    } else {
        scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64
    };

    ImageSummary {
        total: images.len(),
        high_relevance: scores.iter().filter(|&&s| s >= HIGH_RELEVANCE_SCORE).count(),
        average_score,
        top_image_id: images
            .iter()
            .max_by_key(|i| i.relevance_score)
            .map(|i| i.id.clone()),
    }
}

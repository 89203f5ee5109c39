//! References: turns research hits into a numbered citation list at the end of the post.
//!
//! Numbering is positional: reference `i` renders as `i + 1.`. Re-embedding replaces
//! the previous section, so running the step twice yields the same document.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::blog::models::{Reference, ReferenceList, ResearchResult};

const REFERENCES_HEADING: &str = "## References";
const EMPTY_REFERENCES: &str = "No references available.";
const MIN_RECOMMENDED_REFERENCES: usize = 3;
const STALE_AFTER_YEARS: i64 = 5;

/// An existing references section through end of document.
static REFERENCES_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\n)## References[\s\S]*$").expect("valid regex"));

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid regex"));

/// Advisory findings. Never changes the references themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceValidation {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Stateless; exists so the pipeline reads as four agents.
pub struct ReferenceManagementAgent;

impl ReferenceManagementAgent {
    pub fn new() -> Self {
        Self
    }

    /// One reference per research result, same order, no filtering.
    pub fn extract_references(&self, research: &[ResearchResult], _blog_content: &str) -> ReferenceList {
        let references: Vec<Reference> = research.iter().map(Reference::from).collect();
        ReferenceList {
            total_count: references.len(),
            references,
            generated_at: Utc::now(),
        }
    }

    /// Replaces any existing references section with a freshly rendered one.
    pub fn embed_references_in_blog(&self, content: &str, references: &[Reference]) -> String {
        let stripped = REFERENCES_SECTION.replace(content, "");
        format!(
            "{}\n\n{REFERENCES_HEADING}\n\n{}",
            stripped.trim_end(),
            format_references(references)
        )
    }
}

impl Default for ReferenceManagementAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// `N. [title](url) - source (year)`, one per line.
pub fn format_references(references: &[Reference]) -> String {
    if references.is_empty() {
        return EMPTY_REFERENCES.to_string();
    }
    references
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let year = r
                .published_at
                .as_deref()
                .and_then(published_year)
                .map(|y| format!(" ({y})"))
                .unwrap_or_default();
            format!("{}. [{}]({}) - {}{year}", i + 1, r.title, r.url, r.source)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Year from an RFC 3339 timestamp, or the first plausible 4-digit year in the string.
pub fn published_year(published_at: &str) -> Option<i32> {
    published_date(published_at).map(|d| d.year())
}

fn published_date(published_at: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(published_at) {
        return Some(dt.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(published_at, "%Y-%m-%d") {
        return Some(date);
    }
    let year = YEAR.find(published_at)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

pub fn validate_references(references: &[Reference]) -> ReferenceValidation {
    validate_references_at(references, Utc::now())
}

/// Same as `validate_references` with an explicit clock.
pub fn validate_references_at(references: &[Reference], now: DateTime<Utc>) -> ReferenceValidation {
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    if references.len() < MIN_RECOMMENDED_REFERENCES {
        suggestions.push(format!(
            "Only {} reference(s); consider citing at least {MIN_RECOMMENDED_REFERENCES} sources.",
            references.len()
        ));
    }

    let mut seen_urls = HashSet::new();
    for (i, r) in references.iter().enumerate() {
        let n = i + 1;
        if r.title.trim().is_empty() {
            issues.push(format!("Reference {n} is missing a title."));
        }
        if r.url.trim().is_empty() {
            issues.push(format!("Reference {n} is missing a URL."));
        } else if !is_web_url(&r.url) {
            issues.push(format!("Reference {n} has an invalid URL: {}", r.url));
        } else if !seen_urls.insert(r.url.as_str()) {
            issues.push(format!("Reference {n} duplicates URL {}", r.url));
        }
    }

    let cutoff = (now - Duration::days(365 * STALE_AFTER_YEARS)).date_naive();
    let stale = references
        .iter()
        .filter_map(|r| r.published_at.as_deref().and_then(published_date))
        .filter(|d| *d < cutoff)
        .count();
    if !references.is_empty() && stale * 2 > references.len() {
        suggestions.push(format!(
            "{stale} of {} references are more than {STALE_AFTER_YEARS} years old; consider more recent sources.",
            references.len()
        ));
    }

    ReferenceValidation {
        is_valid: issues.is_empty(),
        issues,
        suggestions,
    }
}

fn is_web_url(raw: &str) -> bool {
    url::Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

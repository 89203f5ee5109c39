//! Word-level helpers shared by the research, content and image stages.
//!
//! All functions lowercase their input. Tokens are maximal runs of alphanumeric
//! characters (apostrophes and hyphens split words).

use std::collections::{HashMap, HashSet};

/// English stopwords plus markdown/blog filler that should never become a keyword.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "even",
    "every", "few", "for", "from", "further", "get", "had", "has", "have", "having", "he", "her",
    "here", "hers", "him", "his", "how", "however", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "keywords", "like", "made", "make", "many", "may", "me", "might", "more",
    "most", "much", "must", "my", "need", "new", "no", "nor", "not", "now", "of", "off", "often",
    "on", "once", "one", "only", "or", "other", "our", "ours", "out", "over", "own", "same",
    "she", "should", "since", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "use", "used", "using", "very", "was", "way", "ways", "we", "well", "were",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "within",
    "without", "would", "you", "your", "yours", "yourself",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Lowercased alphanumeric tokens in input order.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercased words of `topic` longer than `min_len` characters, duplicates removed.
/// Stopwords are kept: the topic is the user's own phrasing.
pub fn topic_keywords(topic: &str, min_len: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(topic)
        .into_iter()
        .filter(|w| w.chars().count() > min_len)
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

/// The `limit` most frequent non-stopword words longer than 3 characters.
/// Numbers count as words here. Ties keep first-occurrence order.
pub fn top_keywords_by_frequency(text: &str, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for word in tokenize(text) {
        if word.chars().count() <= 3 || is_stop_word(&word) {
            continue;
        }
        let count = counts.entry(word.clone()).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    // `order` is first-occurrence order and sort_by is stable, so ties keep it.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(limit);
    order
}

/// Up to `limit` unique non-stopword words longer than 4 characters, in the
/// order they first appear.
pub fn candidate_keywords(text: &str, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|w| w.chars().count() > 4 && !is_stop_word(w) && !is_numeric(w))
        .filter(|w| seen.insert(w.clone()))
        .take(limit)
        .collect()
}

/// Whitespace-delimited word count.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn is_numeric(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_digit())
}

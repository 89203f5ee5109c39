//! Tone calibration: maps the requested writing tone to a fixed style profile.
//!
//! Exactly three profiles exist. The profile text is embedded verbatim in the
//! generation prompt; it is not negotiable per request.

use serde::{Deserialize, Serialize};

/// Requested voice for a generated post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Academic,
    Casual,
    #[default]
    Professional,
}

/// Style guidance for one tone.
#[derive(Debug, Clone)]
pub struct ToneProfile {
    pub instruction: &'static str,
    pub voice_hints: Vec<&'static str>,
    pub avoid: Vec<&'static str>,
}

/// Returns the style profile for a tone.
pub fn get_tone_profile(tone: Tone) -> ToneProfile {
    match tone {
        Tone::Academic => ToneProfile {
            instruction: "Write in a formal, scholarly tone. Use precise terminology, \
                support claims with evidence from the research, and keep an objective, \
                analytical voice.",
            voice_hints: vec![
                "third person",
                "hedged claims where evidence is limited",
                "cite findings explicitly",
                "define technical terms on first use",
            ],
            avoid: vec!["slang", "exclamation marks", "rhetorical questions", "first person"],
        },
        Tone::Casual => ToneProfile {
            instruction: "Write in a friendly, conversational tone. Address the reader \
                directly, keep sentences short, and use relatable examples.",
            voice_hints: vec![
                "second person",
                "short paragraphs",
                "everyday analogies",
                "light humour where it fits",
            ],
            avoid: vec!["jargon without explanation", "dense citations", "passive voice"],
        },
        Tone::Professional => ToneProfile {
            instruction: "Write in a clear, authoritative, business-appropriate tone. \
                Be concise, lead with practical insights, and keep a confident but \
                measured voice.",
            voice_hints: vec![
                "actionable takeaways",
                "concrete examples",
                "structured arguments",
            ],
            avoid: vec!["slang", "hype", "unsupported superlatives"],
        },
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tone::Academic => "academic",
            Tone::Casual => "casual",
            Tone::Professional => "professional",
        };
        f.write_str(name)
    }
}

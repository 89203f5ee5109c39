// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments only.

/// System prompt fragment that enforces markdown-only output.
pub const MARKDOWN_ONLY_SYSTEM: &str = "You are a skilled long-form writer. \
    You MUST respond with the markdown document only. \
    Do NOT wrap the document in code fences. \
    Do NOT include explanations, notes to the reader, or apologies.";

/// Appended to every rewrite prompt so edits come back as a clean document.
pub const NO_META_COMMENTARY: &str = "\
    CRITICAL: Return ONLY the revised blog post. \
    Do NOT describe what you changed, do NOT add prefaces such as 'Here is the revised post', \
    and do NOT add closing remarks. The first line of your reply must be the `# Title` line.";

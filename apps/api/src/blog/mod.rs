// Blog generation pipeline.
// Four agents (research, content, images, references) run in a fixed order under
// the orchestrator. All model calls go through llm_client; all third-party search
// and photo calls go through sources.

pub mod content;
pub mod handlers;
pub mod images;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod references;
pub mod research;
pub mod text;
pub mod tone;

#[cfg(test)]
pub mod test_support;

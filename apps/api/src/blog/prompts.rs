// All LLM prompt constants for the blog pipeline.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for blog generation.
pub const BLOG_SYSTEM: &str = "You are an expert blog writer who turns research notes \
    into well-structured, engaging, accurate articles. \
    You respond with the markdown article only, following the requested output format exactly. \
    Do NOT invent statistics or quotes that are not supported by the research provided.";

/// Blog generation prompt template.
/// Replace: {topic}, {tone}, {tone_instruction}, {voice_hints}, {avoid},
///          {max_words}, {research}, {structure_hint}
pub const BLOG_PROMPT_TEMPLATE: &str = r###"Write a blog post about: {topic}

TONE: {tone}
{tone_instruction}
Voice: {voice_hints}
Avoid: {avoid}

LENGTH: The post MUST NOT exceed {max_words} words. Stay close to the limit without going over.

RESEARCH (use these facts; do not cite anything that is not listed here):
{research}

STRUCTURE:
{structure_hint}

OUTPUT FORMAT (follow exactly):
# <Title on the first line>

<Introduction paragraph(s)>

## <Section heading>
<Section body>

## <Section heading>
<Section body>

**Keywords:** [keyword1, keyword2, keyword3, keyword4, keyword5]
**Word Count:** <number>

HARD RULES:
1. The first line MUST be the title, starting with "# "
2. Every section heading MUST start with "## "
3. Do NOT write a References section; citations are added automatically
4. The Keywords line lists 5 short SEO keywords in square brackets
5. The Word Count line states the approximate word count of the post"###;

/// Used when research returned nothing.
pub const NO_RESEARCH_PLACEHOLDER: &str =
    "- No external research is available. Rely on well-established general knowledge only.";

pub const STRUCTURE_WITH_IMAGES: &str = "Use at least 3 `##` sections. \
    Each section will be illustrated with a photo placed under its heading, \
    so give every section a concrete, visual subject.";

pub const STRUCTURE_TEXT_ONLY: &str =
    "Use 2 to 5 `##` sections that each develop one idea.";

/// System prompt for blog rewrites.
pub const EDIT_SYSTEM: &str = "You are a meticulous editor revising an existing blog post \
    according to the author's instructions, preserving everything they did not ask to change.";

/// Edit prompt template.
/// Replace: {edit_request}, {original_content}, {no_meta_commentary}
pub const EDIT_PROMPT_TEMPLATE: &str = r###"Revise the blog post below according to this request:

EDIT REQUEST:
{edit_request}

ORIGINAL POST:
{original_content}

{no_meta_commentary}

Keep the markdown structure: a "# Title" first line and "## " section headings."###;

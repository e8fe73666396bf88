//! Caption prompt rendering
//!
//! The instruction is a single minijinja template filled from the request.
//! The image itself is not inlined; it travels as a separate part right
//! after the rendered text, which the closing `Image:` line refers to.

use minijinja::Environment;
use serde::Serialize;
use std::sync::OnceLock;

use crate::core::types::caption::CaptionRequest;

const CAPTION_PROMPT: &str = r#"You are an AI social media expert. For the provided image, generate {{ count }} distinct, engaging caption(s).
Each caption must adhere to a "{{ tone }}" tone.
The language for the captions should be {{ language }}.
Each caption should be between 10 and 50 words.
{% if event_context %}
The photo was taken at or for this event: {{ event_context }}. Make the captions fit the occasion.
{% endif %}
{% if custom_hint %}
Additional context from the user: {{ custom_hint }}
{% endif %}

{% if include_hashtags %}
Each caption should include 2-4 relevant hashtags.
{% else %}
Do not include hashtags in the captions.
{% endif %}
{% if include_emojis %}
Feel free to use relevant emojis to make the captions more engaging.
{% else %}
Do not include emojis in the captions.
{% endif %}

Focus on making each post appealing and likely to get engagement (likes, shares, comments) according to its tone.

Return the output as a JSON object with a single key "captions".
"captions" must be an array of exactly {{ count }} object(s).
Each object in the array must have two keys:
1. "tone": A string representing the tone. This value MUST be "{{ tone }}".
2. "text": A string containing the generated caption text{% if include_hashtags and include_emojis %}, including hashtags and emojis{% elif include_hashtags %}, including hashtags{% elif include_emojis %}, including emojis{% endif %}.

Image: the attached {{ image_mime }} file."#;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn template_env() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env
    })
}

#[derive(Serialize)]
struct PromptContext<'a> {
    count: usize,
    tone: &'a str,
    language: &'a str,
    include_hashtags: bool,
    include_emojis: bool,
    event_context: Option<&'a str>,
    custom_hint: Option<&'a str>,
    image_mime: &'a str,
}

impl<'a> From<&'a CaptionRequest> for PromptContext<'a> {
    fn from(request: &'a CaptionRequest) -> Self {
        Self {
            count: request.count,
            tone: &request.tone,
            language: &request.language,
            include_hashtags: request.include_hashtags,
            include_emojis: request.include_emojis,
            event_context: request.event_context.as_deref(),
            custom_hint: request.custom_hint.as_deref(),
            image_mime: request.image.mime_type(),
        }
    }
}

/// Render the caption instruction for a request
pub fn render_caption_prompt(request: &CaptionRequest) -> Result<String, minijinja::Error> {
    let rendered = template_env().render_str(CAPTION_PROMPT, PromptContext::from(request))?;
    Ok(rendered.trim().to_string())
}

//! caption - generate social media captions for a local image
//!
//! ```text
//! caption beach.jpg --count 2 --tone Witty --event "Vacation Trip"
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use instacaption::core::types::caption::{DEFAULT_CAPTION_COUNT, DEFAULT_LANGUAGE, DEFAULT_TONE};
use instacaption::utils::format_bytes;
use instacaption::utils::logging::init_logging;
use instacaption::{
    CaptionError, CaptionRequest, CaptionResponse, CaptionService, Config, GeminiProvider,
    ImagePayload, share_links,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "caption", version, about = "Generate social media captions for an image")]
struct Args {
    /// Image file (JPEG, PNG, WEBP or GIF, at most 5MB)
    image: PathBuf,

    /// Number of captions, 1 to 5
    #[arg(short = 'n', long, default_value_t = DEFAULT_CAPTION_COUNT)]
    count: usize,

    /// Writing tone, e.g. Casual, Witty, Professional
    #[arg(short, long, default_value = DEFAULT_TONE)]
    tone: String,

    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Leave hashtags out
    #[arg(long)]
    no_hashtags: bool,

    /// Leave emojis out
    #[arg(long)]
    no_emojis: bool,

    /// Occasion the photo belongs to, e.g. "Birthday Party"
    #[arg(short, long)]
    event: Option<String>,

    /// Extra context for the model
    #[arg(long)]
    hint: Option<String>,

    /// Gemini model, overrides the config file
    #[arg(short, long, env = "GEMINI_MODEL")]
    model: Option<String>,

    /// Configuration file
    #[arg(short, long, env = "CAPTION_CONFIG")]
    config: Option<PathBuf>,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,

    /// Print share links pointing at this page URL under every caption
    #[arg(long, value_name = "URL")]
    share_url: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn to_request(&self, image: ImagePayload) -> CaptionRequest {
        let mut request = CaptionRequest::new(image)
            .with_count(self.count)
            .with_tone(self.tone.as_str())
            .with_language(self.language.as_str())
            .with_hashtags(!self.no_hashtags)
            .with_emojis(!self.no_emojis);
        if let Some(event) = &self.event {
            request = request.with_event_context(event.as_str());
        }
        if let Some(hint) = &self.hint {
            request = request.with_custom_hint(hint.as_str());
        }
        request
    }
}

fn render_text(response: &CaptionResponse, share_page: Option<&str>) -> Result<String> {
    let mut out = String::new();
    for (index, caption) in response.captions.iter().enumerate() {
        writeln!(out, "{}. [{}] {}", index + 1, caption.tone, caption.text)?;
        if let Some(page) = share_page {
            for (target, url) in share_links(&caption.text, page)
                .with_context(|| format!("invalid share URL: {}", page))?
            {
                writeln!(out, "   {:<8} {}", target, url)?;
            }
        }
    }
    Ok(out)
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load(args.config.as_deref()).await?;
    config.logging.level = if args.verbose { "debug" } else { "warn" }.to_string();
    init_logging(&config.logging);

    if let Some(model) = &args.model {
        config.provider.model = model.clone();
    }
    config.validate_provider()?;

    let image = ImagePayload::from_file(&args.image)
        .await
        .with_context(|| format!("cannot use {}", args.image.display()))?;
    debug!(
        size = %format_bytes(image.decoded_len() as u64),
        mime_type = image.mime_type(),
        "image loaded"
    );

    let provider = GeminiProvider::new(config.provider.clone())?;
    let service = CaptionService::new(Arc::new(provider));
    let response = service.generate(args.to_request(image)).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_text(&response, args.share_url.as_deref())?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if e
                .downcast_ref::<CaptionError>()
                .is_some_and(CaptionError::is_retryable)
            {
                eprintln!("This looks temporary, try again in a moment.");
            }
            ExitCode::FAILURE
        }
    }
}

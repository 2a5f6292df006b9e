use captionme::{
    CaptionConfig, Captioner, GeminiVisionModel, GenerationStage, ImagePayload, OllamaVisionConfig,
    OllamaVisionModel, Platform, Tone, VisionModel,
};
use std::path::Path;
use std::sync::Arc;

/// Caption one image from the command line.
///
/// Set `CAPTION_BACKEND=gemini` (with `GEMINI_API_KEY`) to use Gemini instead
/// of a local Ollama server. `RUST_LOG=debug` shows the composed instruction.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let image_path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: caption_image <image_path> [platform] [tone] [keywords]");
        std::process::exit(1);
    });

    let platform: Platform = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "instagram".to_string())
        .parse()?;
    let tone: Tone = std::env::args()
        .nth(3)
        .unwrap_or_else(|| "funny".to_string())
        .parse()?;
    let keywords = std::env::args().nth(4).unwrap_or_default();

    let client = reqwest::Client::new();
    let model: Arc<dyn VisionModel> = match std::env::var("CAPTION_BACKEND").as_deref() {
        Ok("gemini") => Arc::new(GeminiVisionModel::from_env(client)?),
        _ => {
            let name = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llava".to_string());
            Arc::new(OllamaVisionModel::new(
                client,
                OllamaVisionConfig::with_model(name),
            ))
        }
    };

    let image = ImagePayload::from_path(Path::new(&image_path))?;
    let config = CaptionConfig::default()
        .with_platform(platform)
        .with_tone(tone)
        .with_hashtags(true)
        .with_keywords(keywords);

    let captioner = Captioner::new(model);
    let result = captioner
        .generate_with_progress(Some(&image), &config, |stage| match stage {
            GenerationStage::Classifying => println!("Detecting subject..."),
            GenerationStage::Captioning => println!("Writing {} caption...", platform),
        })
        .await;

    match result.caption() {
        Some(caption) => println!("\n{}", caption),
        None => {
            eprintln!("{}", result.user_message().unwrap_or_default());
            std::process::exit(2);
        }
    }

    Ok(())
}

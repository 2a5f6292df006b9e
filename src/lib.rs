//! # captionme
//!
//! Social-media caption generation from a single image.
//!
//! A caption request takes an image and a [`CaptionConfig`] (tone, style,
//! length, platform, subject, hashtags, emojis, keywords) and runs a short
//! sequential pipeline against a vision language model:
//!
//! 1. If the subject is [`ContentType::Auto`], ask the model what the photo
//!    shows. Failures here are logged and fall back to "other".
//! 2. Compose the captioning instruction from the configuration.
//! 3. Ask the model for the caption.
//! 4. Strip any leading label such as `Caption:` from the reply.
//!
//! The model is anything implementing [`VisionModel`]. Backends for Ollama
//! ([`OllamaVisionModel`]) and Gemini ([`GeminiVisionModel`]) are included.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use captionme::{
//!     CaptionConfig, Captioner, ImagePayload, OllamaVisionConfig, OllamaVisionModel, Platform,
//! };
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = OllamaVisionModel::new(
//!         reqwest::Client::new(),
//!         OllamaVisionConfig::with_model("llava"),
//!     );
//!     let captioner = Captioner::new(model);
//!
//!     let image = ImagePayload::from_path(Path::new("photo.jpg"))?;
//!     let config = CaptionConfig::default()
//!         .with_platform(Platform::Linkedin)
//!         .with_hashtags(true);
//!
//!     let result = captioner.generate(Some(&image), &config).await;
//!     match result.caption() {
//!         Some(caption) => println!("{}", caption),
//!         None => eprintln!("{}", result.user_message().unwrap_or_default()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Prompt composition
//!
//! ```rust
//! use captionme::{compose, CaptionConfig, ResolvedContentType};
//!
//! let prompt = compose(&CaptionConfig::default(), ResolvedContentType::Flower);
//! assert!(prompt.starts_with("Give only one funny caption"));
//! assert!(prompt.ends_with("Include relevant emojis."));
//! ```

pub mod captioner;
pub mod classifier;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod sequencer;
pub mod types;

// Re-export main types at crate root
pub use captioner::{generate, generate_with_progress, Captioner, GenerationStage};
pub use classifier::{classify, match_content_type};
pub use config::{GeminiConfig, GenerateOptions, OllamaVisionConfig};
pub use error::{ImageError, ModelError, ParseError};
pub use model::{GeminiVisionModel, OllamaVisionModel, VisionModel};
pub use parser::{normalize, strip_think_tags};
pub use prompt::{compose, platform_instruction};
pub use sequencer::{RequestSequencer, RequestTicket};
pub use types::{
    CaptionConfig, ContentType, FailureReason, GenerationResult, ImagePayload, Length, MimeType,
    Platform, ResolvedContentType, Style, Tone,
};

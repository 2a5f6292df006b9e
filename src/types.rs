use crate::error::{ImageError, ParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Declares a lower-case, serde-friendly option enum with `ALL`, `as_str`,
/// `Display` and case-insensitive `FromStr`.
macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Every value, in the order a form would list them.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Lower-case name used in prompts and on the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| ParseError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

option_enum! {
    /// Emotional register of the caption.
    Tone, "tone" {
        Funny => "funny",
        Serious => "serious",
        Romantic => "romantic",
        Sarcastic => "sarcastic",
        Humorous => "humorous",
        Sad => "sad",
    }
}

option_enum! {
    /// Writing style of the caption.
    Style, "style" {
        Casual => "casual",
        Formal => "formal",
        Poetic => "poetic",
        Informative => "informative",
    }
}

option_enum! {
    /// Requested caption length.
    Length, "length" {
        Short => "short",
        Medium => "medium",
        Long => "long",
    }
}

option_enum! {
    /// Social network the caption is written for.
    Platform, "platform" {
        Instagram => "instagram",
        Twitter => "twitter",
        Facebook => "facebook",
        Whatsapp => "whatsapp",
        Linkedin => "linkedin",
    }
}

option_enum! {
    /// Subject of the photo as chosen by the user. `Auto` asks the model to
    /// classify the image first.
    ContentType, "content type" {
        Auto => "auto",
        Person => "person",
        Animal => "animal",
        Flower => "flower",
        Object => "object",
        Other => "other",
    }
}

option_enum! {
    /// Subject category actually used when composing the instruction.
    ResolvedContentType, "resolved content type" {
        Person => "person",
        Animal => "animal",
        Flower => "flower",
        Object => "object",
        Other => "other",
    }
}

impl ContentType {
    /// The concrete category, or `None` for [`ContentType::Auto`].
    pub fn resolved(self) -> Option<ResolvedContentType> {
        match self {
            ContentType::Auto => None,
            ContentType::Person => Some(ResolvedContentType::Person),
            ContentType::Animal => Some(ResolvedContentType::Animal),
            ContentType::Flower => Some(ResolvedContentType::Flower),
            ContentType::Object => Some(ResolvedContentType::Object),
            ContentType::Other => Some(ResolvedContentType::Other),
        }
    }
}

/// Every user-chosen caption preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    pub tone: Tone,
    pub style: Style,
    pub length: Length,
    pub platform: Platform,
    pub content_type: ContentType,
    pub include_hashtags: bool,
    pub include_emojis: bool,
    /// Free text; empty means no keyword instruction.
    pub keywords: String,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            tone: Tone::Funny,
            style: Style::Casual,
            length: Length::Medium,
            platform: Platform::Instagram,
            content_type: ContentType::Auto,
            include_hashtags: false,
            include_emojis: true,
            keywords: String::new(),
        }
    }
}

impl CaptionConfig {
    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_length(mut self, length: Length) -> Self {
        self.length = length;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn with_hashtags(mut self, enabled: bool) -> Self {
        self.include_hashtags = enabled;
        self
    }

    pub fn with_emojis(mut self, enabled: bool) -> Self {
        self.include_emojis = enabled;
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = keywords.into();
        self
    }
}

/// Image encodings accepted for captioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    Jpeg,
    Png,
}

impl MimeType {
    pub fn as_str(self) -> &'static str {
        match self {
            MimeType::Jpeg => "image/jpeg",
            MimeType::Png => "image/png",
        }
    }

    /// Parse a MIME string. `image/jpg` is accepted as an alias.
    pub fn parse(mime: &str) -> Result<Self, ImageError> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Ok(MimeType::Jpeg),
            "image/png" => Ok(MimeType::Png),
            _ => Err(ImageError::UnsupportedMimeType(mime.to_string())),
        }
    }

    /// Infer the type from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ImageError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(MimeType::Jpeg),
            "png" => Ok(MimeType::Png),
            _ => Err(ImageError::UnsupportedMimeType(format!(
                "{} (unrecognized extension)",
                path.display()
            ))),
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single user-selected image. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    mime_type: MimeType,
}

impl ImagePayload {
    /// Build a payload from raw bytes and a MIME string.
    pub fn new(bytes: impl Into<Vec<u8>>, mime_type: &str) -> Result<Self, ImageError> {
        let mime_type = MimeType::parse(mime_type)?;
        Self::with_mime(bytes, mime_type)
    }

    pub fn with_mime(bytes: impl Into<Vec<u8>>, mime_type: MimeType) -> Result<Self, ImageError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        Ok(Self { bytes, mime_type })
    }

    /// Read an image file, inferring its type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, ImageError> {
        let mime_type = MimeType::from_path(path)?;
        let bytes = std::fs::read(path)
            .map_err(|e| ImageError::Read(format!("{}: {}", path.display(), e)))?;
        Self::with_mime(bytes, mime_type)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> MimeType {
        self.mime_type
    }

    /// Standard-alphabet base64 of the image bytes.
    pub fn to_base64(&self) -> String {
        base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &self.bytes)
    }
}

/// Why a generation request did not produce a caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// `generate` was called without an image.
    NoImageSelected,
    /// Auto-detection failed. Absorbed internally and never returned.
    ClassificationFailed,
    /// The captioning call failed or returned nothing usable.
    GenerationFailed,
}

/// Outcome of one `generate` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationResult {
    Success { caption: String },
    Failure { reason: FailureReason },
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success { .. })
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            GenerationResult::Success { caption } => Some(caption),
            GenerationResult::Failure { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            GenerationResult::Success { .. } => None,
            GenerationResult::Failure { reason } => Some(*reason),
        }
    }

    /// Message to show the user for a failed request.
    pub fn user_message(&self) -> Option<&'static str> {
        match self.failure_reason()? {
            FailureReason::NoImageSelected => Some("Please select an image to continue!!"),
            FailureReason::ClassificationFailed | FailureReason::GenerationFailed => {
                Some("Couldn't generate caption...Please try again")
            }
        }
    }
}

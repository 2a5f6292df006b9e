use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Ollama vision backend.
#[derive(Debug, Clone)]
pub struct OllamaVisionConfig {
    /// Ollama API endpoint (e.g., "http://localhost:11434")
    pub endpoint: String,
    /// Vision model name (e.g., "llava", "llava-llama3", "minicpm-v")
    pub model: String,
    /// Request timeout (default: 120s)
    pub timeout: Duration,
    /// Generation options sent to Ollama
    pub options: GenerateOptions,
}

/// Ollama generation options controlling output quality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Maximum tokens to generate
    pub num_predict: u32,
    /// Penalize repeated tokens (default: 1.2)
    pub repeat_penalty: f32,
    /// Window for repeat penalty (default: 128)
    pub repeat_last_n: u32,
    /// Temperature (default: None, uses Ollama default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Top-p sampling (default: None, uses Ollama default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            num_predict: 256,
            repeat_penalty: 1.2,
            repeat_last_n: 128,
            temperature: None,
            top_p: None,
        }
    }
}

impl Default for OllamaVisionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "llava".to_string(),
            timeout: Duration::from_secs(120),
            options: GenerateOptions::default(),
        }
    }
}

impl OllamaVisionConfig {
    /// Create a new config with the given model name.
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set the Ollama endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the generation options.
    pub fn options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }
}

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Configuration for the Gemini `generateContent` backend.
///
/// The API key belongs on the server. Load it with [`GeminiConfig::from_env`]
/// rather than compiling it into anything a client can read.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Read `GEMINI_API_KEY` (or `GOOGLE_API_KEY`), plus optional
    /// `GEMINI_API_BASE` and `GEMINI_MODEL`.
    pub fn from_env() -> Result<Self, ModelError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ModelError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = non_empty("GEMINI_API_KEY")
            .or_else(|| non_empty("GOOGLE_API_KEY"))
            .ok_or_else(|| {
                ModelError::MissingCredentials("GEMINI_API_KEY or GOOGLE_API_KEY not set".to_string())
            })?;

        let mut config = Self::new(api_key);
        if let Some(base) = non_empty("GEMINI_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(model) = non_empty("GEMINI_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `generateContent` URL for the configured model, without the key.
    pub fn generate_url(&self) -> String {
        let model = self.model.trim();
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        format!(
            "{}/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            model_path
        )
    }
}

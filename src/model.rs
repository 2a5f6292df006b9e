//! The model capability: "answer this instruction about this image".
//!
//! The caption pipeline only sees the [`VisionModel`] trait. Two HTTP
//! backends are provided, one for a local Ollama server and one for Google
//! Gemini.

use crate::config::{GeminiConfig, OllamaVisionConfig};
use crate::error::ModelError;
use crate::parser;
use crate::types::ImagePayload;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;

/// A vision language model that can answer a text instruction about an image.
///
/// Implementations must not retry, cache or rate-limit on behalf of the
/// caller. Each call is independent.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Send `instruction` together with `image` and return the raw reply text.
    async fn invoke(&self, instruction: &str, image: &ImagePayload) -> Result<String, ModelError>;
}

#[async_trait]
impl<M: VisionModel + ?Sized> VisionModel for Arc<M> {
    async fn invoke(&self, instruction: &str, image: &ImagePayload) -> Result<String, ModelError> {
        (**self).invoke(instruction, image).await
    }
}

#[async_trait]
impl<M: VisionModel + ?Sized> VisionModel for Box<M> {
    async fn invoke(&self, instruction: &str, image: &ImagePayload) -> Result<String, ModelError> {
        (**self).invoke(instruction, image).await
    }
}

/// [`VisionModel`] backed by Ollama's `/api/generate` endpoint.
#[derive(Debug, Clone)]
pub struct OllamaVisionModel {
    client: Client,
    config: OllamaVisionConfig,
}

impl OllamaVisionModel {
    pub fn new(client: Client, config: OllamaVisionConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &OllamaVisionConfig {
        &self.config
    }

    fn request_body(&self, instruction: &str, image: &ImagePayload) -> Value {
        json!({
            "model": self.config.model,
            "prompt": instruction,
            "images": [image.to_base64()],
            "stream": false,
            "options": self.config.options,
        })
    }
}

#[async_trait]
impl VisionModel for OllamaVisionModel {
    async fn invoke(&self, instruction: &str, image: &ImagePayload) -> Result<String, ModelError> {
        let body = self.request_body(instruction, image);
        let url = format!("{}/api/generate", self.config.endpoint.trim_end_matches('/'));

        log::debug!(
            "POST {} (model {}, {} image bytes)",
            url,
            self.config.model,
            image.bytes().len()
        );

        let resp = self
            .client
            .post(&url)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Connection(self.config.endpoint.clone(), e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(ModelError::Http(status, text));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        ollama_response_text(&json)
    }
}

/// Pull the reply text out of an Ollama `/api/generate` response.
///
/// `<think>` blocks are removed; nothing left counts as an empty reply.
pub fn ollama_response_text(json: &Value) -> Result<String, ModelError> {
    if let Some(err) = json.get("error").and_then(|v| v.as_str()) {
        return Err(ModelError::InvalidResponse(err.to_string()));
    }

    let raw = json.get("response").and_then(|v| v.as_str()).unwrap_or("");
    let text = parser::strip_think_tags(raw).trim().to_string();

    if text.is_empty() {
        return Err(ModelError::EmptyResponse);
    }

    Ok(text)
}

/// [`VisionModel`] backed by Gemini's `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiVisionModel {
    client: Client,
    config: GeminiConfig,
}

impl GeminiVisionModel {
    pub fn new(client: Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    /// Build from `GEMINI_API_KEY` and friends, see [`GeminiConfig::from_env`].
    pub fn from_env(client: Client) -> Result<Self, ModelError> {
        Ok(Self::new(client, GeminiConfig::from_env()?))
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

/// `generateContent` request with the instruction first and the image inline.
pub fn gemini_request_body(instruction: &str, image: &ImagePayload) -> Value {
    json!({
        "contents": [{
            "parts": [
                { "text": instruction },
                {
                    "inlineData": {
                        "mimeType": image.mime_type().as_str(),
                        "data": image.to_base64(),
                    }
                }
            ]
        }]
    })
}

#[async_trait]
impl VisionModel for GeminiVisionModel {
    async fn invoke(&self, instruction: &str, image: &ImagePayload) -> Result<String, ModelError> {
        let url = self.config.generate_url();
        let body = gemini_request_body(instruction, image);

        log::debug!(
            "POST {} ({}, {} image bytes)",
            url,
            image.mime_type(),
            image.bytes().len()
        );

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::Connection(self.config.api_base.clone(), e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(ModelError::Http(status, text));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        gemini_response_text(&json)
    }
}

/// Concatenate the text parts of the first candidate in a `generateContent`
/// response.
pub fn gemini_response_text(json: &Value) -> Result<String, ModelError> {
    if let Some(reason) = json
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(|v| v.as_str())
    {
        return Err(ModelError::InvalidResponse(format!(
            "prompt blocked: {}",
            reason
        )));
    }

    let parts = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or(ModelError::EmptyResponse)?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ModelError::EmptyResponse);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> ImagePayload {
        ImagePayload::new(b"\x89PNG".to_vec(), "image/png").unwrap()
    }

    #[test]
    fn ollama_body_shape() {
        let model = OllamaVisionModel::new(
            Client::new(),
            OllamaVisionConfig::with_model("llava:13b"),
        );
        let body = model.request_body("Describe", &png());
        assert_eq!(body["model"], "llava:13b");
        assert_eq!(body["prompt"], "Describe");
        assert_eq!(body["stream"], false);
        assert_eq!(body["images"][0], "iVBORw==");
        assert_eq!(body["options"]["num_predict"], 256);
    }

    #[test]
    fn ollama_text_strips_think_blocks() {
        let json = json!({"response": "<think>hmm</think> Caption: hi"});
        assert_eq!(ollama_response_text(&json).unwrap(), "Caption: hi");
    }

    #[test]
    fn ollama_text_empty_is_error() {
        let json = json!({"response": "<think>never finished"});
        assert!(matches!(
            ollama_response_text(&json),
            Err(ModelError::EmptyResponse)
        ));
        assert!(matches!(
            ollama_response_text(&json!({})),
            Err(ModelError::EmptyResponse)
        ));
    }

    #[test]
    fn ollama_text_error_field() {
        let json = json!({"error": "model 'llava' not found"});
        match ollama_response_text(&json) {
            Err(ModelError::InvalidResponse(msg)) => assert!(msg.contains("not found")),
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn gemini_body_shape() {
        let body = gemini_request_body("What is this?", &png());
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "What is this?");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "iVBORw==");
    }

    #[test]
    fn gemini_text_joins_parts() {
        let json = json!({
            "candidates": [{
                "content": {"parts": [{"text": "Caption: "}, {"text": "Golden hour glow ✨"}]}
            }]
        });
        assert_eq!(
            gemini_response_text(&json).unwrap(),
            "Caption: Golden hour glow ✨"
        );
    }

    #[test]
    fn gemini_text_blocked_prompt() {
        let json = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        match gemini_response_text(&json) {
            Err(ModelError::InvalidResponse(msg)) => assert_eq!(msg, "prompt blocked: SAFETY"),
            other => panic!("Expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn gemini_text_missing_candidates() {
        assert!(matches!(
            gemini_response_text(&json!({"candidates": []})),
            Err(ModelError::EmptyResponse)
        ));
        let blank = json!({"candidates": [{"content": {"parts": [{"text": "  "}]}}]});
        assert!(matches!(
            gemini_response_text(&blank),
            Err(ModelError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn ollama_unreachable_endpoint_is_connection_error() {
        let config = OllamaVisionConfig::default()
            .endpoint("http://127.0.0.1:9")
            .timeout(std::time::Duration::from_secs(2));
        let model = OllamaVisionModel::new(Client::new(), config);
        let result = model.invoke("Describe", &png()).await;
        assert!(matches!(result, Err(ModelError::Connection(_, _))));
    }
}

use thiserror::Error;

/// Errors raised by a [`VisionModel`](crate::model::VisionModel) backend.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Cannot connect to model endpoint {0}: {1}")]
    Connection(String, String),

    #[error("Model endpoint returned HTTP {0}: {1}")]
    Http(u16, String),

    #[error("Invalid response from model: {0}")]
    InvalidResponse(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),
}

/// Errors raised while building an [`ImagePayload`](crate::types::ImagePayload).
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to read image: {0}")]
    Read(String),

    #[error("Unsupported image type: {0} (expected image/jpeg or image/png)")]
    UnsupportedMimeType(String),

    #[error("Image is empty")]
    Empty,
}

/// Errors raised when parsing configuration values from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::Http(429, "quota exceeded".to_string());
        assert_eq!(err.to_string(), "Model endpoint returned HTTP 429: quota exceeded");

        let err = ModelError::EmptyResponse;
        assert_eq!(err.to_string(), "Model returned an empty response");

        let err = ParseError::UnknownVariant {
            kind: "platform",
            value: "myspace".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown platform 'myspace'");
    }
}

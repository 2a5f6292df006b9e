use crate::classifier;
use crate::model::VisionModel;
use crate::parser;
use crate::prompt;
use crate::types::{CaptionConfig, FailureReason, GenerationResult, ImagePayload};

/// Model call about to be issued by [`generate_with_progress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    /// Auto-detecting the photo subject.
    Classifying,
    /// Requesting the caption itself.
    Captioning,
}

/// Generate a caption for `image` using the preferences in `config`.
///
/// Returns `Failure { NoImageSelected }` without touching the model when
/// `image` is `None`. A failed or empty captioning reply yields
/// `Failure { GenerationFailed }`; the caller may simply call again.
pub async fn generate<M>(
    model: &M,
    image: Option<&ImagePayload>,
    config: &CaptionConfig,
) -> GenerationResult
where
    M: VisionModel + ?Sized,
{
    generate_with_progress(model, image, config, |_| {}).await
}

/// Same as [`generate`], invoking `on_stage` right before each model call.
pub async fn generate_with_progress<M, F>(
    model: &M,
    image: Option<&ImagePayload>,
    config: &CaptionConfig,
    mut on_stage: F,
) -> GenerationResult
where
    M: VisionModel + ?Sized,
    F: FnMut(GenerationStage),
{
    let Some(image) = image else {
        log::debug!("Caption requested without an image");
        return GenerationResult::Failure {
            reason: FailureReason::NoImageSelected,
        };
    };

    let resolved = match config.content_type.resolved() {
        Some(resolved) => resolved,
        None => {
            on_stage(GenerationStage::Classifying);
            classifier::classify(model, image).await
        }
    };

    let instruction = prompt::compose(config, resolved);
    log::debug!("Caption instruction: {}", instruction);

    on_stage(GenerationStage::Captioning);
    let raw = match model.invoke(&instruction, image).await {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("Caption generation failed: {}", e);
            return GenerationResult::Failure {
                reason: FailureReason::GenerationFailed,
            };
        }
    };

    let caption = parser::normalize(&raw);
    if caption.is_empty() {
        log::error!("Caption generation returned no usable text: {:?}", raw);
        return GenerationResult::Failure {
            reason: FailureReason::GenerationFailed,
        };
    }

    GenerationResult::Success { caption }
}

/// Owns a [`VisionModel`] and generates captions with it.
///
/// Holds no per-request state, so one instance can serve any number of
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct Captioner<M> {
    model: M,
}

impl<M: VisionModel> Captioner<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// See [`generate`].
    pub async fn generate(
        &self,
        image: Option<&ImagePayload>,
        config: &CaptionConfig,
    ) -> GenerationResult {
        generate(&self.model, image, config).await
    }

    /// See [`generate_with_progress`].
    pub async fn generate_with_progress<F>(
        &self,
        image: Option<&ImagePayload>,
        config: &CaptionConfig,
        on_stage: F,
    ) -> GenerationResult
    where
        F: FnMut(GenerationStage),
    {
        generate_with_progress(&self.model, image, config, on_stage).await
    }
}

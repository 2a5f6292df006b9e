use crate::model::VisionModel;
use crate::types::{ImagePayload, ResolvedContentType};

/// Fixed question sent to the model when the subject is auto-detected.
pub const CLASSIFY_PROMPT: &str =
    "What is the main subject of this image? Is it a person, animal, flower, object, or something else?";

/// Categories checked against the reply, in priority order.
const MATCH_ORDER: [ResolvedContentType; 4] = [
    ResolvedContentType::Person,
    ResolvedContentType::Animal,
    ResolvedContentType::Flower,
    ResolvedContentType::Object,
];

/// Detect the main subject of `image`.
///
/// Best effort: a failed model call is logged and treated as
/// [`ResolvedContentType::Other`], so this never fails.
pub async fn classify<M>(model: &M, image: &ImagePayload) -> ResolvedContentType
where
    M: VisionModel + ?Sized,
{
    match model.invoke(CLASSIFY_PROMPT, image).await {
        Ok(reply) => {
            let resolved = match_content_type(&reply);
            log::debug!("Classified image as '{}'", resolved);
            resolved
        }
        Err(e) => {
            log::warn!("Content type detection failed, using 'other': {}", e);
            ResolvedContentType::Other
        }
    }
}

/// Map a free-text classification reply to a category.
///
/// The reply is lower-cased and searched for "person", "animal", "flower" and
/// "object" in that order; the first hit wins.
pub fn match_content_type(reply: &str) -> ResolvedContentType {
    let reply = reply.to_lowercase();
    MATCH_ORDER
        .iter()
        .copied()
        .find(|category| reply.contains(category.as_str()))
        .unwrap_or(ResolvedContentType::Other)
}

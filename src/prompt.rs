use crate::types::{CaptionConfig, ResolvedContentType};

/// Fragment used when a platform name has no entry in the lookup table.
pub const GENERIC_PLATFORM_INSTRUCTION: &str = "Generate a caption.";

const PLATFORM_INSTRUCTIONS: &[(&str, &str)] = &[
    (
        "instagram",
        "The caption is for Instagram. Make it engaging and visually appealing.",
    ),
    (
        "twitter",
        "The caption is for Twitter. Keep it concise and within the character limit.",
    ),
    (
        "facebook",
        "The caption is for Facebook. Make it engaging and suitable for a broad audience.",
    ),
    (
        "whatsapp",
        "The caption is for WhatsApp. Keep it casual and fun.",
    ),
    (
        "linkedin",
        "The caption is for LinkedIn. Make it professional and insightful.",
    ),
];

/// Look up the platform-specific sentence by platform name.
///
/// Unknown names get [`GENERIC_PLATFORM_INSTRUCTION`].
pub fn platform_instruction(platform: &str) -> &'static str {
    PLATFORM_INSTRUCTIONS
        .iter()
        .find(|(name, _)| *name == platform)
        .map(|(_, text)| *text)
        .unwrap_or(GENERIC_PLATFORM_INSTRUCTION)
}

/// Build the captioning instruction for a configuration and resolved subject.
///
/// Optional clauses are appended in a fixed order: emojis, hashtags, keywords.
pub fn compose(config: &CaptionConfig, resolved: ResolvedContentType) -> String {
    let mut prompt = format!(
        "Give only one {} caption for the photo in a {} style. The photo is of a {}. The caption should be {} in length. {}",
        config.tone,
        config.style,
        resolved,
        config.length,
        platform_instruction(config.platform.as_str()),
    );

    if config.include_emojis {
        prompt.push_str(" Include relevant emojis.");
    }

    if config.include_hashtags {
        prompt.push_str(" Include relevant hashtags.");
    }

    if !config.keywords.is_empty() {
        prompt.push_str(&format!(" Include these keywords: {}.", config.keywords));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentType, Length, Platform, Style, Tone};

    fn beach_config() -> CaptionConfig {
        CaptionConfig::default()
            .with_tone(Tone::Funny)
            .with_style(Style::Casual)
            .with_length(Length::Medium)
            .with_platform(Platform::Instagram)
            .with_content_type(ContentType::Person)
            .with_hashtags(true)
            .with_emojis(true)
            .with_keywords("beach")
    }

    #[test]
    fn test_compose_golden() {
        let prompt = compose(&beach_config(), ResolvedContentType::Person);
        assert_eq!(
            prompt,
            "Give only one funny caption for the photo in a casual style. The photo is of a person. \
             The caption should be medium in length. The caption is for Instagram. Make it engaging \
             and visually appealing. Include relevant emojis. Include relevant hashtags. Include \
             these keywords: beach."
        );
    }

    #[test]
    fn test_compose_without_optional_clauses() {
        let config = CaptionConfig::default()
            .with_tone(Tone::Serious)
            .with_style(Style::Formal)
            .with_length(Length::Short)
            .with_platform(Platform::Linkedin)
            .with_emojis(false);
        let prompt = compose(&config, ResolvedContentType::Object);
        assert_eq!(
            prompt,
            "Give only one serious caption for the photo in a formal style. The photo is of a object. \
             The caption should be short in length. The caption is for LinkedIn. Make it professional \
             and insightful."
        );
    }

    #[test]
    fn test_compose_uses_resolved_type_not_config() {
        let config = CaptionConfig::default().with_content_type(ContentType::Auto);
        let prompt = compose(&config, ResolvedContentType::Animal);
        assert!(prompt.contains("The photo is of a animal."));
        assert!(!prompt.contains("auto"));
    }

    #[test]
    fn test_compose_clause_order() {
        let prompt = compose(
            &beach_config().with_keywords("sun, sand"),
            ResolvedContentType::Other,
        );
        let emojis = prompt.find("emojis").unwrap();
        let hashtags = prompt.find("hashtags").unwrap();
        let keywords = prompt.find("keywords").unwrap();
        assert!(emojis < hashtags && hashtags < keywords);
        assert!(prompt.ends_with("Include these keywords: sun, sand."));
    }

    #[test]
    fn test_compose_is_deterministic() {
        for platform in Platform::ALL {
            let config = beach_config().with_platform(*platform);
            assert_eq!(
                compose(&config, ResolvedContentType::Flower),
                compose(&config.clone(), ResolvedContentType::Flower)
            );
        }
    }

    #[test]
    fn test_every_platform_has_instruction() {
        for platform in Platform::ALL {
            let text = platform_instruction(platform.as_str());
            assert_ne!(text, GENERIC_PLATFORM_INSTRUCTION, "{platform}");
        }
    }

    #[test]
    fn test_unknown_platform_falls_back() {
        assert_eq!(platform_instruction("myspace"), GENERIC_PLATFORM_INSTRUCTION);
        assert_eq!(platform_instruction(""), GENERIC_PLATFORM_INSTRUCTION);
        assert_eq!(platform_instruction("Instagram"), GENERIC_PLATFORM_INSTRUCTION);
    }
}

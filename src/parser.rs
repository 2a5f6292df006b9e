//! Cleanup of raw model replies.
//!
//! Vision models tend to wrap the text we asked for:
//! - a label in front of the caption: `Caption: Sunny days ahead!`
//! - `<think>...</think>` reasoning blocks from reasoning models

/// Turn a raw captioning reply into display-ready text.
///
/// Everything up to and including the first `:` is dropped and the rest is
/// trimmed. Replies without a colon are only trimmed.
pub fn normalize(raw: &str) -> String {
    match raw.find(':') {
        Some(idx) => raw[idx + 1..].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

/// Strip `<think>...</think>` blocks emitted by reasoning models.
///
/// Handles both complete and incomplete think blocks:
/// - `<think>reasoning</think>content` -> `content`
/// - `<think>reasoning without closing` -> `` (strips to end)
pub fn strip_think_tags(text: &str) -> String {
    let mut result = text.to_string();
    while let Some(start) = result.find("<think>") {
        if let Some(end) = result[start..].find("</think>") {
            result = format!("{}{}", &result[..start], &result[start + end + 8..]);
        } else {
            result.truncate(start);
            break;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_label() {
        assert_eq!(normalize("Caption: Sunny days ahead!"), "Sunny days ahead!");
    }

    #[test]
    fn normalize_without_colon() {
        assert_eq!(normalize("No colon here"), "No colon here");
        assert_eq!(normalize("  padded  \n"), "padded");
    }

    #[test]
    fn normalize_uses_first_colon_only() {
        assert_eq!(
            normalize("Here you go: Time flies: enjoy it ☀️"),
            "Time flies: enjoy it ☀️"
        );
    }

    #[test]
    fn normalize_colon_at_end_is_empty() {
        assert_eq!(normalize("Caption:"), "");
        assert_eq!(normalize("Caption:   "), "");
    }

    #[test]
    fn normalize_keeps_multibyte_text() {
        assert_eq!(normalize("Légende : Café au soleil 🌞"), "Café au soleil 🌞");
    }

    #[test]
    fn strip_think_tags_complete() {
        let input = "<think>reasoning</think>result";
        assert_eq!(strip_think_tags(input), "result");
    }

    #[test]
    fn strip_think_tags_incomplete() {
        let input = "<think>reasoning without close";
        assert_eq!(strip_think_tags(input), "");
    }

    #[test]
    fn strip_think_tags_multiple() {
        let input = "<think>first</think>middle<think>second</think>end";
        assert_eq!(strip_think_tags(input), "middleend");
    }

    #[test]
    fn strip_then_normalize() {
        let raw = "<think>The user wants a caption: short.</think>\nCaption: Paws and relax 🐾";
        assert_eq!(normalize(&strip_think_tags(raw)), "Paws and relax 🐾");
    }
}

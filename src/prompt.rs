//! Prompt construction for roast generation.
//!
//! The system prompt interpolates the style and intensity descriptions; the
//! user prompt is the per-template instruction. Unknown style or intensity
//! keys fall back to generic descriptions rather than failing the request.

use crate::profiles::{intensity_description, style_description};

/// Fallback style description for unknown style keys.
const FALLBACK_STYLE: &str = "playful";

/// Fallback intensity description for unknown intensity levels.
const FALLBACK_INTENSITY: &str = "balanced";

/// Build the system-role instruction for a style and intensity.
pub fn system_prompt(style: &str, intensity: i64) -> String {
    let style_text = style_description(style).unwrap_or(FALLBACK_STYLE);
    let intensity_text = intensity_description(intensity).unwrap_or(FALLBACK_INTENSITY);
    format!(
        "You are a roast generator specializing in {} humor that is {}.\n\
         IMPORTANT FORMATTING RULES:\n\
         1. Return ONLY the completion part, nothing else\n\
         2. NO template phrases (like \"you smell like\", \"i hope\", etc.)\n\
         3. NO explanations or additional sentences",
        style_text, intensity_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_interpolates_known_keys() {
        let prompt = system_prompt("dry", 0);
        assert!(prompt.contains("deadpan delivery"));
        assert!(prompt.contains("moderate roasting"));
    }

    #[test]
    fn test_system_prompt_unknown_style_falls_back() {
        let prompt = system_prompt("interpretive-dance", 0);
        assert!(prompt.contains("playful humor"));
    }

    #[test]
    fn test_system_prompt_unknown_intensity_falls_back() {
        let prompt = system_prompt("dry", 99);
        assert!(prompt.contains("that is balanced"));
    }

    #[test]
    fn test_system_prompt_keeps_formatting_rules() {
        let prompt = system_prompt("sarcastic", -1);
        assert!(prompt.contains("Return ONLY the completion part"));
        assert!(prompt.contains("NO template phrases"));
    }
}

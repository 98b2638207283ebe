//! Theme taxonomy for repeat-avoidance.
//!
//! Classifies a cleaned completion into coarse subject-matter buckets so the
//! recency cache can detect two jokes about the same thing even when their
//! exact wording differs.

use std::collections::HashSet;

/// Category name plus the trigger substrings that put a response in it.
/// A trigger matches when it is a substring of any word in the text.
pub const THEME_CATEGORIES: &[(&str, &[&str])] = &[
    ("clothing", &["sock", "shoe", "shirt", "pants", "clothes", "wear", "wearing"]),
    ("gym", &["gym", "sweat", "workout", "exercise", "locker"]),
    ("food", &["cheese", "milk", "fish", "food", "eat", "eating"]),
    ("animals", &["dog", "cat", "pet", "animal"]),
    ("bathroom", &["toilet", "bathroom", "poop", "fart"]),
    ("garbage", &["trash", "garbage", "dumpster", "waste"]),
];

/// Detect which theme categories a response touches.
pub fn detect_themes(text: &str) -> HashSet<&'static str> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let mut themes = HashSet::new();
    for (category, triggers) in THEME_CATEGORIES {
        let hit = triggers
            .iter()
            .any(|trigger| words.iter().any(|word| word.contains(trigger)));
        if hit {
            themes.insert(*category);
        }
    }
    themes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_single_theme() {
        let themes = detect_themes("a forgotten sock in a drawer");
        assert_eq!(themes, HashSet::from(["clothing"]));
    }

    #[test]
    fn test_detect_multiple_themes() {
        let themes = detect_themes("a sweaty gym sock next to old cheese");
        assert!(themes.contains("gym"));
        assert!(themes.contains("clothing"));
        assert!(themes.contains("food"));
    }

    #[test]
    fn test_trigger_matches_inside_word() {
        // "lockers" contains the "locker" trigger
        let themes = detect_themes("the lockers at school");
        assert_eq!(themes, HashSet::from(["gym"]));
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        let themes = detect_themes("A DUMPSTER behind the mall");
        assert_eq!(themes, HashSet::from(["garbage"]));
    }

    #[test]
    fn test_no_theme() {
        assert!(detect_themes("tried to start a boy band at age 40").is_empty());
        assert!(detect_themes("").is_empty());
    }
}

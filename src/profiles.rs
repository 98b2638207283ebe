//! Static generation profiles: templates, styles, intensities, sampling.
//!
//! All tables here are read-only process-wide data. The handler looks keys
//! up at request time and substitutes a fallback when a key is unknown, so
//! an unrecognized style or intensity never fails a request.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// The four sentence frames a generated fragment can be inserted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Smell,
    Hope,
    Still,
    Heard,
}

impl Template {
    /// Look up a template by its request key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "smell" => Some(Self::Smell),
            "hope" => Some(Self::Hope),
            "still" => Some(Self::Still),
            "heard" => Some(Self::Heard),
            _ => None,
        }
    }

    /// The request key for this template.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smell => "smell",
            Self::Hope => "hope",
            Self::Still => "still",
            Self::Heard => "heard",
        }
    }

    /// The user-role instruction sent to the model for this template.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Smell => "Generate a smell-related description that someone could smell like.",
            Self::Hope => "Generate something unfortunate that could happen to someone.",
            Self::Still => "Generate an embarrassing action or habit someone might do.",
            Self::Heard => {
                "Generate an embarrassing or questionable personal action or decision that \
                 someone made. Focus on specific things they did, like 'tried to start a boy \
                 band at age 40' or 'bought a flip phone in 2024' or 'applied to be on Love \
                 Island but got rejected'. It should be about their specific choices or \
                 actions, not general life situations."
            }
        }
    }

    /// Wrap a cleaned fragment in this template's sentence frame.
    ///
    /// Output follows the crate's canonical convention: all lowercase, with
    /// the frame owning any sentence punctuation.
    pub fn apply_frame(&self, fragment: &str) -> String {
        match self {
            Self::Smell => format!("you smell like {}", fragment),
            Self::Hope => format!("i hope {}", fragment),
            Self::Still => format!("don't you still {}", fragment),
            Self::Heard => {
                format!("i heard you {}. how's that been going for you?", fragment)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

/// Natural-language description of a humor style, interpolated into the
/// system prompt. Returns `None` for unknown keys; the prompt builder
/// substitutes a generic fallback.
pub fn style_description(style: &str) -> Option<&'static str> {
    match style {
        // Generic styles
        "dumb" => Some(
            "Use simple, immature, middle-school level insults. Keep it basic and \
             childish like a 13-year-old would say.",
        ),
        "dry" => Some("Use deadpan delivery with matter-of-fact statements"),
        "observational" => Some("Base humor on relatable, everyday situations"),
        "sarcastic" => Some("Employ ironic, witty humor with a hint of mockery"),
        "shock" => Some("Create unexpected, surprising humor that subverts expectations"),
        "wordplay" => Some("Focus on puns, clever language, and double meanings"),
        "absurd" => Some("Generate nonsensical, random humor that defies logic"),

        // Comedian-specific styles
        "pryor" => Some(
            "Channel Richard Pryor's raw, honest, street-smart observations with perfect \
             timing and character work",
        ),
        "carlin" => Some(
            "Channel George Carlin's sharp social criticism with intelligent wordplay and \
             counterculture perspective",
        ),
        "mac" => Some(
            "Channel Bernie Mac's bold, unapologetic storytelling with a mix of tough love \
             and exaggerated reactions",
        ),
        "williams" => Some(
            "Channel Robin Williams' manic, high-energy stream of consciousness with rapid \
             character switches",
        ),
        "chappelle" => Some(
            "Channel Dave Chappelle's clever social commentary with street-smart \
             storytelling and race, gender, and cultural observations",
        ),
        "rock" => Some(
            "Channel Chris Rock's exaggerated delivery with hard-hitting social \
             observations on race, political and relationship insights",
        ),
        "seinfeld" => Some(
            "Channel Jerry Seinfeld's meticulous observations about everyday life and \
             human behavior",
        ),
        "burr" => Some(
            "Channel Bill Burr's aggressive, unapologetic rants with working-class \
             perspective",
        ),
        "hedberg" => Some(
            "Channel Mitch Hedberg's surreal one-liners with unique observations and \
             clever misdirection",
        ),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Intensities
// ---------------------------------------------------------------------------

/// Severity description for an intensity level. Returns `None` for unknown
/// levels; the prompt builder substitutes a "balanced" fallback.
pub fn intensity_description(intensity: i64) -> Option<&'static str> {
    match intensity {
        1 => Some(
            "keeping it lighthearted and silly, like playground teasing or dad jokes. \
             Should make people laugh without any hurt feelings. Think 'knock-knock joke' \
             level of harmless fun.",
        ),
        0 => Some(
            "using moderate roasting that might make someone feel embarrassed but not \
             hurt. Like friendly banter between coworkers or casual friends. Should be \
             okay to say in most social situations.",
        ),
        -1 => Some(
            "using dark humor that makes light of uncomfortable truths and taboo \
             subjects. Like gallows humor that provokes both discomfort and nervous \
             laughter. Should hit psychological weak spots and make people question \
             whether they should laugh. Think comedy that punches at societal norms and \
             personal insecurities, but stays within AI guidelines.",
        ),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Sampling configuration
// ---------------------------------------------------------------------------

/// Default temperature applied when a style has no entry in the table.
pub const DEFAULT_TEMPERATURE: f64 = 0.9;

/// Sampling parameters passed through to the completion API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub temperature: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
    pub max_tokens: u32,
}

impl SamplingConfig {
    fn with_temperature(temperature: f64) -> Self {
        Self {
            temperature,
            frequency_penalty: 2.0,
            presence_penalty: 1.0,
            max_tokens: 50,
        }
    }
}

/// Select sampling parameters for a style. Every style shares the same
/// penalty and length settings; only temperature varies.
pub fn sampling_for(style: &str) -> SamplingConfig {
    let temperature = match style {
        "dumb" => 0.2,
        "dry" => 0.7,
        "observational" => 0.9,
        "sarcastic" => 1.0,
        "shock" => 1.1,
        "wordplay" => 1.0,
        "absurd" => 1.2,
        _ => DEFAULT_TEMPERATURE,
    };
    SamplingConfig::with_temperature(temperature)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_from_key_known() {
        assert_eq!(Template::from_key("smell"), Some(Template::Smell));
        assert_eq!(Template::from_key("hope"), Some(Template::Hope));
        assert_eq!(Template::from_key("still"), Some(Template::Still));
        assert_eq!(Template::from_key("heard"), Some(Template::Heard));
    }

    #[test]
    fn test_template_from_key_unknown() {
        assert_eq!(Template::from_key("taste"), None);
        assert_eq!(Template::from_key(""), None);
    }

    #[test]
    fn test_every_template_has_instruction_and_frame() {
        for template in [Template::Smell, Template::Hope, Template::Still, Template::Heard] {
            assert!(!template.instruction().is_empty());
            assert!(template.apply_frame("x").contains('x'));
        }
    }

    #[test]
    fn test_apply_frame_smell() {
        assert_eq!(
            Template::Smell.apply_frame("a forgotten gym sock in a sauna"),
            "you smell like a forgotten gym sock in a sauna"
        );
    }

    #[test]
    fn test_apply_frame_heard_adds_followup() {
        assert_eq!(
            Template::Heard.apply_frame("tried to start a boy band at age 40"),
            "i heard you tried to start a boy band at age 40. how's that been going for you?"
        );
    }

    #[test]
    fn test_style_description_fallback() {
        assert!(style_description("dry").is_some());
        assert!(style_description("hedberg").is_some());
        assert!(style_description("unknown-style").is_none());
    }

    #[test]
    fn test_intensity_description_fallback() {
        assert!(intensity_description(1).is_some());
        assert!(intensity_description(0).is_some());
        assert!(intensity_description(-1).is_some());
        assert!(intensity_description(42).is_none());
    }

    #[test]
    fn test_sampling_temperatures() {
        assert_eq!(sampling_for("dumb").temperature, 0.2);
        assert_eq!(sampling_for("absurd").temperature, 1.2);
        assert_eq!(sampling_for("burr").temperature, DEFAULT_TEMPERATURE);
        assert_eq!(sampling_for("nope").temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_sampling_shared_base() {
        let config = sampling_for("dry");
        assert_eq!(config.frequency_penalty, 2.0);
        assert_eq!(config.presence_penalty, 1.0);
        assert_eq!(config.max_tokens, 50);
    }
}

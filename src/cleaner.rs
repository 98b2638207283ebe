//! Completion cleanup pipeline.
//!
//! The model is told to return only the bare completion, but in practice it
//! echoes template phrasing, wraps output in markers or quotes, and tacks on
//! explanatory clauses. Each step here is a pure transform; `clean` applies
//! them in a fixed order, repeated to a fixed point so that one strip
//! exposing another (a quoted echo, stacked echo phrases) still comes out
//! fully cleaned. The pipeline is idempotent on its own output.
//!
//! Canonical output convention: lowercase, no leading echo phrases, no
//! trailing punctuation. The sentence frame owns all final punctuation.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)completion:").unwrap());
static LEADING_BRACKET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\[").unwrap());
static TRAILING_BRACKET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\]\s*$").unwrap());
static LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^completion:?\s*").unwrap());

static ECHO_YOU: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^you(?:'?re|'?d)?\s+").unwrap());
static ECHO_SMELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:you\s+)?smell\s+like\s+").unwrap());
static ECHO_HOPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:i\s+)?hope\s+(?:you\s+)?").unwrap());
static ECHO_STILL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:don'?t\s+)?(?:you\s+)?still\s+").unwrap());
static ECHO_HEARD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:i\s+)?heard\s+(?:you\s+)?").unwrap());

static TRAILING_SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[.!?]+\s+.+$").unwrap());
static EXPLANATION_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*,\s*.*(?:it'?s|like|that|because|and)\s+.*$").unwrap());
static SURROUNDING_QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^["']+|["']+$"#).unwrap());
static TRAILING_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s.!?,]+$").unwrap());
static DUMB_CLAUSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,.]|\s+(?:and|but|or)\s+").unwrap());

/// Keep only the text after the last `COMPLETION:` marker, stripping the
/// brackets some models wrap it in. Text without the marker passes through.
pub fn extract_completion(text: &str) -> String {
    if !MARKER.is_match(text) {
        return text.trim().to_string();
    }
    let last = MARKER.split(text).last().unwrap_or(text);
    let no_open = LEADING_BRACKET.replace(last, "");
    let no_close = TRAILING_BRACKET.replace(&no_open, "");
    no_close.trim().to_string()
}

/// Strip a leading `completion:` label the marker pass may have missed.
pub fn strip_label(text: &str) -> String {
    LABEL.replace(text, "").to_string()
}

/// Strip template phrases the model echoed verbatim at the start of the
/// completion ("you're", "you smell like", "i hope you", and so on).
pub fn strip_template_echo(text: &str) -> String {
    let step = ECHO_YOU.replace(text, "");
    let step = ECHO_SMELL.replace(&step, "");
    let step = ECHO_HOPE.replace(&step, "");
    let step = ECHO_STILL.replace(&step, "");
    ECHO_HEARD.replace(&step, "").to_string()
}

/// Truncate at the first sentence boundary that is followed by more text,
/// then drop a trailing comma clause that starts explaining the joke.
pub fn truncate_explanations(text: &str) -> String {
    let step = TRAILING_SENTENCE.replace(text, "");
    EXPLANATION_CLAUSE.replace(&step, "").to_string()
}

/// Strip quote characters surrounding the whole fragment.
pub fn strip_quotes(text: &str) -> String {
    SURROUNDING_QUOTES.replace_all(text, "").to_string()
}

/// Drop trailing punctuation so the sentence frame owns it.
pub fn strip_trailing_punctuation(text: &str) -> String {
    TRAILING_PUNCT.replace(text, "").to_string()
}

/// Keep only the first clause, splitting on commas, periods, or
/// coordinating conjunctions. Applied for the "dumb" style only.
pub fn first_clause(text: &str) -> String {
    DUMB_CLAUSE
        .split(text)
        .next()
        .unwrap_or(text)
        .trim()
        .to_string()
}

/// Run the full cleanup pipeline over a raw completion.
///
/// The strip passes can expose one another: quotes hide a leading echo
/// until they are removed, and one echo phrase can sit behind another
/// ("i heard you still ..."). The pass repeats until the text stops
/// changing; every step only removes characters, so the loop terminates.
pub fn clean(raw: &str, style: &str) -> String {
    let mut text = extract_completion(raw);
    loop {
        let step = strip_label(&text);
        let step = strip_template_echo(&step);
        let step = truncate_explanations(&step);
        let step = strip_quotes(&step);
        let step = strip_trailing_punctuation(&step);
        let step = step.trim().to_string();
        if step == text {
            break;
        }
        text = step;
    }
    let text = text.to_lowercase();

    if style == "dumb" {
        first_clause(&text)
    } else {
        text
    }
}

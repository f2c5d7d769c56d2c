//! Heuristic series keys for recurring session topics.

use once_cell::sync::Lazy;
use regex::Regex;

// One trailing whole-word run of digits or roman-numeral letters.
static SERIES_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([ivxlcdm]+|\d+)\b$").expect("valid series suffix pattern"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Derives the canonical topic key of a session description.
///
/// Lowercases the trimmed description, strips one trailing ordinal (a run
/// of digits or roman-numeral letters, as a whole word at the end), and
/// collapses internal whitespace runs to single spaces. Sessions of one
/// recurring topic ("Anamnesetraining 5", "Anamnesetraining 6") map to the
/// same key.
///
/// This is a heuristic, not a topic classifier: two differently worded
/// descriptions of the same real topic get different keys, and a topic
/// that genuinely ends in a roman-numeral word ("Workshop X") loses it.
/// Accepted limitation.
///
/// # Examples
///
/// ```
/// use rooster_rust::parsing::series::series_key;
///
/// assert_eq!(series_key("Anamnesetraining 5"), "anamnesetraining");
/// assert_eq!(series_key("Training III"), "training");
/// assert_eq!(series_key("Intake gesprek"), "intake gesprek");
/// ```
pub fn series_key(description: &str) -> String {
    let lowered = description.trim().to_lowercase();
    let stripped = SERIES_SUFFIX.replace(&lowered, "");
    WHITESPACE_RUN
        .replace_all(stripped.trim(), " ")
        .to_string()
}

//! Cleanup of raw text fragments scraped from conjugation pages.
//!
//! Each function is total: anything that does not match a rule passes
//! through unchanged, including the empty string.

use unicode_normalization::UnicodeNormalization;

/// Info-icon glyph WordReference appends to tense headings, followed by
/// tooltip text we don't want.
const INFO_MARKER: char = '\u{24D8}';

/// Compose to NFC and trim markup indentation from a cell's text
pub fn clean_fragment(raw: &str) -> String {
    let composed: String = raw.nfc().collect();
    composed.trim().to_string()
}

/// Strip the info marker and everything after it from a tense heading
pub fn normalize_tense_label(raw: &str) -> String {
    match raw.find(INFO_MARKER) {
        Some(index) => raw[..index].to_string(),
        None => raw.to_string(),
    }
}

/// Strip surrounding parentheses, or collapse the third-person compound
/// labels to a single slash-joined token.
pub fn normalize_pronoun_label(raw: &str) -> String {
    if let Some(inner) = raw.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        inner.to_string()
    } else if raw == "él, ella, Ud." {
        "él/ella/usted".to_string()
    } else if raw == "ellos, ellas, Uds." {
        "ellos/ellas/ustedes".to_string()
    } else {
        raw.to_string()
    }
}

/// Reduce a conjugation cell to the form the user is expected to type.
///
/// Multi-word cells containing the letter "o" keep only their first word
/// (reflexive cells such as "me levanto"). A comma anywhere in the result
/// means a trailing alternate-form marker, so the last character is dropped.
/// The rule is tuned to WordReference's markup and is knowingly lossy.
pub fn normalize_conjugated_form(raw: &str) -> String {
    let mut words = raw.split_whitespace();
    let first = words.next();
    let multi_word = words.next().is_some();

    let mut form = match first {
        Some(first) if multi_word && raw.contains('o') => first.to_string(),
        _ => raw.to_string(),
    };

    if form.contains(',') {
        form.pop();
    }

    form
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests for text normalization
// ─────────────────────────────────────────────────────────────────────────────

//! Deterministic text checks used when the judge is bypassed or unavailable.

/// Phrases that mark an answer as generic or self-admittedly incomplete.
const VAGUE_MARKERS: &[&str] = &[
    "lacks",
    "missing",
    "vague",
    "unclear",
    "does not",
    "doesn't",
    "no information",
    "incomplete",
    "better services",
    "competitive prices",
    "good quality",
];

/// Longest local summary produced when the judge cannot summarize.
pub const FALLBACK_SUMMARY_CHARS: usize = 280;

#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[must_use]
pub fn char_count(text: &str) -> usize {
    text.trim().chars().count()
}

/// Fallback completeness check: enough words and no vague marker.
#[must_use]
pub fn looks_complete(text: &str, min_words: usize) -> bool {
    if word_count(text) < min_words {
        return false;
    }
    let lowered = text.to_lowercase();
    !VAGUE_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Collapse whitespace and cut at a word boundary near `max_chars`.
///
/// Never returns an empty string for non-blank input.
#[must_use]
pub fn condense(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let cut: String = collapsed.chars().take(max_chars).collect();
    let trimmed = match cut.rfind(' ') {
        Some(space) if space > 0 => &cut[..space],
        _ => cut.as_str(),
    };
    format!("{}...", trimmed.trim_end_matches([',', ';', ':', '.']))
}

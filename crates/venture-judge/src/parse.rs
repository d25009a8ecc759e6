//! Salvage structured content from model output.
//!
//! Models wrap JSON in markdown fences, prepend chatter, or answer with a bare
//! word where an object was requested. Parsing tries the raw text first, then a
//! small deterministic set of candidates extracted from it.

use serde::Deserialize;

use crate::Classification;
use crate::error::JudgeError;

const MAX_ERROR_CONTENT_LEN: usize = 240;

fn push_unique_candidate(candidates: &mut Vec<String>, candidate: impl Into<String>) {
    let candidate = candidate.into();
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return;
    }
    if !candidates.iter().any(|existing| existing == trimmed) {
        candidates.push(trimmed.to_string());
    }
}

fn strip_markdown_fences(content: &str) -> Option<String> {
    let trimmed = content.trim();
    let without_open = trimmed.strip_prefix("```")?;
    let body = without_open
        .find('\n')
        .map_or(without_open, |newline| &without_open[newline + 1..]);
    let end = body.rfind("```")?;
    Some(body[..end].trim().to_string())
}

fn extract_balanced_json_from(content: &str, start: usize) -> Option<String> {
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in content[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                if stack.pop() != Some(ch) {
                    return None;
                }
                if stack.is_empty() {
                    let end = start + offset + ch.len_utf8();
                    return Some(content[start..end].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

fn extract_json_candidates(content: &str, max_candidates: usize) -> Vec<String> {
    let mut out = Vec::new();
    for (idx, ch) in content.char_indices() {
        if out.len() >= max_candidates {
            break;
        }
        if ch == '{' || ch == '[' {
            if let Some(candidate) = extract_balanced_json_from(content, idx) {
                push_unique_candidate(&mut out, candidate);
            }
        }
    }
    out
}

fn truncate_for_error(content: &str) -> String {
    content.chars().take(MAX_ERROR_CONTENT_LEN).collect()
}

/// Parse `content` as `T`, trying fenced and embedded JSON if the raw text
/// does not parse.
///
/// # Errors
///
/// Returns `JudgeError::Malformed` when no candidate deserializes.
pub fn parse_structured_content<T>(content: &str) -> Result<T, JudgeError>
where
    T: serde::de::DeserializeOwned,
{
    let mut candidates = Vec::new();
    push_unique_candidate(&mut candidates, content);
    if let Some(stripped) = strip_markdown_fences(content) {
        push_unique_candidate(&mut candidates, stripped);
    }
    let mut idx = 0;
    while idx < candidates.len() {
        let current = candidates[idx].clone();
        for extracted in extract_json_candidates(&current, 4) {
            push_unique_candidate(&mut candidates, extracted);
        }
        idx += 1;
    }

    let mut last_err = None;
    for candidate in candidates {
        match serde_json::from_str::<T>(&candidate) {
            Ok(data) => return Ok(data),
            Err(err) => last_err = Some(err.to_string()),
        }
    }

    Err(JudgeError::Malformed(format!(
        "{} (content: {})",
        last_err.unwrap_or_else(|| "empty response".to_string()),
        truncate_for_error(content)
    )))
}

#[derive(Deserialize)]
struct RawClassification {
    #[serde(alias = "verdict", alias = "category")]
    label: String,
    #[serde(default)]
    confidence: Option<f32>,
    #[serde(default, alias = "rationale")]
    reason: Option<String>,
}

/// Parse a classification verdict.
///
/// Accepts `{"label": .., "confidence": .., "reason": ..}` (fenced or not) and
/// falls back to the first word of a bare-text answer with no confidence.
///
/// # Errors
///
/// Returns `JudgeError::Malformed` if the content holds no usable label.
pub fn parse_classification(content: &str) -> Result<Classification, JudgeError> {
    if let Ok(raw) = parse_structured_content::<RawClassification>(content) {
        let label = raw.label.trim().to_string();
        if !label.is_empty() {
            return Ok(Classification {
                label,
                confidence: raw.confidence.map(|c| c.clamp(0.0, 1.0)),
                reason: raw.reason.filter(|r| !r.trim().is_empty()),
            });
        }
    }

    let word = content
        .split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '_'))
        .unwrap_or_default();
    if word.is_empty() {
        return Err(JudgeError::Malformed(format!(
            "no label in classification (content: {})",
            truncate_for_error(content)
        )));
    }
    Ok(Classification {
        label: word.to_string(),
        confidence: None,
        reason: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        ok: bool,
    }

    #[rstest]
    #[case(r#"{"ok": true}"#)]
    #[case("```json\n{\"ok\": true}\n```")]
    #[case("Here you go: {\"ok\": true} hope that helps")]
    #[case("```\n{\"ok\": true}\n```")]
    fn salvages_wrapped_json(#[case] content: &str) {
        let probe: Probe = parse_structured_content(content).unwrap();
        assert_eq!(probe, Probe { ok: true });
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_extraction() {
        let content = r#"note: {"ok": true, "text": "a } inside"} trailing"#;
        #[derive(Deserialize)]
        struct WithText {
            ok: bool,
            text: String,
        }
        let parsed: WithText = parse_structured_content(content).unwrap();
        assert!(parsed.ok);
        assert_eq!(parsed.text, "a } inside");
    }

    #[test]
    fn unparseable_content_is_malformed() {
        let err = parse_structured_content::<Probe>("no json here").unwrap_err();
        assert!(matches!(err, JudgeError::Malformed(_)));
    }

    #[test]
    fn classification_from_json() {
        let c = parse_classification(
            r#"{"label": "INCOMPLETE", "confidence": 0.8, "reason": "no numbers"}"#,
        )
        .unwrap();
        assert_eq!(c.label, "INCOMPLETE");
        assert_eq!(c.confidence, Some(0.8));
        assert_eq!(c.reason.as_deref(), Some("no numbers"));
    }

    #[test]
    fn classification_from_bare_word() {
        let c = parse_classification("COMPLETE.").unwrap();
        assert_eq!(c.label, "COMPLETE");
        assert_eq!(c.confidence, None);

        let c = parse_classification("\"marketSize\"").unwrap();
        assert_eq!(c.label, "marketSize");
    }

    #[test]
    fn classification_confidence_is_clamped() {
        let c = parse_classification(r#"{"verdict": "META", "confidence": 4.0}"#).unwrap();
        assert_eq!(c.label, "META");
        assert_eq!(c.confidence, Some(1.0));
    }

    #[test]
    fn empty_classification_is_malformed() {
        assert!(parse_classification("   ").is_err());
    }
}

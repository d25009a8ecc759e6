//! Report compilation and scoring-document parsing.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use venture_core::catalog::CHECKPOINT_AT;
use venture_core::entities::{CATEGORY_MAX_SCORE, CategoryScore, Report, Session};
use venture_core::enums::{Recommendation, ReportCategory};
use venture_judge::ScoringRequest;
use venture_judge::parse::parse_structured_content;

use crate::bounded::BoundedJudge;
use crate::error::EngineError;
use crate::tracker;

/// Accepted gap between the stated and the recomputed total.
const TOTAL_TOLERANCE: f64 = 0.01;

pub struct ReportAggregator;

impl ReportAggregator {
    /// Score the session. Does not consult or update the cached report.
    ///
    /// # Errors
    ///
    /// `PreconditionFailed` below the answer threshold, `JudgeUnavailable`
    /// when the scoring call fails and `MalformedJudgeOutput` when the
    /// returned document does not fit the report schema. None are retried.
    pub async fn compile(
        judge: &BoundedJudge,
        session: &Session,
        now: DateTime<Utc>,
    ) -> Result<Report, EngineError> {
        if !session.questionnaire.has_report_threshold() {
            return Err(EngineError::PreconditionFailed(format!(
                "{} questions answered, at least {CHECKPOINT_AT} needed for a report",
                session.questionnaire.completed_count()
            )));
        }

        let request = scoring_request(session);
        let raw = judge.score(&request).await.inspect_err(|error| {
            tracing::warn!(session = %session.id, %error, "scoring call failed");
        })?;
        parse_report(&raw, &session.selected_comparisons, now).inspect_err(|error| {
            tracing::warn!(session = %session.id, %error, "scoring document rejected");
        })
    }
}

/// Everything the scorer sees: components, full transcript, comparisons.
#[must_use]
pub fn scoring_request(session: &Session) -> ScoringRequest {
    ScoringRequest {
        business_name: session.name.clone(),
        industry: session.industry.clone(),
        components: tracker::briefs(session),
        history: session.transcript.clone(),
        comparisons: session.selected_comparisons.clone(),
    }
}

/// Parse a scoring document into a [`Report`].
///
/// Accepts scores as numbers or `"x/5"` strings. The total is always the
/// recomputed sum of the five categories.
///
/// # Errors
///
/// Returns `MalformedJudgeOutput` when the document is not JSON, a category
/// is missing or out of range, or the recommendation is unknown.
pub fn parse_report(
    raw: &str,
    comparisons: &[String],
    now: DateTime<Utc>,
) -> Result<Report, EngineError> {
    let document: Value = parse_structured_content(raw)
        .map_err(|e| EngineError::MalformedJudgeOutput(e.to_string()))?;
    let root = document
        .as_object()
        .ok_or_else(|| malformed("scoring document is not an object"))?;
    let feedback = field(root, &["evaluation_feedback", "feedback", "scores"])
        .and_then(Value::as_object)
        .unwrap_or(root);

    let mut categories = Vec::with_capacity(ReportCategory::ALL.len());
    for category in ReportCategory::ALL {
        let entry = field(feedback, &[category.heading(), category.as_str()])
            .ok_or_else(|| malformed(format!("missing category '{}'", category.heading())))?;
        let (score_value, rationale) = match entry {
            Value::Object(map) => (
                field(map, &["score"]),
                text_field(map, &["rationale", "feedback", "reason"]),
            ),
            other => (Some(other), String::new()),
        };
        let score = score_value
            .and_then(parse_score)
            .ok_or_else(|| malformed(format!("unreadable score for '{}'", category.heading())))?;
        if !(0.0..=CATEGORY_MAX_SCORE).contains(&score) {
            return Err(malformed(format!(
                "score {score} for '{}' is outside 0..={CATEGORY_MAX_SCORE}",
                category.heading()
            )));
        }
        categories.push(CategoryScore {
            category,
            score,
            rationale,
        });
    }

    let total: f64 = categories.iter().map(|c| c.score).sum();
    let overall = field(feedback, &["overall"]).and_then(Value::as_object);
    if let Some(stated) = overall.and_then(|o| field(o, &["score", "total"])).and_then(parse_score) {
        if (stated - total).abs() > TOTAL_TOLERANCE {
            tracing::warn!(stated, total, "stated total differs from category sum; using the sum");
        }
    }
    let overall_feedback = overall
        .map(|o| text_field(o, &["feedback", "rationale", "summary"]))
        .unwrap_or_default();

    let recommendation = field(root, &["ai_investment_recommendation", "recommendation"])
        .and_then(Value::as_str)
        .and_then(parse_recommendation)
        .ok_or_else(|| malformed("missing or unknown investment recommendation"))?;

    Ok(Report {
        categories,
        total,
        recommendation,
        rationale: text_field(root, &["investment_rationale", "rationale"]),
        overall_feedback,
        comparisons: comparisons.to_vec(),
        generated_at: now,
    })
}

fn malformed(message: impl Into<String>) -> EngineError {
    EngineError::MalformedJudgeOutput(message.into())
}

/// Case-insensitive key lookup.
fn field<'v>(map: &'v Map<String, Value>, names: &[&str]) -> Option<&'v Value> {
    map.iter()
        .find(|(key, _)| names.iter().any(|name| key.trim().eq_ignore_ascii_case(name)))
        .map(|(_, value)| value)
}

fn text_field(map: &Map<String, Value>, names: &[&str]) -> String {
    field(map, names)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// `4`, `4.5`, `"4"`, `"4/5"` and `"4.5 / 5"` all read as the numerator.
fn parse_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let numerator = s.split('/').next()?.trim();
            numerator.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Accepts the bare label or a label followed by commentary (`"YES - strong team"`).
fn parse_recommendation(raw: &str) -> Option<Recommendation> {
    Recommendation::parse(raw).or_else(|| {
        raw.split(|c: char| !c.is_ascii_alphabetic())
            .find(|token| !token.is_empty())
            .and_then(Recommendation::parse)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::testing::sample_report_doc;

    #[test]
    fn parses_sample_document() {
        let report = parse_report(&sample_report_doc(), &["A".into()], Utc::now()).unwrap();
        assert_eq!(report.categories.len(), 5);
        assert_eq!(report.score_for(ReportCategory::ExecutionFeasibility), Some(3.5));
        assert_eq!(report.score_for(ReportCategory::MarketOpportunity), Some(4.0));
        assert!((report.total - 16.5).abs() < f64::EPSILON);
        assert_eq!(report.recommendation, Recommendation::Maybe);
        assert_eq!(report.overall_feedback, "Promising but early.");
        assert_eq!(report.rationale, "Worth a second meeting.");
        assert_eq!(report.comparisons, vec!["A".to_string()]);
    }

    #[test]
    fn fenced_document_is_salvaged() {
        let raw = format!("Here you go:\n```json\n{}\n```", sample_report_doc());
        assert!(parse_report(&raw, &[], Utc::now()).is_ok());
    }

    #[test]
    fn total_is_recomputed() {
        let raw = sample_report_doc().replace("16.5/25", "25/25");
        let report = parse_report(&raw, &[], Utc::now()).unwrap();
        assert!((report.total - 16.5).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case::not_json("the idea is fine")]
    #[case::missing_category(r#"{"evaluation_feedback": {"Value Proposition": {"score": 3}}, "ai_investment_recommendation": "YES"}"#)]
    fn malformed_documents_are_rejected(#[case] raw: &str) {
        let err = parse_report(raw, &[], Utc::now()).unwrap_err();
        assert!(matches!(err, EngineError::MalformedJudgeOutput(_)));
    }

    #[test]
    fn out_of_range_score_is_rejected() {
        let raw = sample_report_doc().replace("\"4/5\"", "\"7/5\"");
        let err = parse_report(&raw, &[], Utc::now()).unwrap_err();
        assert!(matches!(err, EngineError::MalformedJudgeOutput(_)));
    }

    #[test]
    fn unknown_recommendation_is_rejected() {
        let raw = sample_report_doc().replace("MAYBE", "PERHAPS");
        assert!(parse_report(&raw, &[], Utc::now()).is_err());
    }

    #[rstest]
    #[case("YES", Some(Recommendation::Yes))]
    #[case("no - weak moat", Some(Recommendation::No))]
    #[case("Neutral.", Some(Recommendation::Neutral))]
    #[case("Strong buy", None)]
    fn recommendation_parsing(#[case] raw: &str, #[case] expected: Option<Recommendation>) {
        assert_eq!(parse_recommendation(raw), expected);
    }

    #[rstest]
    #[case(serde_json::json!(4), Some(4.0))]
    #[case(serde_json::json!("3.5 / 5"), Some(3.5))]
    #[case(serde_json::json!("2"), Some(2.0))]
    #[case(serde_json::json!("n/a"), None)]
    #[case(serde_json::json!(null), None)]
    fn score_parsing(#[case] value: Value, #[case] expected: Option<f64>) {
        assert_eq!(parse_score(&value), expected);
    }
}

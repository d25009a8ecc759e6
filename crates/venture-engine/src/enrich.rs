//! Best-effort enrichment of confirmed components from questionnaire answers.
//!
//! Every failure here is logged and swallowed. The answer that triggered the
//! enrichment is already recorded by the time this runs.

use venture_core::entities::Session;
use venture_core::enums::ComponentKey;
use venture_judge::Rubric;

use crate::bounded::BoundedJudge;
use crate::tracker::{ComponentTracker, component_context};

/// Map `answer` onto the most relevant component and fold it into that
/// component's summary. Returns the enriched component, if any.
pub async fn cross_update(
    judge: &BoundedJudge,
    session: &mut Session,
    question_index: usize,
    question: &str,
    answer: &str,
) -> Option<ComponentKey> {
    let rubric = Rubric::ComponentRelevance {
        question: question.to_string(),
    };
    let verdict = match judge.classify(answer, &rubric).await {
        Ok(verdict) => verdict,
        Err(error) => {
            tracing::debug!(question_index, %error, "relevance classification failed; skipping enrichment");
            return None;
        }
    };
    let Some(key) = ComponentKey::parse_label(&verdict.label) else {
        tracing::debug!(question_index, label = %verdict.label, "no component matches label; skipping enrichment");
        return None;
    };

    let context = component_context(session, key);
    let summary = match judge.summarize(&context, answer).await {
        Ok(summary) if !summary.trim().is_empty() => summary,
        Ok(_) => {
            tracing::debug!(question_index, component = %key, "empty enriched summary; skipping");
            return None;
        }
        Err(error) => {
            tracing::debug!(question_index, component = %key, %error, "re-summarization failed; skipping enrichment");
            return None;
        }
    };

    match ComponentTracker::new(session).enrich(key, question_index, &summary) {
        Ok(()) => {
            tracing::debug!(question_index, component = %key, "component enriched");
            Some(key)
        }
        Err(error) => {
            tracing::debug!(question_index, component = %key, %error, "component not enrichable; skipping");
            None
        }
    }
}

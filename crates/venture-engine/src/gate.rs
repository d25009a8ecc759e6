//! Answer validation for component collection.
//!
//! Order of checks for one answer:
//! 1. Leniency: once `retry_count >= leniency_threshold`, an answer with at
//!    least `relaxed_min_words` words is accepted without asking the judge.
//! 2. Length floor: shorter than `min_answer_chars` is rejected locally.
//! 3. Judge completeness verdict, bounded by the judge deadline. A failed or
//!    unrecognised verdict falls back to [`heuristics::looks_complete`].
//!
//! Accepted answers are summarized by the judge, or condensed locally when
//! that fails, so a confirmed component always has a summary.

use venture_config::GateConfig;
use venture_core::enums::ComponentKey;
use venture_judge::Rubric;

use crate::bounded::BoundedJudge;
use crate::heuristics::{self, FALLBACK_SUMMARY_CHARS};

/// Thresholds the gate applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePolicy {
    pub min_answer_chars: usize,
    pub leniency_threshold: u32,
    pub relaxed_min_words: usize,
}

impl From<&GateConfig> for GatePolicy {
    fn from(config: &GateConfig) -> Self {
        Self {
            min_answer_chars: config.min_answer_chars,
            leniency_threshold: config.leniency_threshold,
            relaxed_min_words: config.relaxed_min_words,
        }
    }
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self::from(&GateConfig::default())
    }
}

/// Which path produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictSource {
    /// Rejected by the length floor; the judge was not called.
    LengthFloor,
    /// Accepted by the relaxed heuristic after repeated rejections.
    Leniency,
    /// The judge decided.
    Judge,
    /// The judge failed or was ambiguous; the local heuristic decided.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub accept: bool,
    /// Present iff `accept`.
    pub summary: Option<String>,
    /// Why the answer was rejected, when known.
    pub reason: Option<String>,
    pub source: VerdictSource,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationGate {
    policy: GatePolicy,
}

impl ValidationGate {
    #[must_use]
    pub const fn new(policy: GatePolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    /// Decide whether `raw_answer` completes `key`.
    ///
    /// Never fails: judge errors degrade to the local heuristic.
    pub async fn evaluate(
        &self,
        judge: &BoundedJudge,
        key: ComponentKey,
        raw_answer: &str,
        retry_count: u32,
        context: &str,
    ) -> Verdict {
        let answer = raw_answer.trim();
        let words = heuristics::word_count(answer);

        if retry_count >= self.policy.leniency_threshold && words >= self.policy.relaxed_min_words {
            tracing::info!(
                component = %key,
                retry_count,
                words,
                "accepting answer through leniency escalation"
            );
            let summary = summarize(judge, key, context, answer).await;
            return accepted(summary, VerdictSource::Leniency);
        }

        if heuristics::char_count(answer) < self.policy.min_answer_chars {
            return Verdict {
                accept: false,
                summary: None,
                reason: Some(format!(
                    "Please answer in at least {} characters.",
                    self.policy.min_answer_chars
                )),
                source: VerdictSource::LengthFloor,
            };
        }

        let rubric = Rubric::Completeness { component: key };
        let (complete, reason, source) = match judge.classify(answer, &rubric).await {
            Ok(verdict) if verdict.is(Rubric::COMPLETE) => (true, None, VerdictSource::Judge),
            Ok(verdict) if verdict.is(Rubric::INCOMPLETE) => {
                (false, verdict.reason, VerdictSource::Judge)
            }
            Ok(verdict) => {
                tracing::debug!(
                    component = %key,
                    label = %verdict.label,
                    "unrecognised completeness label; using local heuristic"
                );
                (self.fallback(answer), None, VerdictSource::Fallback)
            }
            Err(error) => {
                tracing::warn!(
                    component = %key,
                    judge = judge.name(),
                    %error,
                    "completeness check failed; using local heuristic"
                );
                (self.fallback(answer), None, VerdictSource::Fallback)
            }
        };

        if complete {
            let summary = summarize(judge, key, context, answer).await;
            accepted(summary, source)
        } else {
            Verdict {
                accept: false,
                summary: None,
                reason,
                source,
            }
        }
    }

    fn fallback(&self, answer: &str) -> bool {
        heuristics::looks_complete(answer, self.policy.relaxed_min_words)
    }
}

const fn accepted(summary: String, source: VerdictSource) -> Verdict {
    Verdict {
        accept: true,
        summary: Some(summary),
        reason: None,
        source,
    }
}

async fn summarize(judge: &BoundedJudge, key: ComponentKey, context: &str, answer: &str) -> String {
    match judge.summarize(context, answer).await {
        Ok(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
        Ok(_) => {
            tracing::debug!(component = %key, "judge returned an empty summary; condensing locally");
            heuristics::condense(answer, FALLBACK_SUMMARY_CHARS)
        }
        Err(error) => {
            tracing::warn!(component = %key, %error, "summary failed; condensing locally");
            heuristics::condense(answer, FALLBACK_SUMMARY_CHARS)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::ScriptedJudge;

    const DETAILED: &str = "We install solar kiosks in rural markets across East Africa";

    fn bounded(judge: &Arc<ScriptedJudge>) -> BoundedJudge {
        BoundedJudge::new(judge.clone(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn short_answer_never_reaches_judge() {
        let judge = Arc::new(ScriptedJudge::accepting());
        let verdict = ValidationGate::default()
            .evaluate(&bounded(&judge), ComponentKey::Vision, "too short", 0, "")
            .await;
        assert!(!verdict.accept);
        assert_eq!(verdict.source, VerdictSource::LengthFloor);
        assert_eq!(judge.classify_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn judge_complete_accepts_with_summary() {
        let judge = Arc::new(ScriptedJudge::accepting());
        let verdict = ValidationGate::default()
            .evaluate(&bounded(&judge), ComponentKey::Vision, DETAILED, 0, "ctx")
            .await;
        assert!(verdict.accept);
        assert_eq!(verdict.source, VerdictSource::Judge);
        assert_eq!(verdict.summary.as_deref(), Some(&*format!("Summary: {DETAILED}")));
    }

    #[tokio::test]
    async fn judge_incomplete_rejects_with_reason() {
        let judge = Arc::new(ScriptedJudge::rejecting());
        let verdict = ValidationGate::default()
            .evaluate(&bounded(&judge), ComponentKey::Vision, DETAILED, 0, "")
            .await;
        assert!(!verdict.accept);
        assert!(verdict.summary.is_none());
        assert_eq!(verdict.reason.as_deref(), Some("needs more detail"));
    }

    #[tokio::test]
    async fn leniency_bypasses_rejecting_judge() {
        let judge = Arc::new(ScriptedJudge::rejecting());
        let verdict = ValidationGate::default()
            .evaluate(&bounded(&judge), ComponentKey::Usp, "we are cheaper and faster", 2, "")
            .await;
        assert!(verdict.accept);
        assert_eq!(verdict.source, VerdictSource::Leniency);
        assert_eq!(judge.classify_calls.load(Ordering::SeqCst), 0);
        assert_eq!(judge.summarize_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn leniency_still_needs_enough_words() {
        let judge = Arc::new(ScriptedJudge::rejecting());
        let verdict = ValidationGate::default()
            .evaluate(&bounded(&judge), ComponentKey::Usp, "cheaper", 5, "")
            .await;
        assert!(!verdict.accept);
        assert_eq!(verdict.source, VerdictSource::LengthFloor);
    }

    #[tokio::test]
    async fn failing_judge_falls_back_to_heuristic() {
        let judge = Arc::new(ScriptedJudge::failing());
        let gate = ValidationGate::default();

        let verdict = gate
            .evaluate(&bounded(&judge), ComponentKey::Vision, DETAILED, 0, "")
            .await;
        assert!(verdict.accept);
        assert_eq!(verdict.source, VerdictSource::Fallback);
        assert_eq!(verdict.summary.as_deref(), Some(DETAILED));

        let verdict = gate
            .evaluate(
                &bounded(&judge),
                ComponentKey::Vision,
                "We offer better services at competitive prices",
                0,
                "",
            )
            .await;
        assert!(!verdict.accept);
        assert_eq!(verdict.source, VerdictSource::Fallback);
    }

    #[tokio::test]
    async fn hung_judge_times_out_into_fallback() {
        let judge = Arc::new(ScriptedJudge {
            delay: Some(Duration::from_secs(30)),
            ..ScriptedJudge::accepting()
        });
        let bounded = BoundedJudge::new(judge, Duration::from_millis(50));
        let verdict = ValidationGate::default()
            .evaluate(&bounded, ComponentKey::Vision, DETAILED, 0, "")
            .await;
        assert!(verdict.accept);
        assert_eq!(verdict.source, VerdictSource::Fallback);
    }
}

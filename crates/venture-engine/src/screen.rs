//! Genuine-answer screening for the deep-dive questionnaire.

use venture_config::QuestionnaireConfig;
use venture_judge::Rubric;

use crate::bounded::BoundedJudge;
use crate::heuristics;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPolicy {
    /// Answers shorter than this are sent back without asking the judge.
    pub answer_min_chars: usize,
    /// META/GIBBERISH verdicts below this confidence are ambiguous.
    pub ambiguity_confidence: f32,
}

impl From<&QuestionnaireConfig> for ScreenPolicy {
    fn from(config: &QuestionnaireConfig) -> Self {
        Self {
            answer_min_chars: config.answer_min_chars,
            ambiguity_confidence: config.ambiguity_confidence,
        }
    }
}

impl Default for ScreenPolicy {
    fn default() -> Self {
        Self::from(&QuestionnaireConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening {
    Genuine,
    /// Not an answer. Carries the clarification to show.
    Clarify(String),
}

/// Decides whether a questionnaire input counts as an answer.
///
/// A clear META or GIBBERISH verdict asks for clarification. An ambiguous
/// verdict, an unknown label or a failed judge call counts as an answer once
/// the input clears the length floor, so a question is never skipped and
/// never blocks on the judge.
#[derive(Debug, Clone, Default)]
pub struct AnswerScreen {
    policy: ScreenPolicy,
}

impl AnswerScreen {
    #[must_use]
    pub const fn new(policy: ScreenPolicy) -> Self {
        Self { policy }
    }

    pub async fn screen(&self, judge: &BoundedJudge, question: &str, answer: &str) -> Screening {
        if heuristics::char_count(answer) < self.policy.answer_min_chars {
            return Screening::Clarify(format!(
                "Could you give a bit more detail? {question}"
            ));
        }

        let rubric = Rubric::GenuineAnswer {
            question: question.to_string(),
        };
        match judge.classify(answer.trim(), &rubric).await {
            Ok(verdict) if verdict.is(Rubric::GENUINE) => Screening::Genuine,
            Ok(verdict) if verdict.is(Rubric::META) || verdict.is(Rubric::GIBBERISH) => {
                let confidence = verdict.confidence.unwrap_or(1.0);
                if confidence >= self.policy.ambiguity_confidence {
                    Screening::Clarify(clarification(question, verdict.is(Rubric::META)))
                } else {
                    tracing::debug!(label = %verdict.label, confidence, "ambiguous verdict; treating as an answer");
                    Screening::Genuine
                }
            }
            Ok(verdict) => {
                tracing::debug!(label = %verdict.label, "unknown screening label; treating as an answer");
                Screening::Genuine
            }
            Err(error) => {
                tracing::warn!(judge = judge.name(), %error, "answer screening failed; treating as an answer");
                Screening::Genuine
            }
        }
    }
}

fn clarification(question: &str, meta: bool) -> String {
    if meta {
        format!(
            "This question asks for your own view of the business, there is no wrong answer. {question}"
        )
    } else {
        format!("I could not read that as an answer. {question}")
    }
}

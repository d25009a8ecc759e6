use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, CHECKPOINT_AT, MAX_QUESTIONS};
use crate::enums::{CheckpointState, QuestionCategory};
use crate::errors::CoreError;

/// One accepted deep-dive answer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnswerRecord {
    pub index: usize,
    pub question_text: String,
    pub category: QuestionCategory,
    pub answer_text: String,
    pub answered_at: DateTime<Utc>,
}

/// Deep-dive questionnaire progress.
///
/// `answers[i].index == i` for every stored answer, so the completed count is
/// always `answers.len()` and indices are contiguous from zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionnaireRecord {
    pub answers: Vec<AnswerRecord>,
    #[serde(default)]
    pub checkpoint: CheckpointState,
}

impl QuestionnaireRecord {
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_count() >= MAX_QUESTIONS
    }

    /// Whether the checkpoint is open and waiting for a decision.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.checkpoint == CheckpointState::Pending
    }

    /// Next index to be answered. `None` while paused at the checkpoint or
    /// once every question has been answered.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        if self.is_paused() || self.is_complete() {
            None
        } else {
            Some(self.completed_count())
        }
    }

    /// Whether enough answers exist to compile a report.
    #[must_use]
    pub fn has_report_threshold(&self) -> bool {
        self.completed_count() >= CHECKPOINT_AT
    }

    /// Record an answer at the current index. Returns the index used.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when paused at the checkpoint, after a
    /// stop, when the questionnaire is full, or when the answer is blank.
    pub fn push_answer(&mut self, answer: &str, now: DateTime<Utc>) -> Result<usize, CoreError> {
        let open = self.current_index().filter(|_| self.checkpoint != CheckpointState::Stopped);
        let index = open.ok_or_else(|| {
            CoreError::Validation(format!(
                "questionnaire is not accepting answers (completed {}, checkpoint {})",
                self.completed_count(),
                self.checkpoint
            ))
        })?;
        let question = catalog::question(index).ok_or_else(|| {
            CoreError::Validation(format!("no question at index {index}"))
        })?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(CoreError::Validation("answer must not be empty".into()));
        }

        self.answers.push(AnswerRecord {
            index,
            question_text: question.text.to_string(),
            category: question.category,
            answer_text: answer.to_string(),
            answered_at: now,
        });
        Ok(index)
    }

    /// Move the checkpoint state forward.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` for any move the checkpoint
    /// state machine does not allow.
    pub fn advance_checkpoint(&mut self, to: CheckpointState) -> Result<(), CoreError> {
        if !self.checkpoint.can_transition_to(to) {
            return Err(CoreError::InvalidTransition {
                entity_type: "checkpoint".to_string(),
                id: "questionnaire".to_string(),
                from: self.checkpoint.to_string(),
                to: to.to_string(),
            });
        }
        self.checkpoint = to;
        Ok(())
    }

    /// Consistency check used when loading snapshots.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` describing the first violated rule.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.answers.len() > MAX_QUESTIONS {
            return Err(CoreError::Validation(format!(
                "{} answers exceed the maximum of {MAX_QUESTIONS}",
                self.answers.len()
            )));
        }
        if let Some((position, answer)) = self
            .answers
            .iter()
            .enumerate()
            .find(|(position, answer)| answer.index != *position)
        {
            return Err(CoreError::Validation(format!(
                "answer at position {position} carries index {}",
                answer.index
            )));
        }
        Ok(())
    }
}

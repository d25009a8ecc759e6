use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ComponentKey, ComponentStatus};
use crate::errors::CoreError;

/// One structured business attribute collected during the first phase.
///
/// `summary` is set iff `status == Confirmed`, and `retry_count` only grows
/// while the record is pending. The mutators below are the only way the
/// engine changes a record, and each refuses calls that would break this.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ComponentRecord {
    pub key: ComponentKey,
    pub status: ComponentStatus,
    /// Last accepted free-text answer.
    pub raw_answer: Option<String>,
    pub summary: Option<String>,
    pub retry_count: u32,
    /// Questionnaire indices whose answers enriched this component.
    #[serde(default)]
    pub evidence: Vec<usize>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl ComponentRecord {
    #[must_use]
    pub const fn pending(key: ComponentKey) -> Self {
        Self {
            key,
            status: ComponentStatus::Pending,
            raw_answer: None,
            summary: None,
            retry_count: 0,
            evidence: Vec::new(),
            confirmed_at: None,
        }
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.status == ComponentStatus::Confirmed
    }

    /// Accept an answer: pending → confirmed, retry counter reset.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` if already confirmed and
    /// `CoreError::Validation` if `summary` is blank.
    pub fn confirm(
        &mut self,
        raw_answer: &str,
        summary: &str,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        self.guard_transition(ComponentStatus::Confirmed)?;
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(CoreError::Validation(format!(
                "summary for component {} must not be empty",
                self.key
            )));
        }

        self.status = ComponentStatus::Confirmed;
        self.raw_answer = Some(raw_answer.trim().to_string());
        self.summary = Some(summary.to_string());
        self.retry_count = 0;
        self.confirmed_at = Some(now);
        Ok(())
    }

    /// Count one more consecutive rejection. Returns the new count.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` if the record is confirmed.
    pub fn record_rejection(&mut self) -> Result<u32, CoreError> {
        if self.is_confirmed() {
            return Err(self.transition_error("rejected"));
        }
        self.retry_count = self.retry_count.saturating_add(1);
        Ok(self.retry_count)
    }

    /// Replace the summary of a confirmed component with an enriched one and
    /// remember which questionnaire answer contributed.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` if the record is still pending
    /// and `CoreError::Validation` if `summary` is blank.
    pub fn enrich(&mut self, question_index: usize, summary: &str) -> Result<(), CoreError> {
        if !self.is_confirmed() {
            return Err(self.transition_error("enriched"));
        }
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(CoreError::Validation(format!(
                "enriched summary for component {} must not be empty",
                self.key
            )));
        }
        self.summary = Some(summary.to_string());
        if !self.evidence.contains(&question_index) {
            self.evidence.push(question_index);
        }
        Ok(())
    }

    fn guard_transition(&self, to: ComponentStatus) -> Result<(), CoreError> {
        if self.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(self.transition_error(to.as_str()))
        }
    }

    fn transition_error(&self, to: &str) -> CoreError {
        CoreError::InvalidTransition {
            entity_type: "component".to_string(),
            id: self.key.to_string(),
            from: self.status.to_string(),
            to: to.to_string(),
        }
    }
}

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ComparisonCandidate, ComponentRecord, QuestionnaireRecord, Report, TranscriptEntry};
use crate::catalog::MAX_SELECTED_COMPARISONS;
use crate::enums::{ComponentKey, Phase, Speaker};
use crate::errors::CoreError;

/// One consultation instance. Owns every nested record; the store persists
/// it as an opaque JSON snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub industry: Option<String>,
    pub phase: Phase,
    /// One record per `ComponentKey`, in `ComponentKey::ALL` order.
    pub components: Vec<ComponentRecord>,
    /// Component currently being collected. `None` once all are confirmed.
    pub active_component_key: Option<ComponentKey>,
    #[serde(default)]
    pub comparison_candidates: Vec<ComparisonCandidate>,
    #[serde(default)]
    pub selected_comparisons: Vec<String>,
    #[serde(default)]
    pub questionnaire: QuestionnaireRecord,
    pub report: Option<Report>,
    #[serde(default)]
    pub transcript: Vec<TranscriptEntry>,
    /// Store-managed optimistic concurrency counter.
    #[serde(default)]
    pub revision: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn new(id: String, name: String, industry: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            industry,
            phase: Phase::Collecting,
            components: ComponentKey::ALL
                .iter()
                .map(|key| ComponentRecord::pending(*key))
                .collect(),
            active_component_key: Some(ComponentKey::ALL[0]),
            comparison_candidates: Vec::new(),
            selected_comparisons: Vec::new(),
            questionnaire: QuestionnaireRecord::default(),
            report: None,
            transcript: Vec::new(),
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn component(&self, key: ComponentKey) -> Option<&ComponentRecord> {
        self.components.iter().find(|c| c.key == key)
    }

    pub fn component_mut(&mut self, key: ComponentKey) -> Option<&mut ComponentRecord> {
        self.components.iter_mut().find(|c| c.key == key)
    }

    #[must_use]
    pub fn confirmed_count(&self) -> usize {
        self.components.iter().filter(|c| c.is_confirmed()).count()
    }

    /// First pending component in fixed collection order.
    #[must_use]
    pub fn first_pending_component(&self) -> Option<ComponentKey> {
        ComponentKey::ALL.into_iter().find(|key| {
            self.component(*key)
                .is_some_and(|record| !record.is_confirmed())
        })
    }

    #[must_use]
    pub fn is_selected(&self, name: &str) -> bool {
        self.selected_comparisons
            .iter()
            .any(|s| s.trim().eq_ignore_ascii_case(name.trim()))
    }

    /// Move to `next` if the phase state machine allows it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` otherwise.
    pub fn transition_to(&mut self, next: Phase) -> Result<(), CoreError> {
        if !self.phase.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: "session".to_string(),
                id: self.id.clone(),
                from: self.phase.to_string(),
                to: next.to_string(),
            });
        }
        self.phase = next;
        Ok(())
    }

    pub fn record(&mut self, speaker: Speaker, content: impl Into<String>, at: DateTime<Utc>) {
        self.transcript.push(TranscriptEntry {
            speaker,
            content: content.into(),
            at,
        });
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Check the structural invariants of a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` describing the first violated rule.
    pub fn validate(&self) -> Result<(), CoreError> {
        let keys: Vec<ComponentKey> = self.components.iter().map(|c| c.key).collect();
        if keys != ComponentKey::ALL {
            return Err(CoreError::Validation(format!(
                "session {} components are not in canonical order",
                self.id
            )));
        }
        for record in &self.components {
            if record.is_confirmed() != record.summary.is_some() {
                return Err(CoreError::Validation(format!(
                    "component {} has summary/status mismatch",
                    record.key
                )));
            }
        }
        if self.selected_comparisons.len() > MAX_SELECTED_COMPARISONS {
            return Err(CoreError::Validation(format!(
                "{} comparisons selected, at most {MAX_SELECTED_COMPARISONS} allowed",
                self.selected_comparisons.len()
            )));
        }
        if let Some(stray) = self
            .selected_comparisons
            .iter()
            .find(|name| !self.comparison_candidates.iter().any(|c| c.matches_name(name)))
        {
            return Err(CoreError::Validation(format!(
                "selected comparison {stray} is not a candidate"
            )));
        }
        self.questionnaire.validate()
    }
}

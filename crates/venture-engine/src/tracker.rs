//! Component and questionnaire progress over a borrowed session.
//!
//! The trackers never decide *whether* an answer is good enough; that is the
//! gate's job. They only apply accepted outcomes and report what comes next.

use chrono::{DateTime, Utc};

use venture_core::actions::OutputAction;
use venture_core::catalog::{self, CHECKPOINT_AT};
use venture_core::entities::{ComponentRecord, QuestionnaireRecord, Session};
use venture_core::enums::{CheckpointChoice, CheckpointState, ComponentKey};
use venture_core::errors::CoreError;
use venture_judge::ComponentBrief;

// ---------------------------------------------------------------------------
// ComponentTracker
// ---------------------------------------------------------------------------

pub struct ComponentTracker<'s> {
    session: &'s mut Session,
}

impl<'s> ComponentTracker<'s> {
    pub const fn new(session: &'s mut Session) -> Self {
        Self { session }
    }

    /// The component being collected. Re-selects the first pending component
    /// when the stored key is missing or already confirmed.
    pub fn active(&mut self) -> Option<ComponentKey> {
        let current = self
            .session
            .active_component_key
            .filter(|key| self.session.component(*key).is_some_and(|c| !c.is_confirmed()));
        let active = current.or_else(|| self.session.first_pending_component());
        self.session.active_component_key = active;
        active
    }

    #[must_use]
    pub fn retry_count(&self, key: ComponentKey) -> u32 {
        self.session.component(key).map_or(0, |c| c.retry_count)
    }

    /// Confirm `key` and move on. Returns the next pending component, or
    /// `None` when every component is confirmed.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the record refuses the transition.
    pub fn confirm(
        &mut self,
        key: ComponentKey,
        raw_answer: &str,
        summary: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ComponentKey>, CoreError> {
        self.record_mut(key)?.confirm(raw_answer, summary, now)?;
        let next = self.session.first_pending_component();
        self.session.active_component_key = next;
        Ok(next)
    }

    /// Count a rejection against `key`. Returns the new retry count.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the record is already confirmed.
    pub fn reject(&mut self, key: ComponentKey) -> Result<u32, CoreError> {
        self.record_mut(key)?.record_rejection()
    }

    /// Fold an enriched summary into a confirmed component.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the component is not confirmed.
    pub fn enrich(
        &mut self,
        key: ComponentKey,
        question_index: usize,
        summary: &str,
    ) -> Result<(), CoreError> {
        self.record_mut(key)?.enrich(question_index, summary)
    }

    fn record_mut(
        &mut self,
        key: ComponentKey,
    ) -> Result<&mut ComponentRecord, CoreError> {
        let id = self.session.id.clone();
        self.session
            .component_mut(key)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "component".to_string(),
                id: format!("{id}/{key}"),
            })
    }
}

/// Confirmed components as the judge sees them.
#[must_use]
pub fn briefs(session: &Session) -> Vec<ComponentBrief> {
    session
        .components
        .iter()
        .filter_map(|record| {
            record.summary.as_ref().map(|summary| ComponentBrief {
                key: record.key,
                title: record.key.display_name().to_string(),
                summary: summary.clone(),
            })
        })
        .collect()
}

/// Context handed to the judge when summarizing an answer for `key`.
#[must_use]
pub fn component_context(session: &Session, key: ComponentKey) -> String {
    let mut context = format!(
        "Business: {}\nComponent: {}\nQuestion: {}",
        session.name,
        key.display_name(),
        key.guiding_question()
    );
    if let Some(summary) = session.component(key).and_then(|c| c.summary.as_deref()) {
        context.push_str("\nCurrent summary: ");
        context.push_str(summary);
    }
    context
}

// ---------------------------------------------------------------------------
// QuestionnaireTracker
// ---------------------------------------------------------------------------

/// What follows a recorded answer or checkpoint decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Ask the question at this index.
    Ask(usize),
    /// Pause for the continue/stop decision.
    Checkpoint,
    /// The questionnaire is over; move to report generation.
    Finished,
}

pub struct QuestionnaireTracker<'s> {
    record: &'s mut QuestionnaireRecord,
}

impl<'s> QuestionnaireTracker<'s> {
    pub const fn new(record: &'s mut QuestionnaireRecord) -> Self {
        Self { record }
    }

    /// Store an accepted answer. Returns its index and what comes next.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` when the questionnaire is paused or full.
    pub fn record_answer(
        &mut self,
        answer: &str,
        now: DateTime<Utc>,
    ) -> Result<(usize, Progress), CoreError> {
        let index = self.record.push_answer(answer, now)?;
        let completed = self.record.completed_count();

        let progress = if self.record.is_complete() {
            Progress::Finished
        } else if completed == CHECKPOINT_AT && self.record.checkpoint == CheckpointState::NotReached
        {
            self.record.advance_checkpoint(CheckpointState::Pending)?;
            Progress::Checkpoint
        } else {
            Progress::Ask(completed)
        };
        Ok((index, progress))
    }

    /// Apply the checkpoint decision.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` when no checkpoint is open.
    pub fn resolve_checkpoint(&mut self, choice: CheckpointChoice) -> Result<Progress, CoreError> {
        if !self.record.is_paused() {
            return Err(CoreError::InvalidTransition {
                entity_type: "checkpoint".to_string(),
                id: "questionnaire".to_string(),
                from: self.record.checkpoint.to_string(),
                to: choice.to_string(),
            });
        }
        match choice {
            CheckpointChoice::Continue => {
                self.record.advance_checkpoint(CheckpointState::Continued)?;
                Ok(Progress::Ask(self.record.completed_count()))
            }
            CheckpointChoice::Stop => {
                self.record.advance_checkpoint(CheckpointState::Stopped)?;
                Ok(Progress::Finished)
            }
        }
    }
}

/// Action asking question `index`, or `None` past the end of the catalog.
#[must_use]
pub fn ask_question(index: usize) -> Option<OutputAction> {
    catalog::question(index).map(|q| OutputAction::AskQuestion {
        index,
        text: q.text.to_string(),
        category: q.category,
    })
}

/// Checkpoint action for the current answer count.
#[must_use]
pub fn checkpoint_action(record: &QuestionnaireRecord) -> OutputAction {
    OutputAction::Checkpoint {
        completed: record.completed_count(),
        options: vec![CheckpointChoice::Continue, CheckpointChoice::Stop],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use venture_core::catalog::MAX_QUESTIONS;

    use super::*;

    fn session() -> Session {
        Session::new("ses-00000001".into(), "Kiosk".into(), None, Utc::now())
    }

    #[test]
    fn confirm_advances_in_fixed_order() {
        let mut s = session();
        let mut tracker = ComponentTracker::new(&mut s);
        assert_eq!(tracker.active(), Some(ComponentKey::Vision));
        let next = tracker
            .confirm(ComponentKey::Vision, "answer", "summary", Utc::now())
            .unwrap();
        assert_eq!(next, Some(ComponentKey::BusinessOverview));
        assert_eq!(s.active_component_key, Some(ComponentKey::BusinessOverview));
    }

    #[test]
    fn active_repairs_stale_key() {
        let mut s = session();
        s.component_mut(ComponentKey::Vision)
            .unwrap()
            .confirm("a", "b", Utc::now())
            .unwrap();
        s.active_component_key = Some(ComponentKey::Vision);
        assert_eq!(
            ComponentTracker::new(&mut s).active(),
            Some(ComponentKey::BusinessOverview)
        );
    }

    #[test]
    fn last_confirmation_clears_active() {
        let mut s = session();
        let mut tracker = ComponentTracker::new(&mut s);
        let mut next = None;
        for key in ComponentKey::ALL {
            next = tracker.confirm(key, "answer", "summary", Utc::now()).unwrap();
        }
        assert_eq!(next, None);
        assert_eq!(tracker.active(), None);
        assert_eq!(briefs(&s).len(), 7);
    }

    #[test]
    fn reject_counts_consecutive_rejections() {
        let mut s = session();
        let mut tracker = ComponentTracker::new(&mut s);
        assert_eq!(tracker.reject(ComponentKey::Vision).unwrap(), 1);
        assert_eq!(tracker.reject(ComponentKey::Vision).unwrap(), 2);
        assert_eq!(tracker.retry_count(ComponentKey::Vision), 2);
        assert_eq!(tracker.retry_count(ComponentKey::Usp), 0);
    }

    #[test]
    fn context_mentions_component_question() {
        let s = session();
        let context = component_context(&s, ComponentKey::MarketSize);
        assert!(context.contains("Market Size"));
        assert!(context.contains("How big is your target market?"));
    }

    #[test]
    fn checkpoint_opens_at_tenth_answer() {
        let mut record = QuestionnaireRecord::default();
        let mut tracker = QuestionnaireTracker::new(&mut record);
        for i in 0..CHECKPOINT_AT - 1 {
            let (index, progress) = tracker.record_answer("a real answer", Utc::now()).unwrap();
            assert_eq!(index, i);
            assert_eq!(progress, Progress::Ask(i + 1));
        }
        let (index, progress) = tracker.record_answer("a real answer", Utc::now()).unwrap();
        assert_eq!(index, CHECKPOINT_AT - 1);
        assert_eq!(progress, Progress::Checkpoint);

        assert_eq!(
            tracker.resolve_checkpoint(CheckpointChoice::Continue).unwrap(),
            Progress::Ask(CHECKPOINT_AT)
        );
        assert!(tracker.resolve_checkpoint(CheckpointChoice::Stop).is_err());
    }

    #[test]
    fn stop_settles_checkpoint() {
        let mut record = QuestionnaireRecord::default();
        let mut tracker = QuestionnaireTracker::new(&mut record);
        for _ in 0..CHECKPOINT_AT {
            tracker.record_answer("a real answer", Utc::now()).unwrap();
        }
        assert_eq!(
            tracker.resolve_checkpoint(CheckpointChoice::Stop).unwrap(),
            Progress::Finished
        );
        assert!(tracker.resolve_checkpoint(CheckpointChoice::Continue).is_err());
        assert_eq!(record.checkpoint, CheckpointState::Stopped);
        assert!(!record.is_paused());
    }

    #[test]
    fn missing_component_is_not_found() {
        let mut s = session();
        s.components.retain(|c| c.key != ComponentKey::Usp);
        let err = ComponentTracker::new(&mut s)
            .reject(ComponentKey::Usp)
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { ref entity_type, .. } if entity_type == "component"));
    }

    #[test]
    fn twentieth_answer_finishes() {
        let mut record = QuestionnaireRecord::default();
        let mut tracker = QuestionnaireTracker::new(&mut record);
        for _ in 0..CHECKPOINT_AT {
            tracker.record_answer("a real answer", Utc::now()).unwrap();
        }
        tracker.resolve_checkpoint(CheckpointChoice::Continue).unwrap();
        let mut last = Progress::Checkpoint;
        for _ in CHECKPOINT_AT..MAX_QUESTIONS {
            last = tracker.record_answer("a real answer", Utc::now()).unwrap().1;
        }
        assert_eq!(last, Progress::Finished);
    }

    #[test]
    fn ask_question_is_bounded() {
        assert!(matches!(
            ask_question(0),
            Some(OutputAction::AskQuestion { index: 0, .. })
        ));
        assert_eq!(ask_question(MAX_QUESTIONS), None);
    }
}

//! The phase state machine.
//!
//! ```text
//! collecting ──7th confirm──▶ selecting_comparisons ──3rd select──▶ questionnaire ──stop / 20th answer / report──▶ report_ready
//! ```
//!
//! [`PhaseOrchestrator::handle_turn`] applies one input to a draft copy of the
//! session. On success the draft (with the turn appended to the transcript)
//! is returned; on any error the original session comes back unchanged with
//! an `OutputAction::Error`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use venture_config::VentureConfig;
use venture_core::actions::{OutputAction, TurnInput};
use venture_core::catalog::{self, MAX_SELECTED_COMPARISONS};
use venture_core::entities::Session;
use venture_core::enums::{CheckpointChoice, ComponentKey, ErrorKind, Phase, SelectionOp, Speaker};
use venture_judge::Judge;

use crate::bounded::BoundedJudge;
use crate::comparisons::{ComparisonSetGenerator, SelectionOutcome, apply_selection};
use crate::enrich::cross_update;
use crate::error::EngineError;
use crate::gate::{GatePolicy, ValidationGate};
use crate::heuristics::{self, FALLBACK_SUMMARY_CHARS};
use crate::report::ReportAggregator;
use crate::screen::{AnswerScreen, Screening, ScreenPolicy};
use crate::tracker::{
    self, ComponentTracker, Progress, QuestionnaireTracker, ask_question, checkpoint_action,
};

const COMPARISONS_UNAVAILABLE: &str =
    "I could not prepare comparison companies just now. Send any message to try again.";
const QUESTIONNAIRE_DONE: &str =
    "The questionnaire is complete. Request the report to see your evaluation.";

#[derive(Debug, Clone)]
pub struct PhaseOrchestrator {
    judge: BoundedJudge,
    gate: ValidationGate,
    screen: AnswerScreen,
}

impl PhaseOrchestrator {
    /// Build from loaded configuration.
    #[must_use]
    pub fn new(judge: Arc<dyn Judge>, config: &VentureConfig) -> Self {
        Self::with_policies(
            judge,
            GatePolicy::from(&config.gate),
            ScreenPolicy::from(&config.questionnaire),
            Duration::from_secs(config.judge.timeout_secs),
        )
    }

    #[must_use]
    pub fn with_policies(
        judge: Arc<dyn Judge>,
        gate: GatePolicy,
        screen: ScreenPolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            judge: BoundedJudge::new(judge, timeout),
            gate: ValidationGate::new(gate),
            screen: AnswerScreen::new(screen),
        }
    }

    /// What the session is waiting for right now. Pure; used when a session
    /// is created or resumed.
    #[must_use]
    pub fn current_action(&self, session: &Session) -> OutputAction {
        match session.phase {
            Phase::Collecting => session
                .active_component_key
                .or_else(|| session.first_pending_component())
                .map_or_else(
                    || OutputAction::error(ErrorKind::InvalidTransition, "no pending component"),
                    OutputAction::ask_field,
                ),
            Phase::SelectingComparisons => {
                if session.comparison_candidates.is_empty() {
                    OutputAction::clarify(COMPARISONS_UNAVAILABLE)
                } else if session.selected_comparisons.is_empty() {
                    OutputAction::PresentCandidates {
                        candidates: session.comparison_candidates.clone(),
                    }
                } else {
                    await_selection(session)
                }
            }
            Phase::Questionnaire => {
                if session.questionnaire.is_paused() {
                    checkpoint_action(&session.questionnaire)
                } else {
                    session
                        .questionnaire
                        .current_index()
                        .and_then(ask_question)
                        .unwrap_or_else(|| OutputAction::clarify(QUESTIONNAIRE_DONE))
                }
            }
            Phase::ReportReady => session.report.as_ref().map_or_else(
                || OutputAction::clarify(QUESTIONNAIRE_DONE),
                |report| OutputAction::ReportSummary {
                    report: Box::new(report.clone()),
                },
            ),
        }
    }

    /// Apply one input. Exactly one transition (or none, on error) happens.
    pub async fn handle_turn(&self, session: Session, input: TurnInput) -> (Session, OutputAction) {
        let now = Utc::now();
        let mut draft = session.clone();
        match self.apply(&mut draft, &input, now).await {
            Ok(action) => {
                draft.record(Speaker::User, input.describe(), now);
                draft.record(Speaker::Assistant, action.render_text(), now);
                draft.touch(now);
                tracing::debug!(
                    session = %draft.id,
                    phase = %draft.phase,
                    action = action.name(),
                    "turn applied"
                );
                (draft, action)
            }
            Err(error) => {
                tracing::debug!(session = %session.id, phase = %session.phase, %error, "turn refused");
                let action = OutputAction::error(error.kind(), error.to_string());
                (session, action)
            }
        }
    }

    async fn apply(
        &self,
        draft: &mut Session,
        input: &TurnInput,
        now: DateTime<Utc>,
    ) -> Result<OutputAction, EngineError> {
        if let TurnInput::Text { text } = input {
            if text.trim().is_empty() {
                return Err(EngineError::ValidationRejected(
                    "input is empty; type an answer and try again".into(),
                ));
            }
        }

        match (draft.phase, input) {
            (_, TurnInput::GenerateReport) => self.generate_report(draft, now).await,

            (Phase::Collecting, TurnInput::Text { text }) => self.collect(draft, text, now).await,

            (Phase::SelectingComparisons, TurnInput::Selection { entity, op }) => {
                select(draft, entity, *op)
            }
            (Phase::SelectingComparisons, TurnInput::Text { .. }) => {
                if draft.comparison_candidates.is_empty() {
                    Ok(self.offer_comparisons(draft).await)
                } else {
                    Ok(await_selection(draft))
                }
            }

            (Phase::Questionnaire, TurnInput::Text { text }) => {
                if draft.questionnaire.is_paused() {
                    match CheckpointChoice::parse_text(text) {
                        Some(choice) => resolve_checkpoint(draft, choice),
                        None => Ok(checkpoint_action(&draft.questionnaire)),
                    }
                } else {
                    self.answer(draft, text, now).await
                }
            }
            (Phase::Questionnaire, TurnInput::Checkpoint { choice }) => {
                resolve_checkpoint(draft, *choice)
            }

            (phase, input) => Err(EngineError::InvalidTransition(format!(
                "{} input is not accepted in phase {phase}",
                input.event_kind()
            ))),
        }
    }

    // ── Collecting ─────────────────────────────────────────────────────

    async fn collect(
        &self,
        draft: &mut Session,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<OutputAction, EngineError> {
        let key = ComponentTracker::new(draft).active().ok_or_else(|| {
            EngineError::InvalidTransition("every component is already confirmed".into())
        })?;
        let retry_count = ComponentTracker::new(draft).retry_count(key);
        let context = tracker::component_context(draft, key);

        let verdict = self
            .gate
            .evaluate(&self.judge, key, text, retry_count, &context)
            .await;

        if !verdict.accept {
            let retries = ComponentTracker::new(draft).reject(key)?;
            tracing::debug!(
                session = %draft.id,
                component = %key,
                retries,
                source = ?verdict.source,
                "answer rejected"
            );
            return Ok(OutputAction::clarify(clarification(key, verdict.reason.as_deref())));
        }

        let summary = verdict
            .summary
            .unwrap_or_else(|| heuristics::condense(text, FALLBACK_SUMMARY_CHARS));
        let next = ComponentTracker::new(draft).confirm(key, text, &summary, now)?;
        tracing::debug!(session = %draft.id, component = %key, source = ?verdict.source, "component confirmed");

        match next {
            Some(next) => Ok(OutputAction::ask_field(next)),
            None => {
                draft.transition_to(Phase::SelectingComparisons)?;
                tracing::info!(session = %draft.id, "all components confirmed");
                Ok(self.offer_comparisons(draft).await)
            }
        }
    }

    /// Generate candidates. A failure keeps the phase with an empty list so
    /// the next text input retries.
    async fn offer_comparisons(&self, draft: &mut Session) -> OutputAction {
        match ComparisonSetGenerator::generate(&self.judge, draft).await {
            Ok(candidates) => {
                draft.comparison_candidates.clone_from(&candidates);
                OutputAction::PresentCandidates { candidates }
            }
            Err(error) => {
                tracing::warn!(session = %draft.id, %error, "comparison generation failed");
                draft.comparison_candidates.clear();
                OutputAction::clarify(COMPARISONS_UNAVAILABLE)
            }
        }
    }

    // ── Questionnaire ──────────────────────────────────────────────────

    async fn answer(
        &self,
        draft: &mut Session,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<OutputAction, EngineError> {
        let question = draft
            .questionnaire
            .current_index()
            .and_then(catalog::question)
            .ok_or_else(|| {
                EngineError::InvalidTransition("questionnaire is not accepting answers".into())
            })?;

        if let Screening::Clarify(message) = self.screen.screen(&self.judge, question.text, text).await
        {
            return Ok(OutputAction::clarify(message));
        }

        let (index, progress) =
            QuestionnaireTracker::new(&mut draft.questionnaire).record_answer(text, now)?;
        cross_update(&self.judge, draft, index, question.text, text.trim()).await;
        progress_action(draft, progress)
    }

    // ── Report ─────────────────────────────────────────────────────────

    async fn generate_report(
        &self,
        draft: &mut Session,
        now: DateTime<Utc>,
    ) -> Result<OutputAction, EngineError> {
        if let Some(report) = &draft.report {
            return Ok(OutputAction::ReportSummary {
                report: Box::new(report.clone()),
            });
        }
        if !matches!(draft.phase, Phase::Questionnaire | Phase::ReportReady) {
            return Err(EngineError::PreconditionFailed(format!(
                "a report needs the questionnaire, session is in phase {}",
                draft.phase
            )));
        }

        let report = ReportAggregator::compile(&self.judge, draft, now).await?;
        if draft.phase == Phase::Questionnaire {
            draft.transition_to(Phase::ReportReady)?;
        }
        tracing::info!(
            session = %draft.id,
            total = report.total,
            recommendation = %report.recommendation,
            "report compiled"
        );
        draft.report = Some(report.clone());
        Ok(OutputAction::ReportSummary {
            report: Box::new(report),
        })
    }
}

fn select(draft: &mut Session, entity: &str, op: SelectionOp) -> Result<OutputAction, EngineError> {
    match apply_selection(draft, entity, op)? {
        SelectionOutcome::Pending { selected, remaining } => {
            Ok(OutputAction::AwaitSelection { selected, remaining })
        }
        SelectionOutcome::Complete => {
            draft.transition_to(Phase::Questionnaire)?;
            tracing::info!(session = %draft.id, selected = ?draft.selected_comparisons, "comparisons selected");
            progress_action(draft, Progress::Ask(0))
        }
    }
}

fn resolve_checkpoint(
    draft: &mut Session,
    choice: CheckpointChoice,
) -> Result<OutputAction, EngineError> {
    let progress = QuestionnaireTracker::new(&mut draft.questionnaire).resolve_checkpoint(choice)?;
    tracing::debug!(session = %draft.id, %choice, "checkpoint resolved");
    progress_action(draft, progress)
}

fn progress_action(draft: &mut Session, progress: Progress) -> Result<OutputAction, EngineError> {
    match progress {
        Progress::Ask(index) => ask_question(index).ok_or_else(|| {
            EngineError::InvalidTransition(format!("no question at index {index}"))
        }),
        Progress::Checkpoint => Ok(checkpoint_action(&draft.questionnaire)),
        Progress::Finished => {
            draft.transition_to(Phase::ReportReady)?;
            tracing::info!(
                session = %draft.id,
                answered = draft.questionnaire.completed_count(),
                "questionnaire finished"
            );
            Ok(OutputAction::clarify(QUESTIONNAIRE_DONE))
        }
    }
}

fn await_selection(session: &Session) -> OutputAction {
    OutputAction::AwaitSelection {
        selected: session.selected_comparisons.clone(),
        remaining: MAX_SELECTED_COMPARISONS.saturating_sub(session.selected_comparisons.len()),
    }
}

fn clarification(key: ComponentKey, reason: Option<&str>) -> String {
    let reason = reason
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or("Your answer needs a little more detail.");
    format!("{reason} {}", key.guiding_question())
}

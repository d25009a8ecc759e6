//! Turn inputs delivered by the transport and the actions the orchestrator
//! answers with.

use std::fmt::Write as _;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ComparisonCandidate, Report};
use crate::enums::{
    CheckpointChoice, ComponentKey, ErrorKind, EventKind, QuestionCategory, SelectionOp,
};

// ---------------------------------------------------------------------------
// TurnInput
// ---------------------------------------------------------------------------

/// One unit of user input. Exactly one is processed per turn.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnInput {
    /// Free text typed by the user.
    Text { text: String },
    /// Add or remove a comparison entity.
    Selection { entity: String, op: SelectionOp },
    /// Structured answer at the questionnaire checkpoint.
    Checkpoint { choice: CheckpointChoice },
    /// Compile (or return the cached) evaluation report.
    GenerateReport,
}

impl TurnInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn select(entity: impl Into<String>) -> Self {
        Self::Selection {
            entity: entity.into(),
            op: SelectionOp::Add,
        }
    }

    pub fn deselect(entity: impl Into<String>) -> Self {
        Self::Selection {
            entity: entity.into(),
            op: SelectionOp::Remove,
        }
    }

    #[must_use]
    pub const fn event_kind(&self) -> EventKind {
        match self {
            Self::Text { .. } => EventKind::Text,
            Self::Selection { .. } => EventKind::Selection,
            Self::Checkpoint { .. } => EventKind::Checkpoint,
            Self::GenerateReport => EventKind::Report,
        }
    }

    /// Transcript line for this input.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Text { text } => text.trim().to_string(),
            Self::Selection { entity, op } => format!("[{op}] {entity}"),
            Self::Checkpoint { choice } => format!("[checkpoint] {choice}"),
            Self::GenerateReport => "[generate report]".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// OutputAction
// ---------------------------------------------------------------------------

/// What the UI should do next.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OutputAction {
    AskField {
        key: ComponentKey,
        title: String,
        prompt: String,
    },
    AskQuestion {
        index: usize,
        text: String,
        category: QuestionCategory,
    },
    RequestClarification {
        text: String,
    },
    PresentCandidates {
        candidates: Vec<ComparisonCandidate>,
    },
    AwaitSelection {
        selected: Vec<String>,
        remaining: usize,
    },
    Checkpoint {
        completed: usize,
        options: Vec<CheckpointChoice>,
    },
    ReportSummary {
        report: Box<Report>,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

impl OutputAction {
    #[must_use]
    pub fn ask_field(key: ComponentKey) -> Self {
        Self::AskField {
            key,
            title: key.display_name().to_string(),
            prompt: key.guiding_question().to_string(),
        }
    }

    pub fn clarify(text: impl Into<String>) -> Self {
        Self::RequestClarification { text: text.into() }
    }

    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AskField { .. } => "ask_field",
            Self::AskQuestion { .. } => "ask_question",
            Self::RequestClarification { .. } => "request_clarification",
            Self::PresentCandidates { .. } => "present_candidates",
            Self::AwaitSelection { .. } => "await_selection",
            Self::Checkpoint { .. } => "checkpoint",
            Self::ReportSummary { .. } => "report_summary",
            Self::Error { .. } => "error",
        }
    }

    /// Plain-text rendering used for the transcript and raw output.
    #[must_use]
    pub fn render_text(&self) -> String {
        match self {
            Self::AskField { title, prompt, .. } => format!("{title}: {prompt}"),
            Self::AskQuestion { index, text, .. } => format!("Question {}: {text}", index + 1),
            Self::RequestClarification { text } => text.clone(),
            Self::PresentCandidates { candidates } => {
                let mut out = String::from("Select three comparison companies:\n");
                for (i, c) in candidates.iter().enumerate() {
                    let _ = writeln!(out, "{}. {} - {}", i + 1, c.name, c.description);
                }
                out.trim_end().to_string()
            }
            Self::AwaitSelection {
                selected,
                remaining,
            } => {
                if selected.is_empty() {
                    format!("Select {remaining} more comparison companies.")
                } else {
                    format!(
                        "Selected: {}. Select {remaining} more.",
                        selected.join(", ")
                    )
                }
            }
            Self::Checkpoint { completed, .. } => format!(
                "You have answered {completed} questions. Type 'continue' for more questions or 'end' to finish."
            ),
            Self::ReportSummary { report } => format!(
                "Evaluation: {:.1}/25, recommendation {}. {}",
                report.total, report.recommendation, report.overall_feedback
            ),
            Self::Error { kind, message } => format!("Error ({kind}): {message}"),
        }
    }
}

// ---------------------------------------------------------------------------
// TurnEvent
// ---------------------------------------------------------------------------

/// A processed turn as written to the session event log.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TurnEvent {
    pub kind: EventKind,
    pub input: Option<TurnInput>,
    pub action: Option<OutputAction>,
}

impl TurnEvent {
    #[must_use]
    pub fn from_turn(input: &TurnInput, action: &OutputAction) -> Self {
        Self {
            kind: input.event_kind(),
            input: Some(input.clone()),
            action: Some(action.clone()),
        }
    }

    #[must_use]
    pub const fn created() -> Self {
        Self {
            kind: EventKind::Created,
            input: None,
            action: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn turn_input_wire_shape() {
        let json = serde_json::to_value(TurnInput::select("Acme")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "selection", "entity": "Acme", "op": "add"})
        );

        let parsed: TurnInput =
            serde_json::from_str(r#"{"kind":"checkpoint","choice":"stop"}"#).unwrap();
        assert_eq!(
            parsed,
            TurnInput::Checkpoint {
                choice: CheckpointChoice::Stop
            }
        );

        let parsed: TurnInput = serde_json::from_str(r#"{"kind":"generate_report"}"#).unwrap();
        assert_eq!(parsed, TurnInput::GenerateReport);
    }

    #[test]
    fn output_action_tag_matches_name() {
        let actions = [
            OutputAction::ask_field(ComponentKey::Vision),
            OutputAction::clarify("more please"),
            OutputAction::AwaitSelection {
                selected: vec![],
                remaining: 3,
            },
            OutputAction::error(ErrorKind::PreconditionFailed, "not yet"),
        ];
        for action in actions {
            let json = serde_json::to_value(&action).unwrap();
            assert_eq!(json["action"], action.name());
        }
    }

    #[test]
    fn ask_field_uses_catalog_text() {
        let action = OutputAction::ask_field(ComponentKey::MarketSize);
        assert_eq!(
            action.render_text(),
            "Market Size: How big is your target market? Any estimates?"
        );
    }

    #[test]
    fn event_kind_follows_input() {
        let event = TurnEvent::from_turn(
            &TurnInput::text("hello"),
            &OutputAction::clarify("again"),
        );
        assert_eq!(event.kind, EventKind::Text);
        assert_eq!(TurnEvent::created().kind, EventKind::Created);
    }
}

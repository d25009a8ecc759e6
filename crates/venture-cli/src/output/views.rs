//! Table layouts for each response type `vnt` prints.

use venture_core::actions::{OutputAction, TurnEvent, TurnInput};
use venture_core::catalog::MAX_QUESTIONS;
use venture_core::entities::{ComparisonCandidate, Report, Session, SessionEvent};
use venture_core::responses::{DeleteResponse, SessionSummary, TurnResponse};

use super::table::{Cell, Table, Tone};
use crate::service::SessionView;

/// A response that knows how to lay itself out as tables.
pub trait TableView {
    fn tables(&self) -> Vec<Table>;

    /// Printed instead of the tables when they are all empty.
    fn empty_text(&self) -> &'static str {
        "(nothing to show)"
    }
}

impl TableView for TurnResponse {
    fn tables(&self) -> Vec<Table> {
        let mut turn = Table::fields("turn");
        turn.field("session", Cell::text(&self.session_id))
            .field("phase", Cell::toned(self.phase, Tone::phase(self.phase)))
            .field("revision", Cell::number(self.revision));
        let mut tables = vec![turn];
        tables.extend(action_tables(&self.action));
        tables
    }
}

impl TableView for SessionView {
    fn tables(&self) -> Vec<Table> {
        let mut tables = vec![session_table(&self.session), components_table(&self.session)];
        if let Some(report) = &self.session.report {
            tables.extend(report_tables(report));
        }
        if !matches!(self.action, OutputAction::ReportSummary { .. }) {
            tables.extend(action_tables(&self.action));
        }
        tables
    }
}

impl TableView for Vec<SessionSummary> {
    fn tables(&self) -> Vec<Table> {
        let mut table = Table::new(&["id", "name", "industry", "phase", "rev", "updated"]);
        for s in self {
            table.push(vec![
                Cell::text(&s.id),
                Cell::text(&s.name),
                Cell::optional(s.industry.as_deref()),
                Cell::toned(s.phase, Tone::phase(s.phase)),
                Cell::number(s.revision),
                Cell::text(s.updated_at.format("%Y-%m-%d %H:%M").to_string()),
            ]);
        }
        vec![table]
    }

    fn empty_text(&self) -> &'static str {
        "(no sessions)"
    }
}

impl TableView for Vec<SessionEvent> {
    fn tables(&self) -> Vec<Table> {
        let mut table = Table::new(&["rev", "kind", "input", "reply", "at"]);
        for event in self {
            let turn = event
                .detail
                .clone()
                .and_then(|detail| serde_json::from_value::<TurnEvent>(detail).ok());
            let input = turn.as_ref().and_then(|t| t.input.as_ref()).map(TurnInput::describe);
            let reply = turn.as_ref().and_then(|t| t.action.as_ref()).map(OutputAction::name);
            table.push(vec![
                Cell::number(event.revision),
                Cell::text(event.kind.to_string()),
                Cell::optional(input),
                Cell::optional(reply),
                Cell::text(event.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            ]);
        }
        vec![table]
    }

    fn empty_text(&self) -> &'static str {
        "(no events)"
    }
}

impl TableView for DeleteResponse {
    fn tables(&self) -> Vec<Table> {
        let mut table = Table::fields("deleted");
        table
            .field("session", Cell::text(&self.session_id))
            .field("deleted", Cell::text(self.deleted.to_string()));
        vec![table]
    }
}

fn session_table(session: &Session) -> Table {
    let mut table = Table::fields("session");
    table
        .field("id", Cell::text(&session.id))
        .field("name", Cell::text(&session.name))
        .field("industry", Cell::optional(session.industry.as_deref()))
        .field("phase", Cell::toned(session.phase, Tone::phase(session.phase)))
        .field("revision", Cell::number(session.revision))
        .field(
            "answered",
            Cell::text(format!(
                "{}/{MAX_QUESTIONS}",
                session.questionnaire.completed_count()
            )),
        )
        .field("checkpoint", Cell::text(session.questionnaire.checkpoint.to_string()));
    if !session.selected_comparisons.is_empty() {
        table.field("comparisons", Cell::text(session.selected_comparisons.join(", ")));
    }
    table
}

fn components_table(session: &Session) -> Table {
    let mut table = Table::titled("components", &["component", "status", "retries", "summary"]);
    for record in &session.components {
        table.push(vec![
            Cell::text(record.key.display_name()),
            Cell::toned(record.status, Tone::component(record.status)),
            Cell::number(record.retry_count),
            Cell::optional(record.summary.as_deref()),
        ]);
    }
    table
}

fn candidates_table(candidates: &[ComparisonCandidate]) -> Table {
    let mut table = Table::titled("candidates", &["#", "name", "description"]);
    for (i, candidate) in candidates.iter().enumerate() {
        table.push(vec![
            Cell::number(i + 1),
            Cell::text(&candidate.name),
            Cell::text(&candidate.description),
        ]);
    }
    table
}

fn report_tables(report: &Report) -> Vec<Table> {
    let mut scores = Table::titled("scores", &["category", "score", "rationale"]);
    for score in &report.categories {
        scores.push(vec![
            Cell::text(score.category.to_string()),
            Cell::number(format!("{:.1}", score.score)),
            Cell::text(&score.rationale),
        ]);
    }
    let mut verdict = Table::fields("verdict");
    verdict
        .field(
            "total",
            Cell::text(format!("{:.1}/{:.0}", report.total, Report::max_total())),
        )
        .field(
            "recommendation",
            Cell::toned(report.recommendation, Tone::recommendation(report.recommendation)),
        )
        .field("feedback", Cell::text(&report.overall_feedback));
    vec![scores, verdict]
}

/// The `next` row plus whatever detail the action carries.
fn action_tables(action: &OutputAction) -> Vec<Table> {
    let mut next = Table::fields("next");
    let tone = if action.is_error() { Tone::Bad } else { Tone::Plain };
    next.field("action", Cell::toned(action.name(), tone));
    match action {
        OutputAction::PresentCandidates { candidates } => {
            vec![next, candidates_table(candidates)]
        }
        OutputAction::ReportSummary { report } => {
            let mut tables = vec![next];
            tables.extend(report_tables(report));
            tables
        }
        _ => {
            next.field("text", Cell::text(action.render_text()));
            vec![next]
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use venture_core::enums::{ComponentKey, EventKind, Phase};

    use super::*;

    fn titles(tables: &[Table]) -> String {
        tables
            .iter()
            .map(|t| t.render(None, false))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn turn_response_shows_phase_and_prompt() {
        let response = TurnResponse {
            session_id: "ses-a3f8b2c1".into(),
            phase: Phase::Collecting,
            revision: 2,
            action: OutputAction::ask_field(ComponentKey::MarketSize),
        };
        let out = titles(&response.tables());
        assert!(out.contains("[turn]"));
        assert!(out.contains("collecting"));
        assert!(out.contains("ask_field"));
        assert!(out.contains("Market Size: How big is your target market?"));
    }

    #[test]
    fn candidates_get_their_own_table() {
        let action = OutputAction::PresentCandidates {
            candidates: vec![ComparisonCandidate {
                name: "Acme Bikes".into(),
                description: "Regional repair chain".into(),
                relevance: String::new(),
            }],
        };
        let out = titles(&action_tables(&action));
        assert!(out.contains("[candidates]"));
        assert!(out.contains("Acme Bikes"));
    }

    #[test]
    fn session_view_lists_every_component() {
        let session = Session::new("ses-a3f8b2c1".into(), "Pedal Co".into(), None, Utc::now());
        let view = SessionView {
            action: OutputAction::ask_field(ComponentKey::Vision),
            session,
        };
        let tables = view.tables();
        let components = tables[1].render(None, false);
        assert_eq!(components.lines().count(), 3 + ComponentKey::ALL.len());
        assert!(components.contains("pending"));
        assert!(titles(&tables).contains("0/20"));
    }

    #[test]
    fn events_show_input_and_reply() {
        let event = SessionEvent {
            id: "evt-1".into(),
            session_id: "ses-a3f8b2c1".into(),
            revision: 1,
            kind: EventKind::Text,
            detail: serde_json::to_value(TurnEvent::from_turn(
                &TurnInput::text("we fix cargo bikes"),
                &OutputAction::clarify("more please"),
            ))
            .ok(),
            created_at: Utc::now(),
        };
        let out = titles(&vec![event].tables());
        assert!(out.contains("we fix cargo bikes"));
        assert!(out.contains("request_clarification"));
    }
}

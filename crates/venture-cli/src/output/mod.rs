use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;
mod views;

pub use views::TableView;

/// Render a response to a string in the requested format.
pub fn render<T: Serialize + TableView>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(value)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T: Serialize + TableView>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: TableView>(value: &T) -> String {
    let prefs = ui::prefs();
    let tables = value.tables();
    if tables.iter().all(table::Table::is_empty) {
        return value.empty_text().to_string();
    }
    tables
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| t.render(prefs.term_width, prefs.table_color))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use venture_core::actions::OutputAction;
    use venture_core::enums::{ComponentKey, Phase};
    use venture_core::responses::{SessionSummary, TurnResponse};

    use super::render;
    use crate::cli::OutputFormat;

    fn response(action: OutputAction) -> TurnResponse {
        TurnResponse {
            session_id: "ses-a3f8b2c1".into(),
            phase: Phase::Collecting,
            revision: 0,
            action,
        }
    }

    #[test]
    fn json_render_keeps_action_tag() {
        let out = render(&response(OutputAction::ask_field(ComponentKey::Vision)), OutputFormat::Json)
            .expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["action"]["action"], "ask_field");
        assert_eq!(parsed["action"]["key"], "vision");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&response(OutputAction::clarify("Tell me more.")), OutputFormat::Raw)
            .expect("raw render should work");
        assert!(!out.contains('\n'));
        assert!(out.ends_with(r#""action":{"action":"request_clarification","text":"Tell me more."}}"#));
    }

    #[test]
    fn table_render_joins_sections() {
        let out = render(&response(OutputAction::ask_field(ComponentKey::Usp)), OutputFormat::Table)
            .expect("table render should work");
        assert!(out.starts_with("[turn]"));
        assert!(out.contains("\n\n[next]"));
        assert!(out.contains(ComponentKey::Usp.guiding_question()));
    }

    #[test]
    fn empty_session_list_has_placeholder() {
        let rows: Vec<SessionSummary> = Vec::new();
        assert_eq!(render(&rows, OutputFormat::Table).unwrap(), "(no sessions)");
    }
}

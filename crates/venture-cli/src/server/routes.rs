//! Request routing and body parsing. Pure functions, no I/O.

use serde::Deserialize;
use thiserror::Error;
use venture_core::actions::TurnInput;
use venture_core::enums::CheckpointChoice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    ListSessions,
    CreateSession,
    GetSession(String),
    DeleteSession(String),
    SessionEvents(String),
    Turn(String),
    Report(String),
    MethodNotAllowed,
    NotFound,
}

/// Map a method and request target onto a route. Query strings and trailing
/// slashes are ignored.
#[must_use]
pub fn resolve(method: &str, url: &str) -> Route {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method, segments.as_slice()) {
        ("GET", ["sessions"]) => Route::ListSessions,
        ("POST", ["sessions"]) => Route::CreateSession,
        ("GET", ["sessions", id]) => Route::GetSession((*id).to_string()),
        ("DELETE", ["sessions", id]) => Route::DeleteSession((*id).to_string()),
        ("GET", ["sessions", id, "events"]) => Route::SessionEvents((*id).to_string()),
        ("POST", ["sessions", id, "turn"]) => Route::Turn((*id).to_string()),
        ("POST", ["sessions", id, "report"]) => Route::Report((*id).to_string()),
        (_, ["sessions"] | ["sessions", _] | ["sessions", _, "events" | "turn" | "report"]) => {
            Route::MethodNotAllowed
        }
        _ => Route::NotFound,
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct BadRequest(String);

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CreateSessionBody {
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
}

/// Shorthand turn body: exactly one of the fields is set.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TurnBody {
    text: Option<String>,
    select: Option<String>,
    deselect: Option<String>,
    checkpoint: Option<CheckpointChoice>,
}

pub fn parse_create(body: &str) -> Result<CreateSessionBody, BadRequest> {
    serde_json::from_str(body).map_err(|error| BadRequest(format!("invalid session body: {error}")))
}

/// Parse a turn body. Accepts the shorthand `{text}`, `{select}`,
/// `{deselect}` or `{checkpoint}` forms as well as a tagged `TurnInput`.
pub fn parse_turn(body: &str) -> Result<TurnInput, BadRequest> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|error| BadRequest(format!("turn body is not JSON: {error}")))?;

    if value.get("kind").is_some() {
        return serde_json::from_value(value)
            .map_err(|error| BadRequest(format!("invalid turn input: {error}")));
    }

    let body: TurnBody = serde_json::from_value(value)
        .map_err(|error| BadRequest(format!("invalid turn body: {error}")))?;
    match body {
        TurnBody {
            text: Some(text),
            select: None,
            deselect: None,
            checkpoint: None,
        } => Ok(TurnInput::text(text)),
        TurnBody {
            text: None,
            select: Some(entity),
            deselect: None,
            checkpoint: None,
        } => Ok(TurnInput::select(entity)),
        TurnBody {
            text: None,
            select: None,
            deselect: Some(entity),
            checkpoint: None,
        } => Ok(TurnInput::deselect(entity)),
        TurnBody {
            text: None,
            select: None,
            deselect: None,
            checkpoint: Some(choice),
        } => Ok(TurnInput::Checkpoint { choice }),
        _ => Err(BadRequest(
            "turn body needs exactly one of text, select, deselect, checkpoint".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn resolves_session_routes() {
        assert_eq!(resolve("POST", "/sessions"), Route::CreateSession);
        assert_eq!(resolve("GET", "/sessions/"), Route::ListSessions);
        assert_eq!(
            resolve("GET", "/sessions/ses-a3f8b2c1?verbose=1"),
            Route::GetSession("ses-a3f8b2c1".to_string())
        );
        assert_eq!(
            resolve("POST", "/sessions/ses-a3f8b2c1/turn"),
            Route::Turn("ses-a3f8b2c1".to_string())
        );
        assert_eq!(
            resolve("POST", "/sessions/ses-a3f8b2c1/report"),
            Route::Report("ses-a3f8b2c1".to_string())
        );
        assert_eq!(
            resolve("GET", "/sessions/ses-a3f8b2c1/events"),
            Route::SessionEvents("ses-a3f8b2c1".to_string())
        );
    }

    #[test]
    fn wrong_method_and_unknown_paths() {
        assert_eq!(resolve("PUT", "/sessions"), Route::MethodNotAllowed);
        assert_eq!(resolve("GET", "/sessions/ses-1/turn"), Route::MethodNotAllowed);
        assert_eq!(resolve("GET", "/"), Route::NotFound);
        assert_eq!(resolve("POST", "/sessions/ses-1/unknown"), Route::NotFound);
    }

    #[test]
    fn parses_shorthand_turn_bodies() {
        assert_eq!(
            parse_turn(r#"{"text":"we repair cargo bikes"}"#).unwrap(),
            TurnInput::text("we repair cargo bikes")
        );
        assert_eq!(
            parse_turn(r#"{"select":"Acme"}"#).unwrap(),
            TurnInput::select("Acme")
        );
        assert_eq!(
            parse_turn(r#"{"deselect":"Acme"}"#).unwrap(),
            TurnInput::deselect("Acme")
        );
        assert_eq!(
            parse_turn(r#"{"checkpoint":"stop"}"#).unwrap(),
            TurnInput::Checkpoint {
                choice: CheckpointChoice::Stop
            }
        );
    }

    #[test]
    fn parses_tagged_turn_input() {
        assert_eq!(
            parse_turn(r#"{"kind":"generate_report"}"#).unwrap(),
            TurnInput::GenerateReport
        );
    }

    #[test]
    fn rejects_ambiguous_or_malformed_turns() {
        assert!(parse_turn(r#"{"text":"a","select":"b"}"#).is_err());
        assert!(parse_turn("{}").is_err());
        assert!(parse_turn(r#"{"checkpoint":"maybe"}"#).is_err());
        assert!(parse_turn(r#"{"answer":"x"}"#).is_err());
        assert!(parse_turn("not json").is_err());
    }

    #[test]
    fn create_body_requires_name() {
        let body = parse_create(r#"{"name":"Pedal Co","industry":"Mobility"}"#).unwrap();
        assert_eq!(body.industry.as_deref(), Some("Mobility"));
        assert!(parse_create(r#"{"industry":"Mobility"}"#).is_err());
    }
}

//! Route handlers: one request in, one JSON reply out.

use serde::Serialize;
use serde_json::{Value, json};
use venture_core::actions::{OutputAction, TurnInput};
use venture_core::enums::ErrorKind;
use venture_core::responses::TurnResponse;
use venture_db::error::DatabaseError;

use crate::server::routes::{self, Route};
use crate::service::{ConsultationService, ServiceError};

const LIST_LIMIT: u32 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self { status, body },
            Err(error) => Self::error(500, format!("failed to encode response: {error}")),
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }
}

pub async fn handle(service: &ConsultationService, method: &str, url: &str, body: &str) -> Reply {
    match routes::resolve(method, url) {
        Route::ListSessions => reply(service.list(LIST_LIMIT).await),
        Route::CreateSession => match routes::parse_create(body) {
            Ok(request) => turn_reply(
                service
                    .create_session(&request.name, request.industry.as_deref())
                    .await,
            ),
            Err(error) => Reply::error(400, error.to_string()),
        },
        Route::GetSession(id) => reply(service.show(&id).await),
        Route::DeleteSession(id) => reply(service.delete(&id).await),
        Route::SessionEvents(id) => reply(service.events(&id).await),
        Route::Turn(id) => match routes::parse_turn(body) {
            Ok(input) => turn_reply(service.apply(&id, input).await),
            Err(error) => Reply::error(400, error.to_string()),
        },
        Route::Report(id) => turn_reply(service.apply(&id, TurnInput::GenerateReport).await),
        Route::MethodNotAllowed => Reply::error(405, format!("{method} not allowed on {url}")),
        Route::NotFound => Reply::error(404, format!("no route for {url}")),
    }
}

fn reply<T: Serialize>(result: Result<T, ServiceError>) -> Reply {
    match result {
        Ok(value) => Reply::json(200, &value),
        Err(error) => Reply::error(error_status(&error), error.to_string()),
    }
}

/// Turn replies carry the response body even when the orchestrator refused
/// the turn; only the status differs.
fn turn_reply(result: Result<TurnResponse, ServiceError>) -> Reply {
    match result {
        Ok(response) => Reply::json(turn_status(&response.action), &response),
        Err(error) => Reply::error(error_status(&error), error.to_string()),
    }
}

const fn error_status(error: &ServiceError) -> u16 {
    match error {
        ServiceError::InvalidRequest(_) => 400,
        ServiceError::NotFound(_) => 404,
        ServiceError::Store(DatabaseError::Conflict { .. }) => 409,
        ServiceError::Store(_) => 500,
    }
}

const fn turn_status(action: &OutputAction) -> u16 {
    match action {
        OutputAction::Error { kind, .. } => match kind {
            ErrorKind::JudgeUnavailable => 503,
            ErrorKind::MalformedJudgeOutput => 502,
            ErrorKind::ValidationRejected
            | ErrorKind::PreconditionFailed
            | ErrorKind::InvalidTransition
            | ErrorKind::UnknownCandidate => 422,
        },
        _ => 200,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::service::tests::{ANSWER, offline_service};

    async fn create(service: &ConsultationService) -> String {
        let reply = handle(service, "POST", "/sessions", r#"{"name":"Pedal Co"}"#).await;
        assert_eq!(reply.status, 200);
        reply.body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn create_then_answer() {
        let service = offline_service().await;
        let id = create(&service).await;

        let body = json!({ "text": ANSWER }).to_string();
        let reply = handle(&service, "POST", &format!("/sessions/{id}/turn"), &body).await;
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["revision"], 1);
        assert_eq!(reply.body["phase"], "collecting");
        assert_eq!(reply.body["action"]["action"], "ask_field");
        assert_eq!(reply.body["action"]["key"], "business_overview");

        let reply = handle(&service, "GET", &format!("/sessions/{id}"), "").await;
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["session"]["revision"], 1);
    }

    #[tokio::test]
    async fn early_report_is_unprocessable() {
        let service = offline_service().await;
        let id = create(&service).await;

        let reply = handle(&service, "POST", &format!("/sessions/{id}/report"), "").await;
        assert_eq!(reply.status, 422);
        assert_eq!(reply.body["action"]["kind"], "precondition_failed");
        assert_eq!(reply.body["revision"], 0);
    }

    #[tokio::test]
    async fn blank_answer_is_rejected() {
        let service = offline_service().await;
        let id = create(&service).await;

        let reply = handle(&service, "POST", &format!("/sessions/{id}/turn"), r#"{"text":"  "}"#).await;
        assert_eq!(reply.status, 422);
        assert_eq!(reply.body["action"]["kind"], "validation_rejected");
        assert_eq!(reply.body["revision"], 0);
    }

    #[tokio::test]
    async fn client_errors() {
        let service = offline_service().await;
        let id = create(&service).await;

        let reply = handle(&service, "POST", "/sessions", r#"{"name":"  "}"#).await;
        assert_eq!(reply.status, 400);

        let reply = handle(&service, "POST", &format!("/sessions/{id}/turn"), r#"{"text":1}"#).await;
        assert_eq!(reply.status, 400);

        let reply = handle(&service, "GET", "/sessions/ses-00000000", "").await;
        assert_eq!(reply.status, 404);

        let body = json!({ "text": ANSWER }).to_string();
        let reply = handle(&service, "POST", "/sessions/ses-00000000/turn", &body).await;
        assert_eq!(reply.status, 404);

        let reply = handle(&service, "PATCH", "/sessions", "").await;
        assert_eq!(reply.status, 405);
    }

    #[tokio::test]
    async fn list_and_delete() {
        let service = offline_service().await;
        let id = create(&service).await;

        let reply = handle(&service, "GET", "/sessions", "").await;
        assert_eq!(reply.body.as_array().map(Vec::len), Some(1));

        let reply = handle(&service, "DELETE", &format!("/sessions/{id}"), "").await;
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["deleted"], true);

        let reply = handle(&service, "GET", &format!("/sessions/{id}/events"), "").await;
        assert_eq!(reply.status, 404);
    }

    #[test]
    fn conflicts_map_to_409() {
        let conflict = ServiceError::Store(DatabaseError::Conflict {
            id: "ses-a3f8b2c1".to_string(),
            expected: 3,
            actual: 4,
        });
        assert_eq!(error_status(&conflict), 409);
        assert_eq!(
            error_status(&ServiceError::Store(DatabaseError::InvalidState("x".into()))),
            500
        );
    }

    #[test]
    fn judge_failures_map_to_gateway_statuses() {
        let unavailable = OutputAction::error(ErrorKind::JudgeUnavailable, "timed out");
        let malformed = OutputAction::error(ErrorKind::MalformedJudgeOutput, "no total");
        assert_eq!(turn_status(&unavailable), 503);
        assert_eq!(turn_status(&malformed), 502);
        assert_eq!(turn_status(&OutputAction::clarify("more")), 200);
    }
}

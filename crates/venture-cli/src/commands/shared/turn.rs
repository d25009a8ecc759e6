use venture_core::actions::{OutputAction, TurnInput};
use venture_core::responses::TurnResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Apply one turn and print the response.
///
/// A refused turn is still printed so scripts can read the error kind, but
/// the command then fails with the error message.
pub async fn run(
    session_id: &str,
    input: TurnInput,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = ctx.service.apply(session_id, input).await?;
    output(&response, flags.format)?;
    refusal(&response).map_or(Ok(()), |message| Err(anyhow::anyhow!(message)))
}

fn refusal(response: &TurnResponse) -> Option<String> {
    match &response.action {
        OutputAction::Error { kind, message } => Some(format!("turn refused ({kind}): {message}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use venture_core::enums::{ErrorKind, Phase};

    use super::*;

    fn response(action: OutputAction) -> TurnResponse {
        TurnResponse {
            session_id: "ses-a3f8b2c1".to_string(),
            phase: Phase::Collecting,
            revision: 0,
            action,
        }
    }

    #[test]
    fn only_error_actions_are_refusals() {
        assert_eq!(refusal(&response(OutputAction::clarify("more"))), None);
        let message = refusal(&response(OutputAction::error(
            ErrorKind::PreconditionFailed,
            "answer at least 10 questions first",
        )))
        .unwrap();
        assert_eq!(
            message,
            "turn refused (precondition_failed): answer at least 10 questions first"
        );
    }
}

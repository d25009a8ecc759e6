use venture_core::actions::TurnInput;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CheckpointArgs;
use crate::commands::shared::turn;
use crate::context::AppContext;

/// Handle `vnt checkpoint`.
pub async fn handle(
    args: &CheckpointArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let input = TurnInput::Checkpoint {
        choice: args.choice.into(),
    };
    turn::run(&args.session_id, input, ctx, flags).await
}

use venture_core::actions::TurnInput;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SelectionArgs;
use crate::commands::shared::turn;
use crate::context::AppContext;

/// Handle `vnt select`.
pub async fn handle_select(
    args: &SelectionArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    turn::run(&args.session_id, TurnInput::select(args.entity()), ctx, flags).await
}

/// Handle `vnt deselect`.
pub async fn handle_deselect(
    args: &SelectionArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    turn::run(&args.session_id, TurnInput::deselect(args.entity()), ctx, flags).await
}

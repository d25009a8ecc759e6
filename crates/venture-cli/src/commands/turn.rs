use venture_core::actions::TurnInput;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TurnArgs;
use crate::commands::shared::turn;
use crate::context::AppContext;

/// Handle `vnt turn`.
pub async fn handle(args: &TurnArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    turn::run(&args.session_id, TurnInput::text(args.text()), ctx, flags).await
}

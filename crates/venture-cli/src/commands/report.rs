use venture_core::actions::TurnInput;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::commands::shared::turn;
use crate::context::AppContext;

/// Handle `vnt report`. A cached report is printed without calling the judge.
pub async fn handle(args: &ReportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    turn::run(&args.session_id, TurnInput::GenerateReport, ctx, flags).await
}

mod delete;
mod events;
mod list;
mod new;
mod show;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::context::AppContext;

/// Handle `vnt session`.
pub async fn handle(
    action: &SessionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SessionCommands::New { name, industry } => {
            new::run(name, industry.as_deref(), ctx, flags).await
        }
        SessionCommands::List => list::run(ctx, flags).await,
        SessionCommands::Show { id } => show::run(id, ctx, flags).await,
        SessionCommands::Events { id } => events::run(id, ctx, flags).await,
        SessionCommands::Delete { id } => delete::run(id, ctx, flags).await,
    }
}

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Session { action } => commands::session::handle(&action, ctx, flags).await,
        Commands::Turn(args) => commands::turn::handle(&args, ctx, flags).await,
        Commands::Select(args) => commands::selection::handle_select(&args, ctx, flags).await,
        Commands::Deselect(args) => commands::selection::handle_deselect(&args, ctx, flags).await,
        Commands::Checkpoint(args) => commands::checkpoint::handle(&args, ctx, flags).await,
        Commands::Report(args) => commands::report::handle(&args, ctx, flags).await,
        Commands::Serve(args) => commands::serve::handle(&args, ctx).await,
    }
}

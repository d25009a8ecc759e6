use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let removed = ctx.service.delete(id).await?;
    tracing::info!(session = %id, "session deleted");
    output(&removed, flags.format)
}

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

const DEFAULT_LIMIT: u32 = 20;

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = flags.limit.unwrap_or(DEFAULT_LIMIT);
    let sessions = ctx.service.list(limit).await?;
    output(&sessions, flags.format)
}

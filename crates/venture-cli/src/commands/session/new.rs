use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Prints the created session's id alongside its first question.
pub async fn run(
    name: &str,
    industry: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let opening = ctx.service.create_session(name, industry).await?;
    output(&opening, flags.format)
}

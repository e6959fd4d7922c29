//! Stats command handler.

use anyhow::Result;

use super::{apply_view, flush_notifications, load_library};
use crate::bootstrap::CliContext;
use crate::commands::ViewArgs;
use crate::presentation::print_stats;

/// Execute the stats command.
///
/// Label and rating counts cover the whole library; `Visible` reflects the
/// filters.
pub async fn execute(ctx: &mut CliContext, view: &ViewArgs) -> Result<()> {
    load_library(ctx).await?;
    apply_view(ctx, view);
    print_stats(&ctx.session.stats());
    flush_notifications(ctx);
    Ok(())
}

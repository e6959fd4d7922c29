//! Batch command handler.
//!
//! Applies one judgment to every image in the visible list. Images hidden
//! by the filters are never touched.

use anyhow::Result;
use photocull_core::BatchAction;

use super::{apply_view, flush_notifications, load_library, settle};
use crate::bootstrap::CliContext;
use crate::commands::ViewArgs;
use crate::error::CliError;

/// Execute the batch command.
pub async fn execute(ctx: &mut CliContext, action: BatchAction, view: &ViewArgs) -> Result<()> {
    load_library(ctx).await?;
    apply_view(ctx, view);

    let report = ctx.session.batch(action).map_err(CliError::from)?;
    if report.is_empty() {
        println!("No visible images to {action}.");
        flush_notifications(ctx);
        return Ok(());
    }

    println!("Applied {action} to {} image(s).", report.len());
    settle(ctx).await
}

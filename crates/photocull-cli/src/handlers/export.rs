//! Export command handler.

use anyhow::Result;
use photocull_core::{ExportKind, ExportOutcome};

use super::{flush_notifications, load_library};
use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the export command.
///
/// Exports every image labelled `selected` in the library, regardless of
/// any filter.
pub async fn execute(ctx: &mut CliContext, kind: ExportKind) -> Result<()> {
    load_library(ctx).await?;
    let outcome = ctx.session.export(kind).await;
    flush_notifications(ctx);

    match outcome {
        ExportOutcome::NothingSelected | ExportOutcome::Exported { .. } => Ok(()),
        ExportOutcome::Failed { error } => Err(CliError::Unavailable(error).into()),
    }
}

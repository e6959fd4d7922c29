//! Command handlers that drive the `TriageSession`.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &mut CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Load the library from the server (except `sample`)
//!   2. Call session operations
//!   3. Wait for pending judgment writes and print notifications
//!
//! Handlers should NOT filter, sort or mutate records themselves.

pub mod batch;
pub mod export;
pub mod judge;
pub mod keys;
pub mod list;
pub mod sample;
pub mod stats;
pub mod upload;

use anyhow::Result;
use photocull_core::Resolution;

use crate::bootstrap::CliContext;
use crate::commands::ViewArgs;
use crate::error::CliError;
use crate::presentation::print_notifications;

/// Load the library, failing the command if the listing fails.
pub(crate) async fn load_library(ctx: &mut CliContext) -> Result<usize> {
    if let Some(count) = ctx.session.refresh().await {
        return Ok(count);
    }
    flush_notifications(ctx);
    Err(CliError::Unavailable("could not load images from the server".to_string()).into())
}

/// Apply filter/sort options to the session's view.
pub(crate) fn apply_view(ctx: &mut CliContext, view: &ViewArgs) {
    let config = view.apply(*ctx.session.view_config());
    ctx.session.set_view_config(config);
}

pub(crate) fn flush_notifications(ctx: &CliContext) {
    print_notifications(&ctx.notifications.drain());
}

/// Wait for every outstanding judgment write, then print notifications.
///
/// Fails if any current change could not be saved.
pub(crate) async fn settle(ctx: &mut CliContext) -> Result<()> {
    let resolutions = ctx.session.settle().await;
    flush_notifications(ctx);

    let failed = resolutions
        .iter()
        .filter(|resolution| matches!(resolution, Resolution::Retained | Resolution::Reverted))
        .count();
    if failed > 0 {
        return Err(CliError::Unavailable(format!("{failed} change(s) were not saved")).into());
    }
    Ok(())
}

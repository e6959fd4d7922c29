//! Rate and label command handlers.
//!
//! Both apply a single judgment change optimistically and then wait for the
//! server to acknowledge it.

use anyhow::Result;
use photocull_core::{ImageId, Judgment, JudgmentChange, Label, Rating};

use super::{load_library, settle};
use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::format_stars;

/// Execute the rate command.
pub async fn rate(ctx: &mut CliContext, id: ImageId, stars: u8) -> Result<()> {
    let rating = Rating::new(stars).map_err(CliError::from)?;
    apply(ctx, id, JudgmentChange::rating(rating)).await
}

/// Execute the label command.
pub async fn label(ctx: &mut CliContext, id: ImageId, label: Label) -> Result<()> {
    apply(ctx, id, JudgmentChange::label(label)).await
}

async fn apply(ctx: &mut CliContext, id: ImageId, change: JudgmentChange) -> Result<()> {
    load_library(ctx).await?;
    let judgment = ctx
        .session
        .set_judgment(id, change)
        .map_err(CliError::from)?;
    print_judgment(id, judgment);
    settle(ctx).await
}

pub(crate) fn print_judgment(id: ImageId, judgment: Judgment) {
    println!(
        "Image {id}: rating {} label {}",
        format_stars(judgment.rating),
        judgment.label
    );
}

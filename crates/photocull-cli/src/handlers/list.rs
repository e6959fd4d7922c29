//! List command handler.
//!
//! Displays the visible list: the records that pass the filters, in sort
//! order.

use anyhow::Result;

use super::{apply_view, flush_notifications, load_library};
use crate::bootstrap::CliContext;
use crate::commands::ViewArgs;
use crate::presentation::print_image_table;

/// Execute the list command.
pub async fn execute(ctx: &mut CliContext, view: &ViewArgs, json: bool) -> Result<()> {
    load_library(ctx).await?;
    apply_view(ctx, view);

    let visible = ctx.session.visible();
    if json {
        println!("{}", serde_json::to_string_pretty(visible.records())?);
    } else {
        print_image_table(visible.iter(), visible.empty_state());
        if !visible.is_empty() {
            println!();
            println!(
                "{} of {} image(s) shown",
                visible.len(),
                ctx.session.store().len()
            );
        }
    }

    flush_notifications(ctx);
    Ok(())
}

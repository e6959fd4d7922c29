//! Sample command handler: the demonstration records, offline.

use anyhow::Result;

use super::{apply_view, flush_notifications};
use crate::bootstrap::CliContext;
use crate::commands::ViewArgs;
use crate::presentation::print_image_table;

/// Execute the sample command.
pub fn execute(ctx: &mut CliContext, view: &ViewArgs) -> Result<()> {
    ctx.session.load_sample_images();
    apply_view(ctx, view);
    flush_notifications(ctx);

    let visible = ctx.session.visible();
    print_image_table(visible.iter(), visible.empty_state());
    Ok(())
}

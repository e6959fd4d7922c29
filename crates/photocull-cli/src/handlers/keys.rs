//! Keys command handler.
//!
//! Opens one image in the detail view and replays keyboard shortcuts
//! against it, exactly as the grid UI would.

use anyhow::Result;
use photocull_core::ImageId;

use super::judge::print_judgment;
use super::{load_library, settle};
use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::describe_key_command;

/// Execute the keys command.
pub async fn execute(ctx: &mut CliContext, id: ImageId, keys: &[String]) -> Result<()> {
    load_library(ctx).await?;

    let record = ctx.session.open_detail(id).map_err(CliError::from)?;
    println!("Opened {} (ID {})", record.filename, record.id);

    for key in keys {
        match ctx.session.handle_key(key).map_err(CliError::from)? {
            Some(command) => println!("  {key}: {}", describe_key_command(command)),
            None => println!("  {key}: ignored"),
        }
    }

    let record = ctx.session.store().get(id).map_err(CliError::from)?;
    print_judgment(id, record.judgment);
    settle(ctx).await
}

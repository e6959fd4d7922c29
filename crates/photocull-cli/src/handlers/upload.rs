//! Upload command handler.

use std::path::{Path, PathBuf};

use anyhow::Result;
use photocull_core::{EmptyState, ImageRecord, UploadFile};

use super::flush_notifications;
use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_image_table;

/// Read one file into an upload part named after its file name.
pub(crate) async fn read_upload_file(path: &Path) -> Result<UploadFile, CliError> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CliError::Arguments(format!("not a file path: {}", path.display())))?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    Ok(UploadFile::new(filename, bytes))
}

/// Execute the upload command.
///
/// Prints the newly analysed images, newest first. Per-file failures are
/// reported but do not fail the command; a failed batch does.
pub async fn execute(ctx: &mut CliContext, paths: &[PathBuf]) -> Result<()> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(read_upload_file(path).await?);
    }

    println!("Uploading {} file(s)...", files.len());
    let Some(summary) = ctx.session.upload(files).await else {
        return Err(CliError::Unavailable("another upload is in progress".to_string()).into());
    };
    flush_notifications(ctx);

    if let Some(error) = summary.error {
        return Err(CliError::Unavailable(error).into());
    }

    let merged: Vec<&ImageRecord> = summary
        .merged
        .iter()
        .filter_map(|id| ctx.session.store().get(*id).ok())
        .collect();
    if !merged.is_empty() {
        println!();
        print_image_table(merged, EmptyState::Populated);
    }
    Ok(())
}

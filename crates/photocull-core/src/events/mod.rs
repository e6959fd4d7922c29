//! Canonical event union for the user-visible notification channel.
//!
//! Every remote-call outcome the user should hear about becomes one
//! [`AppEvent`]. Emission is fire-and-forget: the core never waits on a
//! listener and never learns whether a toast was shown.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "judgment_sync_failed", "imageId": 7, "error": "Network error: refused" }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{ImageId, Judgment};
use crate::ports::UploadFileError;

/// Severity of a notification, mirroring toast styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Events emitted by the triage session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    // ========== Library Events ==========
    /// The bulk listing could not be fetched.
    LoadFailed {
        /// Error description.
        error: String,
    },

    /// Demonstration records replaced the store.
    SampleLoaded {
        /// Number of sample records.
        count: usize,
    },

    // ========== Judgment Events ==========
    /// A judgment update was not acknowledged by the service.
    ///
    /// Under the default policy the local value is retained.
    JudgmentSyncFailed {
        #[serde(rename = "imageId")]
        image_id: ImageId,
        /// Error description.
        error: String,
    },

    /// A failed judgment update was rolled back locally.
    JudgmentReverted {
        #[serde(rename = "imageId")]
        image_id: ImageId,
        /// The judgment now held locally.
        restored: Judgment,
    },

    // ========== Upload Events ==========
    /// Some files were processed and merged into the store.
    UploadCompleted {
        #[serde(rename = "processedCount")]
        processed_count: usize,
    },

    /// Some files in the batch failed server-side processing.
    UploadErrors {
        #[serde(rename = "failedCount")]
        failed_count: usize,
        /// Per-file detail, for logs and detail views.
        errors: Vec<UploadFileError>,
    },

    /// The upload request failed as a whole.
    UploadFailed {
        /// Error description.
        error: String,
    },

    // ========== Export Events ==========
    /// Export requested with nothing labelled `selected`.
    NothingToExport,

    /// Export finished.
    ExportCompleted {
        #[serde(rename = "exportedFiles")]
        exported_files: u64,
    },

    /// Export request failed.
    ExportFailed {
        /// Error description.
        error: String,
    },
}

impl AppEvent {
    /// Create a judgment sync failure event.
    pub fn judgment_sync_failed(image_id: ImageId, error: impl Into<String>) -> Self {
        Self::JudgmentSyncFailed {
            image_id,
            error: error.into(),
        }
    }

    /// Create a load failure event.
    pub fn load_failed(error: impl Into<String>) -> Self {
        Self::LoadFailed {
            error: error.into(),
        }
    }

    /// Create an upload failure event.
    pub fn upload_failed(error: impl Into<String>) -> Self {
        Self::UploadFailed {
            error: error.into(),
        }
    }

    /// Create an export failure event.
    pub fn export_failed(error: impl Into<String>) -> Self {
        Self::ExportFailed {
            error: error.into(),
        }
    }

    /// Get the event name for routing (e.g., toast categories, log targets).
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::LoadFailed { .. } => "library:load_failed",
            Self::SampleLoaded { .. } => "library:sample_loaded",
            Self::JudgmentSyncFailed { .. } => "judgment:sync_failed",
            Self::JudgmentReverted { .. } => "judgment:reverted",
            Self::UploadCompleted { .. } => "upload:completed",
            Self::UploadErrors { .. } => "upload:errors",
            Self::UploadFailed { .. } => "upload:failed",
            Self::NothingToExport => "export:nothing_selected",
            Self::ExportCompleted { .. } => "export:completed",
            Self::ExportFailed { .. } => "export:failed",
        }
    }

    pub const fn level(&self) -> NotificationLevel {
        match self {
            Self::UploadCompleted { .. } | Self::ExportCompleted { .. } => {
                NotificationLevel::Success
            }
            Self::SampleLoaded { .. } => NotificationLevel::Info,
            Self::NothingToExport | Self::JudgmentReverted { .. } => NotificationLevel::Warning,
            Self::LoadFailed { .. }
            | Self::JudgmentSyncFailed { .. }
            | Self::UploadErrors { .. }
            | Self::UploadFailed { .. }
            | Self::ExportFailed { .. } => NotificationLevel::Error,
        }
    }

    /// User-facing notification text.
    pub fn message(&self) -> String {
        match self {
            Self::LoadFailed { .. } => "Error loading images".to_string(),
            Self::SampleLoaded { .. } => "Sample images loaded for demonstration".to_string(),
            Self::JudgmentSyncFailed { image_id, .. } => {
                format!("Could not save changes for image {image_id}")
            }
            Self::JudgmentReverted { image_id, .. } => {
                format!("Changes to image {image_id} were reverted")
            }
            Self::UploadCompleted { processed_count } => {
                format!("Successfully processed {processed_count} images")
            }
            Self::UploadErrors { failed_count, .. } => {
                format!("Failed to process {failed_count} images.")
            }
            Self::UploadFailed { .. } => "Error uploading files".to_string(),
            Self::NothingToExport => "No images selected for export".to_string(),
            Self::ExportCompleted { exported_files } => {
                format!("Successfully exported {exported_files} files")
            }
            Self::ExportFailed { .. } => "Export failed".to_string(),
        }
    }
}

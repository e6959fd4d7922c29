//! Remote persistence service port.
//!
//! The persistence service owns ingestion (upload + analysis), the canonical
//! copy of every judgment, and export. Core code talks to it only through
//! [`PersistencePort`]; adapters map their transport errors to
//! [`PersistenceError`].

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ImageId, ImageRecord, Judgment};
use crate::error::TriageError;

/// Errors from persistence port operations.
///
/// These are domain-level errors; HTTP and JSON errors are mapped to them by
/// the adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// The service could not be reached.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// The service answered with a non-success status.
    #[error("Service returned status {status}: {message}")]
    Status {
        /// HTTP-like status code
        status: u16,
        /// Error body or reason phrase
        message: String,
    },

    /// The response could not be understood.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// The service accepted the request but reported failure in the body.
    #[error("Request rejected: {message}")]
    Rejected {
        /// Reason reported by the service
        message: String,
    },
}

impl PersistenceError {
    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a rejection error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Result type alias for persistence port operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

// ─────────────────────────────────────────────────────────────────────────────
// Upload DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// One file in an upload batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    /// MIME type, when known.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            bytes,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Per-file failure reported by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFileError {
    pub filename: String,
    pub error: String,
}

/// Response body of `POST /upload`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadResponse {
    pub success: bool,
    /// Newly analysed records, newest first.
    pub images: Vec<ImageRecord>,
    pub processed_count: usize,
    pub errors: Vec<UploadFileError>,
    /// Batch-level error message, present when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Export DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Export format requested from the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// Filename listing.
    #[default]
    Csv,
    /// Copy originals into an export folder.
    Copy,
    /// Zip archive of originals.
    Zip,
}

impl ExportKind {
    pub const ALL: [Self; 3] = [Self::Csv, Self::Copy, Self::Zip];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Copy => "copy",
            Self::Zip => "zip",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportKind {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TriageError::InvalidExportKind(s.to_string()))
    }
}

/// Body of `POST /export`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(rename = "type")]
    pub kind: ExportKind,
    pub selected_ids: Vec<ImageId>,
}

/// Response body of `POST /export`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportResponse {
    pub success: bool,
    pub exported_files: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Port
// ─────────────────────────────────────────────────────────────────────────────

/// Port for the remote persistence service.
///
/// # Design Rules
///
/// - No HTTP types in signatures
/// - `save_judgment` always carries both judgment fields
/// - Implementations never retry non-idempotent calls
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersistencePort: Send + Sync {
    /// Fetch every record, in the service's order.
    async fn list_images(&self) -> PersistenceResult<Vec<ImageRecord>>;

    /// Upload a batch of files for analysis.
    async fn upload(&self, files: Vec<UploadFile>) -> PersistenceResult<UploadResponse>;

    /// Persist the full judgment of one image.
    ///
    /// Success means the service acknowledged the write; no response body
    /// fields are consumed.
    async fn save_judgment(&self, id: ImageId, judgment: Judgment) -> PersistenceResult<()>;

    /// Request an export of the given ids.
    async fn export(&self, request: ExportRequest) -> PersistenceResult<ExportResponse>;
}

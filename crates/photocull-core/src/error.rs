//! Core error type for triage operations.
//!
//! Remote failures never surface here as faults: the session converts them
//! into user-visible events (see `events`). `TriageError` covers the local,
//! caller-signalled conditions.

use thiserror::Error;

use crate::domain::ImageId;
use crate::settings::SettingsError;

/// Errors signalled to the caller of a core operation.
#[derive(Debug, Error)]
pub enum TriageError {
    /// The operation referenced an id absent from the store.
    #[error("Image not found: {0}")]
    NotFound(ImageId),

    /// Star rating outside `0..=5`.
    #[error("Rating must be between 0 and 5, got {0}")]
    InvalidRating(i64),

    /// Star rating that is not a number.
    #[error("Rating must be a number between 0 and 5, got '{0}'")]
    InvalidRatingText(String),

    /// Unknown label string.
    #[error("Unknown label '{0}' (expected none, selected, rejected or review)")]
    InvalidLabel(String),

    /// Unknown sort key string.
    #[error("Unknown sort key '{0}'")]
    InvalidSortKey(String),

    /// Unknown rating filter string.
    #[error("Unknown rating filter '{0}' (expected all or 0-5)")]
    InvalidRatingFilter(String),

    /// Unknown export kind string.
    #[error("Unknown export type '{0}' (expected csv, copy or zip)")]
    InvalidExportKind(String),

    /// Unknown batch action string.
    #[error("Unknown batch action '{0}' (expected select, reject or clear)")]
    InvalidBatchAction(String),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

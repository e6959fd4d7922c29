//! Settings domain types and validation.
//!
//! Pure configuration types with no infrastructure dependencies. The
//! composing application loads them however it likes and hands them to
//! [`TriageSession`](crate::services::TriageSession).

use serde::{Deserialize, Serialize};

use crate::domain::SortKey;

/// Default thumbnail height in pixels.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 250;

/// Smallest grid column width in pixels, whatever the thumbnail size.
pub const MIN_GRID_COLUMN_WIDTH: u32 = 150;

const THUMBNAIL_SIZE_RANGE: std::ops::RangeInclusive<u32> = 100..=500;

/// What to do locally when the service rejects a judgment update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollbackPolicy {
    /// Keep the optimistic value and report the failure.
    #[default]
    Retain,
    /// Restore the previous value if nothing newer was applied, and report
    /// the reversion.
    Revert,
}

/// Application settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Sort key applied when a session starts.
    pub default_sort: Option<SortKey>,

    /// Local handling of failed judgment syncs.
    pub rollback_policy: Option<RollbackPolicy>,

    /// Thumbnail height in pixels (100-500).
    pub thumbnail_size: Option<u32>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            default_sort: Some(SortKey::Filename),
            rollback_policy: Some(RollbackPolicy::Retain),
            thumbnail_size: Some(DEFAULT_THUMBNAIL_SIZE),
        }
    }

    #[must_use]
    pub fn effective_sort(&self) -> SortKey {
        self.default_sort.unwrap_or_default()
    }

    #[must_use]
    pub fn effective_rollback_policy(&self) -> RollbackPolicy {
        self.rollback_policy.unwrap_or_default()
    }

    #[must_use]
    pub const fn effective_thumbnail_size(&self) -> u32 {
        match self.thumbnail_size {
            Some(size) => size,
            None => DEFAULT_THUMBNAIL_SIZE,
        }
    }

    /// Merge an update into these settings, only touching fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(sort) = other.default_sort {
            self.default_sort = sort;
        }
        if let Some(policy) = other.rollback_policy {
            self.rollback_policy = policy;
        }
        if let Some(size) = other.thumbnail_size {
            self.thumbnail_size = size;
        }
    }
}

/// Grid column minimum width for a thumbnail size.
pub fn grid_min_column_width(thumbnail_size: u32) -> u32 {
    thumbnail_size
        .saturating_sub(50)
        .max(MIN_GRID_COLUMN_WIDTH)
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = reset the field to its default
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub default_sort: Option<Option<SortKey>>,
    pub rollback_policy: Option<Option<RollbackPolicy>>,
    pub thumbnail_size: Option<Option<u32>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Thumbnail size must be between 100 and 500 pixels, got {0}")]
    InvalidThumbnailSize(u32),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(size) = settings.thumbnail_size {
        if !THUMBNAIL_SIZE_RANGE.contains(&size) {
            return Err(SettingsError::InvalidThumbnailSize(size));
        }
    }

    Ok(())
}

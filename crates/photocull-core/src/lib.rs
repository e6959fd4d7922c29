#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod events;
pub mod input;
pub mod ports;
pub mod projection;
pub mod services;
pub mod settings;
pub mod store;

// Re-export commonly used types for convenience
pub use domain::{
    ImageId, ImageRecord, Judgment, JudgmentChange, Label, LabelFilter, QualityTier, Rating,
    RatingFilter, SortKey, ViewConfig, ViewMode, parse_timestamp, sample_images,
};
pub use error::TriageError;
pub use events::{AppEvent, NotificationLevel};
pub use input::KeyCommand;
pub use ports::{
    AppEventEmitter, ExportKind, ExportRequest, ExportResponse, NoopEmitter, NotificationQueue,
    PersistenceError, PersistencePort, PersistenceResult, UploadFile, UploadFileError,
    UploadResponse,
};
pub use projection::{EmptyState, LibraryStats, VisibleList, project};
pub use services::{
    BatchAction, BatchReport, CompareWorkspace, ExportOutcome, Panel, PendingUpload, Resolution,
    SyncStatus, TriageSession, UploadCompletion, UploadSummary,
};
pub use settings::{
    DEFAULT_THUMBNAIL_SIZE, RollbackPolicy, Settings, SettingsError, SettingsUpdate,
    grid_min_column_width, validate_settings,
};
pub use store::{ImageStore, JudgmentUpdate};

#[cfg(test)]
use tokio_test as _;

//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No HTTP client types in any signature
//! - Remote failures are values (`PersistenceError`), never panics
//! - Emitters are fire-and-forget

pub mod event_emitter;
pub mod persistence;

pub use event_emitter::{AppEventEmitter, NoopEmitter, NotificationQueue};
pub use persistence::{
    ExportKind, ExportRequest, ExportResponse, PersistenceError, PersistencePort,
    PersistenceResult, UploadFile, UploadFileError, UploadResponse,
};

#[cfg(test)]
pub use persistence::MockPersistencePort;

//! Core services - the triage workflow layer.
//!
//! Services orchestrate between ports (trait interfaces) and the store. They
//! don't know about concrete adapters. [`TriageSession`] composes them into
//! the single context object adapters drive.

mod batch;
mod compare;
mod export;
mod session;
mod sync;
mod upload;

pub use batch::{BatchAction, BatchReport};
pub use compare::{CompareWorkspace, Panel, selected_for_batch};
pub use export::{ExportOutcome, plan_export};
pub use session::TriageSession;
pub use sync::{Resolution, SyncOutcome, SyncRequest, SyncStatus, Synchronizer};
pub use upload::{PendingUpload, UploadCompletion, UploadGuard, UploadSummary, UploadTicket};

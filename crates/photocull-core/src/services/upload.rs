//! Upload batches and the single-upload guard.
//!
//! At most one upload is in flight per session. Acquiring the guard yields a
//! [`PendingUpload`] that owns an [`UploadTicket`]; dropping the ticket (on
//! completion, error, or cancellation of the future) releases the guard.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::ImageId;
use crate::events::AppEvent;
use crate::ports::{
    AppEventEmitter, PersistencePort, PersistenceResult, UploadFile, UploadFileError,
    UploadResponse,
};
use crate::store::ImageStore;

/// Reentrancy flag shared between a session and its outstanding upload.
#[derive(Debug, Clone, Default)]
pub struct UploadGuard {
    busy: Arc<AtomicBool>,
}

impl UploadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Take the guard, or `None` if an upload is already in flight.
    pub fn try_acquire(&self) -> Option<UploadTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| UploadTicket {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Proof of holding the upload guard. Releases it on drop.
#[derive(Debug)]
pub struct UploadTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for UploadTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// An accepted upload batch, ready to be sent.
pub struct PendingUpload {
    port: Arc<dyn PersistencePort>,
    files: Vec<UploadFile>,
    ticket: UploadTicket,
}

impl PendingUpload {
    pub(crate) fn new(
        port: Arc<dyn PersistencePort>,
        files: Vec<UploadFile>,
        ticket: UploadTicket,
    ) -> Self {
        Self {
            port,
            files,
            ticket,
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Send the batch. Does not touch the session; hand the result to
    /// `TriageSession::finish_upload`.
    pub async fn send(self) -> UploadCompletion {
        let Self {
            port,
            files,
            ticket,
        } = self;
        tracing::info!(files = files.len(), "Starting upload");
        let result = port.upload(files).await;
        UploadCompletion { result, ticket }
    }
}

/// Result of [`PendingUpload::send`]. Still holds the guard until consumed.
#[derive(Debug)]
pub struct UploadCompletion {
    result: PersistenceResult<UploadResponse>,
    ticket: UploadTicket,
}

impl UploadCompletion {
    pub const fn result(&self) -> &PersistenceResult<UploadResponse> {
        &self.result
    }
}

/// What an upload changed, for callers that want more than notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Ids merged into the store, newest first.
    pub merged: Vec<ImageId>,
    pub processed_count: usize,
    pub failed: Vec<UploadFileError>,
    /// Batch-level failure, if the upload failed as a whole.
    pub error: Option<String>,
}

impl UploadSummary {
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Merge a completed upload into the store and emit its notifications.
pub(crate) fn apply_upload(
    store: &mut ImageStore,
    emitter: &dyn AppEventEmitter,
    completion: UploadCompletion,
) -> UploadSummary {
    let UploadCompletion { result, ticket } = completion;
    drop(ticket);

    let response = match result {
        Ok(response) if response.success => response,
        Ok(response) => {
            let error = response
                .error
                .unwrap_or_else(|| "upload was not successful".to_string());
            tracing::error!(error = %error, "Upload rejected by service");
            emitter.emit(AppEvent::upload_failed(error.clone()));
            return UploadSummary {
                error: Some(error),
                ..UploadSummary::default()
            };
        }
        Err(e) => {
            tracing::error!(error = %e, "Upload failed");
            emitter.emit(AppEvent::upload_failed(e.to_string()));
            return UploadSummary {
                error: Some(e.to_string()),
                ..UploadSummary::default()
            };
        }
    };

    let merged: Vec<ImageId> = response.images.iter().map(|record| record.id).collect();
    if !response.images.is_empty() {
        store.merge(response.images);
    }
    tracing::info!(
        processed = response.processed_count,
        failed = response.errors.len(),
        "Upload finished"
    );

    if response.processed_count > 0 {
        emitter.emit(AppEvent::UploadCompleted {
            processed_count: response.processed_count,
        });
    }
    if !response.errors.is_empty() {
        for failure in &response.errors {
            tracing::warn!(
                filename = %failure.filename,
                error = %failure.error,
                "File failed processing"
            );
        }
        emitter.emit(AppEvent::UploadErrors {
            failed_count: response.errors.len(),
            errors: response.errors.clone(),
        });
    }

    UploadSummary {
        merged,
        processed_count: response.processed_count,
        failed: response.errors,
        error: None,
    }
}

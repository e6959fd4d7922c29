//! Shared fakes for photocull-core integration tests.

// Each test binary uses a different subset.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use photocull_core::{
    ExportRequest, ExportResponse, ImageId, ImageRecord, Judgment, PersistenceError,
    PersistencePort, PersistenceResult, UploadFile, UploadResponse,
};
use tokio::sync::oneshot;

/// Persistence fake with canned responses that records every call.
#[derive(Default)]
pub struct ScriptedPersistence {
    pub listing: Vec<ImageRecord>,
    pub upload_response: Option<UploadResponse>,
    pub failing_ids: HashSet<ImageId>,
    saved: Mutex<Vec<(ImageId, Judgment)>>,
    exports: Mutex<Vec<ExportRequest>>,
}

impl ScriptedPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing_for(mut self, id: ImageId) -> Self {
        self.failing_ids.insert(id);
        self
    }

    #[must_use]
    pub fn with_upload_response(mut self, response: UploadResponse) -> Self {
        self.upload_response = Some(response);
        self
    }

    pub fn saved(&self) -> Vec<(ImageId, Judgment)> {
        self.saved.lock().unwrap().clone()
    }

    pub fn exports(&self) -> Vec<ExportRequest> {
        self.exports.lock().unwrap().clone()
    }
}

#[async_trait]
impl PersistencePort for ScriptedPersistence {
    async fn list_images(&self) -> PersistenceResult<Vec<ImageRecord>> {
        Ok(self.listing.clone())
    }

    async fn upload(&self, _files: Vec<UploadFile>) -> PersistenceResult<UploadResponse> {
        self.upload_response
            .clone()
            .ok_or_else(|| PersistenceError::network("no upload scripted"))
    }

    async fn save_judgment(&self, id: ImageId, judgment: Judgment) -> PersistenceResult<()> {
        self.saved.lock().unwrap().push((id, judgment));
        if self.failing_ids.contains(&id) {
            return Err(PersistenceError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }

    async fn export(&self, request: ExportRequest) -> PersistenceResult<ExportResponse> {
        let exported_files = u64::try_from(request.selected_ids.len()).unwrap();
        self.exports.lock().unwrap().push(request);
        Ok(ExportResponse {
            success: true,
            exported_files,
            error: None,
        })
    }
}

/// A judgment write held open until the test releases it.
pub struct HeldWrite {
    pub image_id: ImageId,
    pub judgment: Judgment,
    reply: oneshot::Sender<PersistenceResult<()>>,
}

impl HeldWrite {
    pub fn release(self, result: PersistenceResult<()>) {
        let _ = self.reply.send(result);
    }
}

/// Persistence fake whose judgment writes complete only when released,
/// in whatever order the test chooses.
#[derive(Default)]
pub struct GatedPersistence {
    held: Mutex<Vec<HeldWrite>>,
}

impl GatedPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Yield until `count` writes are held, then take them in call order.
    pub async fn take_held(&self, count: usize) -> Vec<HeldWrite> {
        loop {
            {
                let mut held = self.held.lock().unwrap();
                if held.len() >= count {
                    return held.drain(..).collect();
                }
            }
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl PersistencePort for GatedPersistence {
    async fn list_images(&self) -> PersistenceResult<Vec<ImageRecord>> {
        Ok(Vec::new())
    }

    async fn upload(&self, _files: Vec<UploadFile>) -> PersistenceResult<UploadResponse> {
        Err(PersistenceError::network("uploads are not gated"))
    }

    async fn save_judgment(&self, id: ImageId, judgment: Judgment) -> PersistenceResult<()> {
        let (reply, wait) = oneshot::channel();
        self.held.lock().unwrap().push(HeldWrite {
            image_id: id,
            judgment,
            reply,
        });
        wait.await
            .unwrap_or_else(|_| Err(PersistenceError::network("write abandoned")))
    }

    async fn export(&self, _request: ExportRequest) -> PersistenceResult<ExportResponse> {
        Err(PersistenceError::network("exports are not gated"))
    }
}

/// `count` records with ids `1..=count`.
pub fn records(count: i64) -> Vec<ImageRecord> {
    (1..=count)
        .map(|id| ImageRecord::new(id, format!("img_{id:02}.jpg")))
        .collect()
}

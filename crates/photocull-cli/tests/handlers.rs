//! Handler tests against an in-memory server.

use std::collections::HashSet;
use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use photocull_cli::handlers;
use photocull_cli::{CliConfig, CliContext, CliError, ViewArgs, bootstrap_with, exit_code};
use photocull_core::{
    AppEvent, BatchAction, ExportKind, ExportRequest, ExportResponse, ImageId, ImageRecord,
    Judgment, Label, LabelFilter, PersistenceError, PersistencePort, PersistenceResult,
    RollbackPolicy, UploadFile, UploadResponse,
};
use tokio_test::{assert_err, assert_ok};

#[derive(Default)]
struct FakeServer {
    listing: Vec<ImageRecord>,
    failing_ids: HashSet<ImageId>,
    unreachable: bool,
    saved: Mutex<Vec<(ImageId, Judgment)>>,
    uploaded: Mutex<Vec<String>>,
}

impl FakeServer {
    fn with_images(count: i64) -> Self {
        Self {
            listing: (1..=count)
                .map(|id| {
                    let focus = f64::from(u8::try_from(id * 10).unwrap());
                    ImageRecord::new(id, format!("img_{id:02}.jpg")).with_scores(focus, 70.0, 75.0)
                })
                .collect(),
            ..Self::default()
        }
    }

    fn saved(&self) -> Vec<(ImageId, Judgment)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl PersistencePort for FakeServer {
    async fn list_images(&self) -> PersistenceResult<Vec<ImageRecord>> {
        if self.unreachable {
            return Err(PersistenceError::network("connection refused"));
        }
        Ok(self.listing.clone())
    }

    async fn upload(&self, files: Vec<UploadFile>) -> PersistenceResult<UploadResponse> {
        let mut uploaded = self.uploaded.lock().unwrap();
        let images = files
            .iter()
            .enumerate()
            .map(|(n, file)| ImageRecord::new(100 + i64::try_from(n).unwrap(), &file.filename))
            .collect::<Vec<_>>();
        uploaded.extend(files.into_iter().map(|file| file.filename));
        Ok(UploadResponse {
            success: true,
            processed_count: images.len(),
            images,
            errors: Vec::new(),
            error: None,
        })
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
        Ok(ExportResponse {
            success: true,
            exported_files: u64::try_from(request.selected_ids.len()).unwrap(),
            error: None,
        })
    }
}

fn context(server: &Arc<FakeServer>, rollback: RollbackPolicy) -> CliContext {
    let config = CliConfig {
        server: "http://unused.invalid/api/".to_string(),
        timeout: None,
        rollback,
    };
    bootstrap_with(server.clone(), &config).unwrap()
}

#[tokio::test]
async fn test_rate_saves_and_settles() {
    let server = Arc::new(FakeServer::with_images(3));
    let mut ctx = context(&server, RollbackPolicy::Retain);

    assert_ok!(handlers::judge::rate(&mut ctx, 2, 4).await);

    let saved = server.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, 2);
    assert_eq!(saved[0].1.rating.stars(), 4);
    assert_eq!(ctx.session.pending_syncs(), 0);
}

#[tokio::test]
async fn test_rate_out_of_range_is_usage_error() {
    let server = Arc::new(FakeServer::with_images(1));
    let mut ctx = context(&server, RollbackPolicy::Retain);

    let err = assert_err!(handlers::judge::rate(&mut ctx, 1, 6).await);
    assert_eq!(exit_code(&err), 2);
    assert!(server.saved().is_empty());
}

#[tokio::test]
async fn test_label_unknown_id_is_not_found() {
    let server = Arc::new(FakeServer::with_images(1));
    let mut ctx = context(&server, RollbackPolicy::Retain);

    let err = assert_err!(handlers::judge::label(&mut ctx, 42, Label::Selected).await);
    assert!(matches!(
        err.downcast_ref::<CliError>(),
        Some(CliError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_failed_save_keeps_local_label_and_fails_command() {
    let server = Arc::new(FakeServer {
        failing_ids: HashSet::from([3]),
        ..FakeServer::with_images(3)
    });
    let mut ctx = context(&server, RollbackPolicy::Retain);

    let err = assert_err!(handlers::judge::label(&mut ctx, 3, Label::Selected).await);

    assert_eq!(exit_code(&err), 69);
    assert_eq!(ctx.session.store().get(3).unwrap().label(), Label::Selected);
}

#[tokio::test]
async fn test_failed_save_reverts_under_revert_policy() {
    let server = Arc::new(FakeServer {
        failing_ids: HashSet::from([1]),
        ..FakeServer::with_images(2)
    });
    let mut ctx = context(&server, RollbackPolicy::Revert);

    assert_err!(handlers::judge::label(&mut ctx, 1, Label::Rejected).await);
    assert_eq!(ctx.session.store().get(1).unwrap().label(), Label::None);
}

#[tokio::test]
async fn test_unreachable_server_fails_before_any_write() {
    let server = Arc::new(FakeServer {
        unreachable: true,
        ..FakeServer::default()
    });
    let mut ctx = context(&server, RollbackPolicy::Retain);

    let err = assert_err!(handlers::stats::execute(&mut ctx, &ViewArgs::default()).await);
    assert_eq!(exit_code(&err), 69);
}

#[tokio::test]
async fn test_batch_only_touches_visible_images() {
    let server = Arc::new(FakeServer::with_images(6));
    let mut ctx = context(&server, RollbackPolicy::Retain);
    let view = ViewArgs {
        min_focus: 40,
        ..ViewArgs::default()
    };

    assert_ok!(handlers::batch::execute(&mut ctx, BatchAction::Reject, &view).await);

    let mut ids: Vec<ImageId> = server.saved().iter().map(|(id, _)| *id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![4, 5, 6]);
    assert_eq!(ctx.session.store().get(1).unwrap().label(), Label::None);
}

#[tokio::test]
async fn test_batch_with_nothing_visible_sends_nothing() {
    let server = Arc::new(FakeServer::with_images(2));
    let mut ctx = context(&server, RollbackPolicy::Retain);
    let view = ViewArgs {
        label: LabelFilter::Only(Label::Review),
        ..ViewArgs::default()
    };

    assert_ok!(handlers::batch::execute(&mut ctx, BatchAction::Select, &view).await);
    assert!(server.saved().is_empty());
}

#[tokio::test]
async fn test_keys_apply_until_escape() {
    let server = Arc::new(FakeServer::with_images(2));
    let mut ctx = context(&server, RollbackPolicy::Retain);
    let keys: Vec<String> = ["4", "g", "Escape", "r"]
        .into_iter()
        .map(String::from)
        .collect();

    assert_ok!(handlers::keys::execute(&mut ctx, 2, &keys).await);

    let record = ctx.session.store().get(2).unwrap();
    assert_eq!(record.rating().stars(), 4);
    assert_eq!(record.label(), Label::Selected);
    assert!(ctx.session.focused().is_none());
    assert_eq!(server.saved().len(), 2);
}

#[tokio::test]
async fn test_upload_reads_files_and_merges_results() {
    let server = Arc::new(FakeServer::default());
    let mut ctx = context(&server, RollbackPolicy::Retain);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("beach.jpg");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&[0xFF, 0xD8, 0xFF]).unwrap();

    assert_ok!(handlers::upload::execute(&mut ctx, &[path]).await);

    assert_eq!(*server.uploaded.lock().unwrap(), vec!["beach.jpg".to_string()]);
    assert_eq!(ctx.session.store().get(100).unwrap().filename, "beach.jpg");
    assert!(!ctx.session.upload_in_progress());
}

#[tokio::test]
async fn test_upload_missing_file_is_io_error() {
    let server = Arc::new(FakeServer::default());
    let mut ctx = context(&server, RollbackPolicy::Retain);
    let dir = tempfile::tempdir().unwrap();

    let missing = [dir.path().join("gone.jpg")];

    let err = assert_err!(handlers::upload::execute(&mut ctx, &missing).await);
    assert_eq!(exit_code(&err), 74);
    assert!(server.uploaded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_export_with_nothing_selected_succeeds_quietly() {
    let server = Arc::new(FakeServer::with_images(2));
    let mut ctx = context(&server, RollbackPolicy::Retain);
    let notifications = ctx.notifications.clone();

    assert_ok!(handlers::export::execute(&mut ctx, ExportKind::Csv).await);
    // Printed and drained by the handler.
    assert!(notifications.is_empty());
}

#[tokio::test]
async fn test_sample_runs_offline() {
    let server = Arc::new(FakeServer {
        unreachable: true,
        ..FakeServer::default()
    });
    let mut ctx = context(&server, RollbackPolicy::Retain);

    assert_ok!(handlers::sample::execute(&mut ctx, &ViewArgs::default()));
    assert_eq!(ctx.session.store().len(), 3);
    assert!(ctx.notifications.drain().iter().all(|e| !matches!(e, AppEvent::LoadFailed { .. })));
}

//! Export of selected images.

use crate::domain::Label;
use crate::events::AppEvent;
use crate::ports::{AppEventEmitter, ExportKind, ExportRequest, PersistencePort};
use crate::store::ImageStore;

/// Result of an export attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing labelled `selected`; no request was sent.
    NothingSelected,
    Exported { files: u64 },
    Failed { error: String },
}

/// Build the request for every `selected` record in the store.
///
/// Scope is the whole store, not the visible list.
pub fn plan_export(store: &ImageStore, kind: ExportKind) -> Option<ExportRequest> {
    let selected_ids = store.ids_with_label(Label::Selected);
    if selected_ids.is_empty() {
        return None;
    }
    Some(ExportRequest { kind, selected_ids })
}

/// Plan, send, and report an export.
pub(crate) async fn run_export(
    store: &ImageStore,
    port: &dyn PersistencePort,
    emitter: &dyn AppEventEmitter,
    kind: ExportKind,
) -> ExportOutcome {
    let Some(request) = plan_export(store, kind) else {
        tracing::debug!(%kind, "Export requested with no selected images");
        emitter.emit(AppEvent::NothingToExport);
        return ExportOutcome::NothingSelected;
    };

    let count = request.selected_ids.len();
    tracing::info!(%kind, selected = count, "Exporting selected images");

    match port.export(request).await {
        Ok(response) if response.success => {
            tracing::info!(exported = response.exported_files, "Export finished");
            emitter.emit(AppEvent::ExportCompleted {
                exported_files: response.exported_files,
            });
            ExportOutcome::Exported {
                files: response.exported_files,
            }
        }
        Ok(response) => {
            let error = response
                .error
                .unwrap_or_else(|| "export was not successful".to_string());
            tracing::error!(error = %error, "Export rejected by service");
            emitter.emit(AppEvent::export_failed(error.clone()));
            ExportOutcome::Failed { error }
        }
        Err(e) => {
            tracing::error!(error = %e, "Export failed");
            emitter.emit(AppEvent::export_failed(e.to_string()));
            ExportOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}

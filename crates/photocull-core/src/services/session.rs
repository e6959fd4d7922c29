//! `TriageSession` - the context object for one triage workspace.
//!
//! A session owns the store, the view configuration, the compare workspace,
//! the detail focus, the upload guard and the synchronizer. Adapters (CLI,
//! GUI) construct one at their composition root and drive it from a single
//! task; remote calls are the only suspension points.

use std::sync::Arc;

use crate::domain::{
    ImageId, ImageRecord, Judgment, JudgmentChange, Label, LabelFilter, Rating, RatingFilter,
    SortKey, ViewConfig, ViewMode, sample_images,
};
use crate::error::TriageError;
use crate::events::AppEvent;
use crate::input::KeyCommand;
use crate::ports::{AppEventEmitter, ExportKind, PersistencePort, UploadFile};
use crate::projection::{LibraryStats, VisibleList, project};
use crate::settings::{Settings, SettingsUpdate, grid_min_column_width, validate_settings};
use crate::store::ImageStore;

use super::batch::{BatchAction, BatchReport};
use super::compare::{self, CompareWorkspace, Panel};
use super::export::{self, ExportOutcome};
use super::sync::{Resolution, SyncRequest, SyncStatus, Synchronizer};
use super::upload::{self, PendingUpload, UploadCompletion, UploadGuard, UploadSummary};

/// One triage workspace.
///
/// # Example
///
/// ```ignore
/// let mut session = TriageSession::new(Arc::new(HttpPersistence::new(config)?), emitter);
/// session.refresh().await;
/// session.rate(7, 4)?;
/// session.settle().await;
/// ```
pub struct TriageSession {
    store: ImageStore,
    view: ViewConfig,
    mode: ViewMode,
    compare: CompareWorkspace,
    focused: Option<ImageId>,
    uploads: UploadGuard,
    sync: Synchronizer,
    port: Arc<dyn PersistencePort>,
    emitter: Arc<dyn AppEventEmitter>,
    settings: Settings,
}

impl TriageSession {
    /// Create a session with default settings and an empty store.
    pub fn new(port: Arc<dyn PersistencePort>, emitter: Arc<dyn AppEventEmitter>) -> Self {
        let settings = Settings::with_defaults();
        Self {
            store: ImageStore::new(),
            view: ViewConfig::default().with_sort_key(settings.effective_sort()),
            mode: ViewMode::Grid,
            compare: CompareWorkspace::new(),
            focused: None,
            uploads: UploadGuard::new(),
            sync: Synchronizer::new(Arc::clone(&port), settings.effective_rollback_policy()),
            port,
            emitter,
            settings,
        }
    }

    /// Create a session with explicit settings.
    pub fn with_settings(
        port: Arc<dyn PersistencePort>,
        emitter: Arc<dyn AppEventEmitter>,
        settings: Settings,
    ) -> Result<Self, TriageError> {
        validate_settings(&settings)?;
        let mut session = Self::new(port, emitter);
        session.view.sort_key = settings.effective_sort();
        session.sync.set_policy(settings.effective_rollback_policy());
        session.settings = settings;
        Ok(session)
    }

    // ========== Settings ==========

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply a partial settings update, validating the result first.
    ///
    /// A changed default sort does not touch the current view.
    pub fn update_settings(&mut self, update: &SettingsUpdate) -> Result<(), TriageError> {
        let mut next = self.settings.clone();
        next.merge(update);
        validate_settings(&next)?;
        self.sync.set_policy(next.effective_rollback_policy());
        self.settings = next;
        Ok(())
    }

    pub const fn thumbnail_size(&self) -> u32 {
        self.settings.effective_thumbnail_size()
    }

    pub fn set_thumbnail_size(&mut self, size: u32) -> Result<(), TriageError> {
        self.update_settings(&SettingsUpdate {
            thumbnail_size: Some(Some(size)),
            ..SettingsUpdate::default()
        })
    }

    pub fn grid_min_column_width(&self) -> u32 {
        grid_min_column_width(self.thumbnail_size())
    }

    // ========== Library ==========

    pub const fn store(&self) -> &ImageStore {
        &self.store
    }

    /// Reload the whole store from the service.
    ///
    /// Returns the number of records loaded, or `None` if the listing failed
    /// (a `LoadFailed` event is emitted and the store is left as it was).
    pub async fn refresh(&mut self) -> Option<usize> {
        match self.port.list_images().await {
            Ok(records) => {
                self.store.replace_all(records);
                self.sync.clear_failures();
                tracing::info!(count = self.store.len(), "Loaded images");
                Some(self.store.len())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load images");
                self.emitter.emit(AppEvent::load_failed(e.to_string()));
                None
            }
        }
    }

    /// Replace the store with the built-in demonstration records.
    pub fn load_sample_images(&mut self) {
        let samples = sample_images();
        let count = samples.len();
        self.store.replace_all(samples);
        self.sync.clear_failures();
        self.emitter.emit(AppEvent::SampleLoaded { count });
    }

    /// Prepend analysed records, newest first.
    pub fn merge_images(&mut self, records: Vec<ImageRecord>) {
        tracing::debug!(count = records.len(), "Merging images");
        self.store.merge(records);
    }

    // ========== View ==========

    pub const fn view_config(&self) -> &ViewConfig {
        &self.view
    }

    pub fn set_view_config(&mut self, config: ViewConfig) {
        self.view = config;
    }

    pub fn set_rating_filter(&mut self, filter: RatingFilter) {
        self.view.rating_filter = filter;
    }

    pub fn set_label_filter(&mut self, filter: LabelFilter) {
        self.view.label_filter = filter;
    }

    pub fn set_focus_threshold(&mut self, threshold: u32) {
        self.view.focus_threshold = threshold;
    }

    pub fn set_exposure_threshold(&mut self, threshold: u32) {
        self.view.exposure_threshold = threshold;
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.view.sort_key = key;
    }

    pub const fn view_mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// The current visible list. Recomputed on every call.
    pub fn visible(&self) -> VisibleList<'_> {
        project(&self.store, &self.view)
    }

    pub fn stats(&self) -> LibraryStats {
        LibraryStats::collect(&self.store, &self.visible())
    }

    // ========== Judgments ==========

    /// Apply `change` locally and send the resulting judgment.
    ///
    /// The store reflects the change before this returns; the remote write
    /// completes later (see [`Self::process_completions`]).
    pub fn set_judgment(
        &mut self,
        id: ImageId,
        change: JudgmentChange,
    ) -> Result<Judgment, TriageError> {
        let update = self
            .store
            .update(id, |judgment| *judgment = change.resolve(*judgment))?;
        self.sync.dispatch(SyncRequest::from_update(id, update));
        Ok(update.current)
    }

    pub fn rate(&mut self, id: ImageId, stars: u8) -> Result<Judgment, TriageError> {
        let rating = Rating::new(stars)?;
        self.set_judgment(id, JudgmentChange::rating(rating))
    }

    pub fn set_label(&mut self, id: ImageId, label: Label) -> Result<Judgment, TriageError> {
        self.set_judgment(id, JudgmentChange::label(label))
    }

    pub fn quick_select(&mut self, id: ImageId) -> Result<Judgment, TriageError> {
        self.set_label(id, Label::Selected)
    }

    pub fn quick_reject(&mut self, id: ImageId) -> Result<Judgment, TriageError> {
        self.set_label(id, Label::Rejected)
    }

    /// Apply one action to every record in the current visible list.
    ///
    /// Records hidden by the filters are untouched. Each record gets its own
    /// sync request.
    pub fn batch(&mut self, action: BatchAction) -> Result<BatchReport, TriageError> {
        let image_ids = self.visible().ids();
        let change = action.change();
        for id in &image_ids {
            self.set_judgment(*id, change)?;
        }
        tracing::info!(%action, count = image_ids.len(), "Applied batch action");
        Ok(BatchReport { action, image_ids })
    }

    // ========== Sync ==========

    /// Apply every sync outcome that has already arrived.
    pub fn process_completions(&mut self) -> Vec<Resolution> {
        self.sync.process_ready(&mut self.store, &*self.emitter)
    }

    /// Wait for the next sync outcome. `None` when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Resolution> {
        self.sync.next(&mut self.store, &*self.emitter).await
    }

    /// Wait until every outstanding sync has resolved.
    ///
    /// There is no timeout: a request that never completes keeps this
    /// pending.
    pub async fn settle(&mut self) -> Vec<Resolution> {
        let mut resolutions = Vec::new();
        while let Some(resolution) = self.next_completion().await {
            resolutions.push(resolution);
        }
        resolutions
    }

    pub fn pending_syncs(&self) -> usize {
        self.sync.in_flight()
    }

    pub fn sync_status(&self, id: ImageId) -> SyncStatus {
        self.sync.status(id)
    }

    // ========== Detail View & Keyboard ==========

    /// Focus `id` in the detail view.
    pub fn open_detail(&mut self, id: ImageId) -> Result<&ImageRecord, TriageError> {
        let record = self.store.get(id)?;
        self.focused = Some(id);
        Ok(record)
    }

    pub fn close_detail(&mut self) {
        self.focused = None;
    }

    /// Record shown in the detail view, if any.
    pub fn focused(&self) -> Option<&ImageRecord> {
        self.focused.and_then(|id| self.store.get(id).ok())
    }

    /// Translate and apply a key press.
    ///
    /// Returns the command that took effect. Judgment keys without a focused
    /// image and unknown keys do nothing.
    pub fn handle_key(&mut self, key: &str) -> Result<Option<KeyCommand>, TriageError> {
        let Some(command) = KeyCommand::from_key(key) else {
            return Ok(None);
        };

        match command {
            KeyCommand::CloseDetail => self.close_detail(),
            KeyCommand::Rate(rating) => {
                let Some(id) = self.focused else {
                    return Ok(None);
                };
                self.set_judgment(id, JudgmentChange::rating(rating))?;
            }
            KeyCommand::Label(label) => {
                let Some(id) = self.focused else {
                    return Ok(None);
                };
                self.set_label(id, label)?;
            }
        }
        Ok(Some(command))
    }

    // ========== Compare ==========

    pub fn bind(&mut self, panel: Panel, id: ImageId) -> Result<(), TriageError> {
        self.compare.bind(&self.store, panel, id)
    }

    pub fn panel(&self, panel: Panel) -> Option<&ImageRecord> {
        self.compare.panel(&self.store, panel)
    }

    pub fn clear_panel(&mut self, panel: Panel) {
        self.compare.clear(panel);
    }

    pub const fn compare(&self) -> &CompareWorkspace {
        &self.compare
    }

    /// Records labelled `selected`, across the whole store.
    pub fn selected_for_batch(&self) -> Vec<&ImageRecord> {
        compare::selected_for_batch(&self.store)
    }

    // ========== Upload ==========

    pub fn upload_in_progress(&self) -> bool {
        self.uploads.is_busy()
    }

    /// Accept an upload batch, or `None` while another is in flight.
    pub fn begin_upload(&self, files: Vec<UploadFile>) -> Option<PendingUpload> {
        let Some(ticket) = self.uploads.try_acquire() else {
            tracing::debug!(files = files.len(), "Upload already in progress, ignoring");
            return None;
        };
        Some(PendingUpload::new(Arc::clone(&self.port), files, ticket))
    }

    /// Merge a finished upload and report it.
    pub fn finish_upload(&mut self, completion: UploadCompletion) -> UploadSummary {
        upload::apply_upload(&mut self.store, &*self.emitter, completion)
    }

    /// Upload and merge in one step. `None` if another upload is in flight.
    pub async fn upload(&mut self, files: Vec<UploadFile>) -> Option<UploadSummary> {
        let pending = self.begin_upload(files)?;
        let completion = pending.send().await;
        Some(self.finish_upload(completion))
    }

    // ========== Export ==========

    /// Export every `selected` record in the store.
    pub async fn export(&self, kind: ExportKind) -> ExportOutcome {
        export::run_export(&self.store, &*self.port, &*self.emitter, kind).await
    }
}

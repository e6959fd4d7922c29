//! Judgment synchronizer.
//!
//! Local updates are applied to the store first; each one then becomes a
//! [`SyncRequest`] that a spawned task sends to the persistence port. The
//! task reports back a [`SyncOutcome`] on an unbounded channel, which the
//! owning session drains on its own thread of control, so the store is never
//! touched from the spawned tasks.
//!
//! Every request carries the record's judgment version at the time of the
//! update. An outcome whose version no longer matches the store is stale: a
//! newer local change (or a reload) superseded it, so it neither confirms
//! nor reverts anything.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{ImageId, Judgment};
use crate::events::AppEvent;
use crate::ports::{AppEventEmitter, PersistenceError, PersistencePort};
use crate::settings::RollbackPolicy;
use crate::store::{ImageStore, JudgmentUpdate};

/// One outgoing judgment write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncRequest {
    pub image_id: ImageId,
    /// Full judgment sent to the service.
    pub judgment: Judgment,
    /// Judgment held before this update, restored under `Revert`.
    pub previous: Judgment,
    /// Store version produced by this update.
    pub version: u64,
}

impl SyncRequest {
    pub const fn from_update(image_id: ImageId, update: JudgmentUpdate) -> Self {
        Self {
            image_id,
            judgment: update.current,
            previous: update.previous,
            version: update.version,
        }
    }
}

/// Completion of a [`SyncRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub request: SyncRequest,
    pub result: Result<(), PersistenceError>,
}

/// How an outcome was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The service acknowledged the current local value.
    Confirmed,
    /// The outcome belongs to a superseded update and was discarded.
    Stale,
    /// The current value failed to sync and was kept locally.
    Retained,
    /// The current value failed to sync and the previous one was restored.
    Reverted,
}

/// Remote state of one record's judgment as far as this session knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// No write outstanding and the last current write did not fail.
    Synced,
    /// At least one write is in flight.
    Pending,
    /// The latest write failed and nothing newer has been sent.
    Failed,
}

/// Dispatches judgment writes and reconciles their outcomes.
pub struct Synchronizer {
    port: Arc<dyn PersistencePort>,
    policy: RollbackPolicy,
    tx: mpsc::UnboundedSender<SyncOutcome>,
    rx: mpsc::UnboundedReceiver<SyncOutcome>,
    pending: HashMap<ImageId, usize>,
    failed: HashSet<ImageId>,
}

impl Synchronizer {
    pub fn new(port: Arc<dyn PersistencePort>, policy: RollbackPolicy) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            port,
            policy,
            tx,
            rx,
            pending: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    pub const fn policy(&self) -> RollbackPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: RollbackPolicy) {
        self.policy = policy;
    }

    /// Number of writes whose outcome has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.pending.values().sum()
    }

    pub fn status(&self, id: ImageId) -> SyncStatus {
        if self.pending.get(&id).is_some_and(|count| *count > 0) {
            SyncStatus::Pending
        } else if self.failed.contains(&id) {
            SyncStatus::Failed
        } else {
            SyncStatus::Synced
        }
    }

    /// Drop remembered failures, as after a reload from the service.
    pub fn clear_failures(&mut self) {
        self.failed.clear();
    }

    /// Send `request` on a spawned task. Must be called within a Tokio runtime.
    pub fn dispatch(&mut self, request: SyncRequest) {
        *self.pending.entry(request.image_id).or_default() += 1;
        self.failed.remove(&request.image_id);

        tracing::debug!(
            image_id = request.image_id,
            version = request.version,
            rating = %request.judgment.rating,
            label = %request.judgment.label,
            "Dispatching judgment sync"
        );

        let port = Arc::clone(&self.port);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = port
                .save_judgment(request.image_id, request.judgment)
                .await;
            // The receiver lives as long as the synchronizer; a send error
            // means the session is gone and nobody needs the outcome.
            let _ = tx.send(SyncOutcome { request, result });
        });
    }

    /// Apply every outcome that has already arrived, without waiting.
    pub fn process_ready(
        &mut self,
        store: &mut ImageStore,
        emitter: &dyn AppEventEmitter,
    ) -> Vec<Resolution> {
        let mut resolutions = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            resolutions.push(self.apply(store, emitter, outcome));
        }
        resolutions
    }

    /// Wait for the next outcome and apply it.
    ///
    /// Returns `None` immediately when nothing is in flight.
    pub async fn next(
        &mut self,
        store: &mut ImageStore,
        emitter: &dyn AppEventEmitter,
    ) -> Option<Resolution> {
        if self.in_flight() == 0 {
            return None;
        }
        let outcome = self.rx.recv().await?;
        Some(self.apply(store, emitter, outcome))
    }

    /// Apply one outcome to the store.
    pub fn apply(
        &mut self,
        store: &mut ImageStore,
        emitter: &dyn AppEventEmitter,
        outcome: SyncOutcome,
    ) -> Resolution {
        let SyncOutcome { request, result } = outcome;
        let id = request.image_id;

        if let Some(count) = self.pending.get_mut(&id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.pending.remove(&id);
            }
        }

        let is_current = store
            .version(id)
            .is_ok_and(|version| version == request.version);

        match result {
            Ok(()) if is_current => {
                tracing::debug!(image_id = id, version = request.version, "Judgment synced");
                Resolution::Confirmed
            }
            Ok(()) => {
                tracing::debug!(
                    image_id = id,
                    version = request.version,
                    "Discarding stale judgment acknowledgement"
                );
                Resolution::Stale
            }
            Err(e) if !is_current => {
                // A newer write carries the full judgment and supersedes this one.
                tracing::warn!(
                    image_id = id,
                    version = request.version,
                    error = %e,
                    "Superseded judgment sync failed"
                );
                emitter.emit(AppEvent::judgment_sync_failed(id, e.to_string()));
                Resolution::Stale
            }
            Err(e) => {
                tracing::warn!(
                    image_id = id,
                    version = request.version,
                    error = %e,
                    "Judgment sync failed"
                );
                emitter.emit(AppEvent::judgment_sync_failed(id, e.to_string()));

                match self.policy {
                    RollbackPolicy::Retain => {
                        self.failed.insert(id);
                        Resolution::Retained
                    }
                    RollbackPolicy::Revert => self.revert(store, emitter, request),
                }
            }
        }
    }

    fn revert(
        &mut self,
        store: &mut ImageStore,
        emitter: &dyn AppEventEmitter,
        request: SyncRequest,
    ) -> Resolution {
        let previous = request.previous;
        match store.update(request.image_id, |judgment| *judgment = previous) {
            Ok(_) => {
                tracing::info!(image_id = request.image_id, "Reverted judgment after failed sync");
                emitter.emit(AppEvent::JudgmentReverted {
                    image_id: request.image_id,
                    restored: previous,
                });
                Resolution::Reverted
            }
            Err(e) => {
                tracing::warn!(image_id = request.image_id, error = %e, "Cannot revert judgment");
                self.failed.insert(request.image_id);
                Resolution::Retained
            }
        }
    }
}

//! Filter/sort projection of the store into the visible list.
//!
//! [`project`] is a pure function of the store contents and a
//! [`ViewConfig`]. The resulting [`VisibleList`] borrows the store, so it
//! cannot outlive the next mutation; callers recompute instead of caching.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::{ImageId, ImageRecord, Label, SortKey, ViewConfig};
use crate::store::ImageStore;

/// What the UI should show when the visible list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The store itself is empty: show the welcome state.
    NoImages,
    /// The store has records but none pass the filters.
    NoMatches,
    /// At least one record is visible.
    Populated,
}

/// Read-only, ordered view of the records that pass the current filters.
#[derive(Debug, Clone)]
pub struct VisibleList<'a> {
    records: Vec<&'a ImageRecord>,
    store_len: usize,
}

impl<'a> VisibleList<'a> {
    pub fn records(&self) -> &[&'a ImageRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ImageRecord> + '_ {
        self.records.iter().copied()
    }

    /// Visible ids in display order.
    pub fn ids(&self) -> Vec<ImageId> {
        self.records.iter().map(|record| record.id).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: ImageId) -> bool {
        self.records.iter().any(|record| record.id == id)
    }

    pub fn empty_state(&self) -> EmptyState {
        if self.store_len == 0 {
            EmptyState::NoImages
        } else if self.records.is_empty() {
            EmptyState::NoMatches
        } else {
            EmptyState::Populated
        }
    }
}

/// Compute the visible list.
///
/// Keeps records passing every predicate of `config`, then stable-sorts by
/// `config.sort_key`, so ties keep store order.
pub fn project<'a>(store: &'a ImageStore, config: &ViewConfig) -> VisibleList<'a> {
    let mut records: Vec<&ImageRecord> = store.iter().filter(|r| config.matches(r)).collect();
    records.sort_by(|a, b| compare(config.sort_key, a, b));

    VisibleList {
        records,
        store_len: store.len(),
    }
}

fn compare(key: SortKey, a: &ImageRecord, b: &ImageRecord) -> Ordering {
    match key {
        SortKey::Filename => caseless(&a.filename)
            .cmp(caseless(&b.filename))
            .then_with(|| a.filename.cmp(&b.filename)),
        SortKey::Rating => b.rating().cmp(&a.rating()),
        SortKey::QualityScore => b.quality().total_cmp(&a.quality()),
        SortKey::FocusScore => b.focus().total_cmp(&a.focus()),
        SortKey::UploadTimestamp => b.uploaded_at().cmp(&a.uploaded_at()),
    }
}

fn caseless(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars().flat_map(char::to_lowercase)
}

/// Library counters shown alongside the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub total: usize,
    pub selected: usize,
    pub rejected: usize,
    pub review: usize,
    pub unrated: usize,
    pub visible: usize,
}

impl LibraryStats {
    /// Count over the whole store; `visible` is the length of `visible`.
    pub fn collect(store: &ImageStore, visible: &VisibleList<'_>) -> Self {
        store.iter().fold(
            Self {
                total: store.len(),
                visible: visible.len(),
                ..Self::default()
            },
            |mut stats, record| {
                match record.label() {
                    Label::Selected => stats.selected += 1,
                    Label::Rejected => stats.rejected += 1,
                    Label::Review => stats.review += 1,
                    Label::None => {}
                }
                if record.rating().is_unrated() {
                    stats.unrated += 1;
                }
                stats
            },
        )
    }
}

//! The image store: single source of truth for ingested records.
//!
//! Records are keyed by id and iterate in insertion order (newest merges
//! first). Judgment fields change only through [`ImageStore::update`], which
//! stamps the record with a fresh version used to recognise stale
//! acknowledgements. Versions come from one store-wide clock that never
//! resets, so a version is never reused, even across `replace_all`.

use std::collections::HashMap;

use crate::domain::{ImageId, ImageRecord, Judgment, Label};
use crate::error::TriageError;

#[derive(Debug, Clone)]
struct Entry {
    record: ImageRecord,
    version: u64,
}

/// Result of a judgment update: the value before and after, and the
/// record's new version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JudgmentUpdate {
    pub previous: Judgment,
    pub current: Judgment,
    pub version: u64,
}

/// Insertion-ordered mapping from image id to record.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    entries: Vec<Entry>,
    index: HashMap<ImageId, usize>,
    clock: u64,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an initial listing.
    pub fn from_records(records: impl IntoIterator<Item = ImageRecord>) -> Self {
        let mut store = Self::new();
        store.replace_all(records);
        store
    }

    /// Prepend `records` (in the given order) ahead of existing ones.
    ///
    /// An incoming record whose id is already present replaces the old one,
    /// which leaves its previous position. The replacement gets a fresh
    /// version, so outcomes of writes sent for the old record resolve as
    /// stale.
    pub fn merge(&mut self, records: impl IntoIterator<Item = ImageRecord>) {
        let mut incoming: Vec<Entry> = Vec::new();
        let mut seen = HashMap::new();
        for record in records {
            if seen.contains_key(&record.id) {
                tracing::warn!(image_id = record.id, "Duplicate id in merge batch, keeping first");
                continue;
            }
            seen.insert(record.id, incoming.len());
            incoming.push(Entry { record, version: 0 });
        }
        if incoming.is_empty() {
            return;
        }

        let mut retained = Vec::with_capacity(self.entries.len());
        for entry in std::mem::take(&mut self.entries) {
            match seen.get(&entry.record.id) {
                Some(&position) => {
                    self.clock += 1;
                    incoming[position].version = self.clock;
                }
                None => retained.push(entry),
            }
        }

        incoming.extend(retained);
        self.entries = incoming;
        self.reindex();
    }

    /// Replace the entire contents, as for an initial bulk load.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = ImageRecord>) {
        self.entries.clear();
        self.index.clear();
        for record in records {
            if self.index.contains_key(&record.id) {
                tracing::warn!(image_id = record.id, "Duplicate id in listing, keeping first");
                continue;
            }
            self.index.insert(record.id, self.entries.len());
            self.entries.push(Entry { record, version: 0 });
        }
    }

    /// Look up a record.
    pub fn get(&self, id: ImageId) -> Result<&ImageRecord, TriageError> {
        self.entry(id).map(|entry| &entry.record)
    }

    /// Apply a judgment mutation to the record with `id`.
    ///
    /// This is the only path that changes judgment fields. Every call
    /// advances the record's version, including calls that leave the value
    /// unchanged; the last applied update wins.
    pub fn update(
        &mut self,
        id: ImageId,
        mutate: impl FnOnce(&mut Judgment),
    ) -> Result<JudgmentUpdate, TriageError> {
        let position = *self.index.get(&id).ok_or(TriageError::NotFound(id))?;
        let entry = &mut self.entries[position];
        let previous = entry.record.judgment;
        mutate(&mut entry.record.judgment);
        self.clock += 1;
        entry.version = self.clock;
        Ok(JudgmentUpdate {
            previous,
            current: entry.record.judgment,
            version: entry.version,
        })
    }

    /// Current judgment version of a record.
    pub fn version(&self, id: ImageId) -> Result<u64, TriageError> {
        self.entry(id).map(|entry| entry.version)
    }

    pub fn contains(&self, id: ImageId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in store order.
    pub fn iter(&self) -> impl Iterator<Item = &ImageRecord> {
        self.entries.iter().map(|entry| &entry.record)
    }

    /// Ids of every record carrying `label`, in store order.
    pub fn ids_with_label(&self, label: Label) -> Vec<ImageId> {
        self.iter()
            .filter(|record| record.label() == label)
            .map(|record| record.id)
            .collect()
    }

    fn entry(&self, id: ImageId) -> Result<&Entry, TriageError> {
        self.index
            .get(&id)
            .map(|&position| &self.entries[position])
            .ok_or(TriageError::NotFound(id))
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.record.id, position))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rating;

    fn ids(store: &ImageStore) -> Vec<ImageId> {
        store.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_merge_prepends_newest_first() {
        let mut store = ImageStore::from_records([ImageRecord::new(1, "a.jpg")]);
        store.merge([ImageRecord::new(5, "e.jpg"), ImageRecord::new(4, "d.jpg")]);

        assert_eq!(ids(&store), vec![5, 4, 1]);
        assert_eq!(store.get(4).unwrap().filename, "d.jpg");
    }

    #[test]
    fn test_merge_leaves_existing_records_unchanged() {
        let mut store = ImageStore::from_records([ImageRecord::new(1, "a.jpg")]);
        store.update(1, |j| j.label = Label::Selected).unwrap();
        store.merge([ImageRecord::new(2, "b.jpg")]);

        assert_eq!(store.get(1).unwrap().label(), Label::Selected);
        assert_eq!(store.version(1).unwrap(), 1);
    }

    #[test]
    fn test_merge_existing_id_moves_to_front() {
        let mut store =
            ImageStore::from_records([ImageRecord::new(1, "a.jpg"), ImageRecord::new(2, "b.jpg")]);
        store.update(2, |j| j.label = Label::Review).unwrap();
        store.merge([ImageRecord::new(2, "b-reprocessed.jpg")]);

        assert_eq!(ids(&store), vec![2, 1]);
        assert_eq!(store.get(2).unwrap().filename, "b-reprocessed.jpg");
        assert_eq!(store.len(), 2);
        assert_eq!(store.version(2).unwrap(), 2);
    }

    #[test]
    fn test_replace_all_discards_previous_contents() {
        let mut store = ImageStore::from_records([ImageRecord::new(1, "a.jpg")]);
        store.replace_all([ImageRecord::new(9, "z.jpg"), ImageRecord::new(9, "dup.jpg")]);

        assert_eq!(ids(&store), vec![9]);
        assert_eq!(store.get(9).unwrap().filename, "z.jpg");
        assert!(matches!(store.get(1), Err(TriageError::NotFound(1))));
    }

    #[test]
    fn test_update_last_writer_wins() {
        let mut store = ImageStore::from_records([ImageRecord::new(1, "a.jpg")]);
        let three = Rating::new(3).unwrap();
        let five = Rating::new(5).unwrap();

        store.update(1, |j| j.rating = three).unwrap();
        let update = store.update(1, |j| j.rating = five).unwrap();

        assert_eq!(update.previous.rating, three);
        assert_eq!(update.current.rating, five);
        assert_eq!(update.version, 2);
        assert_eq!(store.get(1).unwrap().rating(), five);
    }

    #[test]
    fn test_versions_not_reused_after_reload() {
        let mut store = ImageStore::from_records([ImageRecord::new(1, "a.jpg")]);
        let before = store.update(1, |j| j.label = Label::Review).unwrap();

        store.replace_all([ImageRecord::new(1, "a.jpg")]);
        assert_eq!(store.version(1).unwrap(), 0);

        let after = store.update(1, |j| j.label = Label::Selected).unwrap();
        assert!(after.version > before.version);
    }

    #[test]
    fn test_update_missing_id() {
        let mut store = ImageStore::new();
        let result = store.update(3, |j| j.label = Label::Review);
        assert!(matches!(result, Err(TriageError::NotFound(3))));
    }

    #[test]
    fn test_ids_with_label() {
        let mut store = ImageStore::from_records(
            (1..=4).map(|id| ImageRecord::new(id, format!("{id}.jpg"))),
        );
        store.update(2, |j| j.label = Label::Selected).unwrap();
        store.update(4, |j| j.label = Label::Selected).unwrap();

        assert_eq!(store.ids_with_label(Label::Selected), vec![2, 4]);
    }
}

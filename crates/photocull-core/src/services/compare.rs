//! Side-by-side comparison workspace.

use serde::{Deserialize, Serialize};

use crate::domain::{ImageId, ImageRecord, Label};
use crate::error::TriageError;
use crate::store::ImageStore;

/// One of the two comparison panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Left,
    Right,
}

/// Up to two named pointers into the store.
///
/// Bindings hold ids only; a binding whose record is no longer in the store
/// resolves to nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareWorkspace {
    left: Option<ImageId>,
    right: Option<ImageId>,
}

impl CompareWorkspace {
    pub const fn new() -> Self {
        Self {
            left: None,
            right: None,
        }
    }

    /// Bind `panel` to `image_id`, replacing any prior binding.
    pub fn bind(
        &mut self,
        store: &ImageStore,
        panel: Panel,
        image_id: ImageId,
    ) -> Result<(), TriageError> {
        store.get(image_id)?;
        *self.slot(panel) = Some(image_id);
        tracing::debug!(?panel, image_id, "Bound compare panel");
        Ok(())
    }

    /// Id bound to `panel`, if any.
    pub const fn bound(&self, panel: Panel) -> Option<ImageId> {
        match panel {
            Panel::Left => self.left,
            Panel::Right => self.right,
        }
    }

    /// Record shown in `panel`.
    pub fn panel<'a>(&self, store: &'a ImageStore, panel: Panel) -> Option<&'a ImageRecord> {
        self.bound(panel).and_then(|id| store.get(id).ok())
    }

    pub fn clear(&mut self, panel: Panel) {
        match panel {
            Panel::Left => self.left = None,
            Panel::Right => self.right = None,
        }
    }

    pub fn clear_all(&mut self) {
        self.left = None;
        self.right = None;
    }

    fn slot(&mut self, panel: Panel) -> &mut Option<ImageId> {
        match panel {
            Panel::Left => &mut self.left,
            Panel::Right => &mut self.right,
        }
    }
}

/// Records labelled `selected`, derived from the store at call time.
pub fn selected_for_batch(store: &ImageStore) -> Vec<&ImageRecord> {
    store
        .iter()
        .filter(|record| record.label() == Label::Selected)
        .collect()
}

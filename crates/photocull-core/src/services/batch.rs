//! Batch judgment actions over the visible list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{ImageId, JudgmentChange, Label, Rating};
use crate::error::TriageError;

/// One judgment action applied to every visible record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchAction {
    /// Label everything `selected`.
    Select,
    /// Label everything `rejected`.
    Reject,
    /// Reset rating to 0 and label to `none` in a single update.
    Clear,
}

impl BatchAction {
    pub const ALL: [Self; 3] = [Self::Select, Self::Reject, Self::Clear];

    /// The change applied to each record.
    pub const fn change(self) -> JudgmentChange {
        match self {
            Self::Select => JudgmentChange::label(Label::Selected),
            Self::Reject => JudgmentChange::label(Label::Rejected),
            Self::Clear => JudgmentChange::both(Rating::UNRATED, Label::None),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Reject => "reject",
            Self::Clear => "clear",
        }
    }
}

impl fmt::Display for BatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchAction {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TriageError::InvalidBatchAction(s.to_string()))
    }
}

/// What a batch action touched.
///
/// Each id got its own independent sync request; failures surface per id
/// through the notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub action: BatchAction,
    /// Affected ids, in visible order.
    pub image_ids: Vec<ImageId>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.image_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Judgment;

    #[test]
    fn test_clear_resets_both_fields() {
        let current = Judgment::new(Rating::new(4).unwrap(), Label::Review);
        assert_eq!(BatchAction::Clear.change().resolve(current), Judgment::CLEARED);
    }

    #[test]
    fn test_select_keeps_rating() {
        let current = Judgment::new(Rating::new(2).unwrap(), Label::Rejected);
        let next = BatchAction::Select.change().resolve(current);
        assert_eq!(next.rating.stars(), 2);
        assert_eq!(next.label, Label::Selected);
    }

    #[test]
    fn test_parse_action() {
        assert_eq!("Reject".parse::<BatchAction>().unwrap(), BatchAction::Reject);
        assert!(matches!(
            "delete".parse::<BatchAction>(),
            Err(TriageError::InvalidBatchAction(_))
        ));
    }
}

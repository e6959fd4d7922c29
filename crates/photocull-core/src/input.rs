//! Keyboard shortcut translation.

use serde::{Deserialize, Serialize};

use crate::domain::{Label, Rating};

/// A recognised shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum KeyCommand {
    /// Digits `1`-`5`.
    Rate(Rating),
    /// `g` selects, `r` rejects, `y` marks for review (either case).
    Label(Label),
    /// `Escape`.
    CloseDetail,
}

impl KeyCommand {
    /// Translate a key name as reported by the host toolkit.
    ///
    /// Unrecognised keys (including `0`) map to `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "g" | "G" => Some(Self::Label(Label::Selected)),
            "r" | "R" => Some(Self::Label(Label::Rejected)),
            "y" | "Y" => Some(Self::Label(Label::Review)),
            "Escape" | "Esc" => Some(Self::CloseDetail),
            "1" => Self::rate(1),
            "2" => Self::rate(2),
            "3" => Self::rate(3),
            "4" => Self::rate(4),
            "5" => Self::rate(5),
            _ => None,
        }
    }

    fn rate(stars: u8) -> Option<Self> {
        Rating::new(stars).ok().map(Self::Rate)
    }
}

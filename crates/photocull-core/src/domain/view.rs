//! Filter and sort configuration for the visible list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::image::{ImageRecord, Label, Rating};
use crate::error::TriageError;

/// Rating predicate: everything, or exactly one star count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingFilter {
    #[default]
    All,
    Exactly(Rating),
}

impl RatingFilter {
    pub fn matches(self, record: &ImageRecord) -> bool {
        match self {
            Self::All => true,
            Self::Exactly(rating) => record.rating() == rating,
        }
    }
}

impl FromStr for RatingFilter {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Rating>()
            .map(Self::Exactly)
            .map_err(|_| TriageError::InvalidRatingFilter(s.to_string()))
    }
}

/// Label predicate: everything, or one label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelFilter {
    #[default]
    All,
    Only(Label),
}

impl LabelFilter {
    pub fn matches(self, record: &ImageRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(label) => record.label() == label,
        }
    }
}

impl FromStr for LabelFilter {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Label>().map(Self::Only)
    }
}

/// Ordering of the visible list.
///
/// Numeric keys sort descending (highest first, newest first for the upload
/// timestamp); `Filename` sorts ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Filename,
    Rating,
    QualityScore,
    FocusScore,
    UploadTimestamp,
}

impl SortKey {
    pub const ALL: [Self; 5] = [
        Self::Filename,
        Self::Rating,
        Self::QualityScore,
        Self::FocusScore,
        Self::UploadTimestamp,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Filename => "filename",
            Self::Rating => "rating",
            Self::QualityScore => "quality_score",
            Self::FocusScore => "focus_score",
            Self::UploadTimestamp => "upload_timestamp",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| TriageError::InvalidSortKey(s.to_string()))
    }
}

/// Current filter/sort configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub rating_filter: RatingFilter,
    pub label_filter: LabelFilter,
    /// Minimum focus score (absent scores count as 0).
    pub focus_threshold: u32,
    /// Minimum exposure score (absent scores count as 0).
    pub exposure_threshold: u32,
    pub sort_key: SortKey,
}

impl ViewConfig {
    /// Whether `record` passes every active predicate.
    pub fn matches(&self, record: &ImageRecord) -> bool {
        self.rating_filter.matches(record)
            && self.label_filter.matches(record)
            && record.focus() >= f64::from(self.focus_threshold)
            && record.exposure() >= f64::from(self.exposure_threshold)
    }

    #[must_use]
    pub const fn with_rating_filter(mut self, filter: RatingFilter) -> Self {
        self.rating_filter = filter;
        self
    }

    #[must_use]
    pub const fn with_label_filter(mut self, filter: LabelFilter) -> Self {
        self.label_filter = filter;
        self
    }

    #[must_use]
    pub const fn with_focus_threshold(mut self, threshold: u32) -> Self {
        self.focus_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_exposure_threshold(mut self, threshold: u32) -> Self {
        self.exposure_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_sort_key(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }
}

/// Which workspace layout the UI shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    Compare,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Judgment;

    fn record(focus: f64, exposure: f64, stars: u8, label: Label) -> ImageRecord {
        ImageRecord::new(1, "a.jpg")
            .with_scores(focus, exposure, 50.0)
            .with_judgment(Judgment::new(Rating::new(stars).unwrap(), label))
    }

    #[test]
    fn test_default_config_matches_everything() {
        let config = ViewConfig::default();
        assert!(config.matches(&ImageRecord::new(1, "bare.jpg")));
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let config = ViewConfig::default()
            .with_rating_filter(RatingFilter::Exactly(Rating::new(4).unwrap()))
            .with_label_filter(LabelFilter::Only(Label::Selected))
            .with_focus_threshold(50);

        assert!(config.matches(&record(60.0, 0.0, 4, Label::Selected)));
        assert!(!config.matches(&record(40.0, 0.0, 4, Label::Selected)));
        assert!(!config.matches(&record(60.0, 0.0, 3, Label::Selected)));
        assert!(!config.matches(&record(60.0, 0.0, 4, Label::Review)));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let config = ViewConfig::default().with_exposure_threshold(70);
        assert!(config.matches(&record(0.0, 70.0, 0, Label::None)));
        assert!(!config.matches(&record(0.0, 69.9, 0, Label::None)));
    }

    #[test]
    fn test_unrated_filter_is_not_all() {
        let config = ViewConfig::default().with_rating_filter("0".parse().unwrap());
        assert!(config.matches(&record(0.0, 0.0, 0, Label::None)));
        assert!(!config.matches(&record(0.0, 0.0, 1, Label::None)));
    }

    #[test]
    fn test_parse_filters_and_keys() {
        assert_eq!("all".parse::<RatingFilter>().unwrap(), RatingFilter::All);
        assert!("7".parse::<RatingFilter>().is_err());
        assert_eq!(
            "rejected".parse::<LabelFilter>().unwrap(),
            LabelFilter::Only(Label::Rejected)
        );
        assert_eq!("quality-score".parse::<SortKey>().unwrap(), SortKey::QualityScore);
        assert_eq!("upload_timestamp".parse::<SortKey>().unwrap(), SortKey::UploadTimestamp);
        assert!("size".parse::<SortKey>().is_err());
    }
}

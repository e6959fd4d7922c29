//! Image record domain types.
//!
//! An [`ImageRecord`] is one analysed photograph as the persistence service
//! reports it: quality metrics produced by server-side analysis plus the
//! user's [`Judgment`]. Wire field names follow the service (snake_case).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TriageError;

/// Identity assigned by the persistence service at ingestion.
pub type ImageId = i64;

// ─────────────────────────────────────────────────────────────────────────────
// Judgment Types
// ─────────────────────────────────────────────────────────────────────────────

/// Star rating in `0..=5`, where 0 means unrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Highest star rating.
    pub const MAX: u8 = 5;

    /// The unrated value.
    pub const UNRATED: Self = Self(0);

    /// Create a rating, rejecting values above [`Rating::MAX`].
    pub fn new(stars: u8) -> Result<Self, TriageError> {
        if stars > Self::MAX {
            return Err(TriageError::InvalidRating(i64::from(stars)));
        }
        Ok(Self(stars))
    }

    /// Number of stars.
    pub const fn stars(self) -> u8 {
        self.0
    }

    /// Whether the image has not been rated yet.
    pub const fn is_unrated(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<i64> for Rating {
    type Error = TriageError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|stars| *stars <= Self::MAX)
            .map(Self)
            .ok_or(TriageError::InvalidRating(value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Rating {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| TriageError::InvalidRatingText(s.to_string()))?;
        Self::try_from(value)
    }
}

/// Accept/reject/review label attached to an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// No decision yet.
    #[default]
    None,
    /// Kept for export.
    Selected,
    /// Discarded.
    Rejected,
    /// Needs a second look.
    Review,
}

impl Label {
    /// All labels, in display order.
    pub const ALL: [Self; 4] = [Self::None, Self::Selected, Self::Rejected, Self::Review];

    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Selected => "selected",
            Self::Rejected => "rejected",
            Self::Review => "review",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TriageError::InvalidLabel(s.to_string()))
    }
}

/// The user-settable pair carried on every judgment update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Judgment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: Rating,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: Label,
}

impl Judgment {
    /// Unrated and unlabelled.
    pub const CLEARED: Self = Self {
        rating: Rating::UNRATED,
        label: Label::None,
    };

    pub const fn new(rating: Rating, label: Label) -> Self {
        Self { rating, label }
    }
}

/// A partial judgment change. Unspecified fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JudgmentChange {
    pub rating: Option<Rating>,
    pub label: Option<Label>,
}

impl JudgmentChange {
    /// Change only the rating.
    pub const fn rating(rating: Rating) -> Self {
        Self {
            rating: Some(rating),
            label: None,
        }
    }

    /// Change only the label.
    pub const fn label(label: Label) -> Self {
        Self {
            rating: None,
            label: Some(label),
        }
    }

    /// Set both fields.
    pub const fn both(rating: Rating, label: Label) -> Self {
        Self {
            rating: Some(rating),
            label: Some(label),
        }
    }

    /// Whether the change touches no field.
    pub const fn is_empty(&self) -> bool {
        self.rating.is_none() && self.label.is_none()
    }

    /// Compute the full judgment that results from applying this change.
    pub fn resolve(&self, current: Judgment) -> Judgment {
        Judgment {
            rating: self.rating.unwrap_or(current.rating),
            label: self.label.unwrap_or(current.label),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Image Record
// ─────────────────────────────────────────────────────────────────────────────

/// One tracked image with its metrics and user judgment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Service-assigned identity, immutable once assigned.
    pub id: ImageId,
    /// Display name. Not guaranteed unique.
    pub filename: String,
    /// Name of the file as the user uploaded it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    /// Server-relative thumbnail name, if one was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
    #[serde(default)]
    pub focus_score: Option<f64>,
    #[serde(default)]
    pub exposure_score: Option<f64>,
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub face_count: u32,
    /// Only meaningful when `face_count > 0`, see [`ImageRecord::eyes_open`].
    #[serde(default, rename = "eyes_open", deserialize_with = "flag")]
    pub eyes_open_flag: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perceptual_hash: Option<String>,
    /// Sort key only.
    #[serde(default, with = "timestamp")]
    pub upload_timestamp: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub judgment: Judgment,
    /// Opaque analysis detail (dimensions, per-face detail) for display.
    #[serde(default)]
    pub analysis_data: serde_json::Value,
}

impl ImageRecord {
    /// Create a record with no metrics and no judgment.
    pub fn new(id: ImageId, filename: impl Into<String>) -> Self {
        Self {
            id,
            filename: filename.into(),
            original_filename: None,
            thumbnail_path: None,
            focus_score: None,
            exposure_score: None,
            quality_score: None,
            face_count: 0,
            eyes_open_flag: false,
            perceptual_hash: None,
            upload_timestamp: None,
            judgment: Judgment::default(),
            analysis_data: serde_json::Value::Null,
        }
    }

    /// Set the three quality scores.
    #[must_use]
    pub const fn with_scores(mut self, focus: f64, exposure: f64, quality: f64) -> Self {
        self.focus_score = Some(focus);
        self.exposure_score = Some(exposure);
        self.quality_score = Some(quality);
        self
    }

    /// Set the face analysis summary.
    #[must_use]
    pub const fn with_faces(mut self, face_count: u32, eyes_open: bool) -> Self {
        self.face_count = face_count;
        self.eyes_open_flag = eyes_open;
        self
    }

    #[must_use]
    pub const fn with_judgment(mut self, judgment: Judgment) -> Self {
        self.judgment = judgment;
        self
    }

    #[must_use]
    pub const fn with_upload_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.upload_timestamp = Some(at);
        self
    }

    pub const fn rating(&self) -> Rating {
        self.judgment.rating
    }

    pub const fn label(&self) -> Label {
        self.judgment.label
    }

    /// Focus score with absent treated as 0.
    pub fn focus(&self) -> f64 {
        self.focus_score.unwrap_or(0.0)
    }

    /// Exposure score with absent treated as 0.
    pub fn exposure(&self) -> f64 {
        self.exposure_score.unwrap_or(0.0)
    }

    /// Quality score with absent treated as 0.
    pub fn quality(&self) -> f64 {
        self.quality_score.unwrap_or(0.0)
    }

    /// Upload time with absent treated as the Unix epoch.
    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.upload_timestamp.unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Eyes-open verdict, `None` when no face was detected.
    pub const fn eyes_open(&self) -> Option<bool> {
        if self.face_count > 0 {
            Some(self.eyes_open_flag)
        } else {
            None
        }
    }

    /// Pixel dimensions from the analysis detail, if reported.
    pub fn dimensions(&self) -> Option<(u64, u64)> {
        let dims = self.analysis_data.get("image_dimensions")?;
        Some((dims.get("width")?.as_u64()?, dims.get("height")?.as_u64()?))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Coarse quality bucket used for score badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Good,
    Medium,
    Poor,
}

impl QualityTier {
    /// Classify a score: above 80 is good, above 60 medium, anything else
    /// (including absent or zero) poor.
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s > 80.0 => Self::Good,
            Some(s) if s > 60.0 => Self::Medium,
            _ => Self::Poor,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Medium => "medium",
            Self::Poor => "poor",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// SQLite hands booleans back as 0/1, the upload endpoint as JSON booleans.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(i)) => i != 0,
        None => false,
    })
}

/// Parse a service timestamp: RFC 3339, or SQLite's `YYYY-MM-DD HH:MM:SS`
/// which is UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(at) => serializer.serialize_some(&at.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let parsed = super::parse_timestamp(&raw);
        if parsed.is_none() {
            tracing::warn!(timestamp = %raw, "Unparseable upload timestamp, sorting as epoch");
        }
        Ok(parsed)
    }
}

//! Domain types for the triage workspace.
//!
//! These types are independent of any transport or UI concerns.

mod image;
mod sample;
mod view;

pub use image::{
    ImageId, ImageRecord, Judgment, JudgmentChange, Label, QualityTier, Rating, parse_timestamp,
};
pub use sample::sample_images;
pub use view::{LabelFilter, RatingFilter, SortKey, ViewConfig, ViewMode};

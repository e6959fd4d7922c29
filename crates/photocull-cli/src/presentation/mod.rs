//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: no domain transforms. Filtering and
//! ordering come from the core projector.

pub mod image_display;
pub mod tables;

// Re-export commonly used items
pub use image_display::{
    describe_key_command, format_stars, print_image_table, print_notifications, print_stats,
};
pub use tables::{format_optional, format_score, print_separator, truncate_string};

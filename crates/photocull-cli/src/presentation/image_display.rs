//! Display helpers for image records, library stats and notifications.

use chrono::{DateTime, Utc};
use photocull_core::{
    AppEvent, EmptyState, ImageRecord, KeyCommand, Label, LibraryStats, NotificationLevel,
    QualityTier, Rating,
};

use super::tables::{format_score, print_separator, truncate_string};

/// Stars as `***..` (filled then empty), or `-` when unrated.
pub fn format_stars(rating: Rating) -> String {
    if rating.is_unrated() {
        return "-".to_string();
    }
    let filled = usize::from(rating.stars());
    let empty = usize::from(Rating::MAX) - filled;
    format!("{}{}", "*".repeat(filled), ".".repeat(empty))
}

fn format_label(label: Label) -> &'static str {
    match label {
        Label::None => "--",
        other => other.as_str(),
    }
}

fn format_uploaded(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| "--".to_string(), |at| at.format("%Y-%m-%d %H:%M").to_string())
}

fn format_eyes(record: &ImageRecord) -> &'static str {
    match record.eyes_open() {
        Some(true) => "open",
        Some(false) => "closed",
        None => "--",
    }
}

/// Print records in the order given, with a message for an empty list.
pub fn print_image_table<'a>(
    records: impl IntoIterator<Item = &'a ImageRecord>,
    empty: EmptyState,
) {
    match empty {
        EmptyState::NoImages => {
            println!("No images yet.");
            println!("Use 'photocull upload <files>' to analyse your first photos.");
            return;
        }
        EmptyState::NoMatches => {
            println!("No images match the current filters.");
            return;
        }
        EmptyState::Populated => {}
    }

    println!(
        "{:<5} {:<30} {:<6} {:<9} {:<6} {:<6} {:<14} {:<6} {:<7} Uploaded",
        "ID", "Filename", "Stars", "Label", "Focus", "Expo", "Quality", "Faces", "Eyes"
    );
    print_separator(110);

    for record in records {
        let tier = QualityTier::from_score(record.quality_score);
        println!(
            "{:<5} {:<30} {:<6} {:<9} {:<6} {:<6} {:<14} {:<6} {:<7} {}",
            record.id,
            truncate_string(&record.filename, 29),
            format_stars(record.rating()),
            format_label(record.label()),
            format_score(record.focus_score),
            format_score(record.exposure_score),
            format!("{} ({})", format_score(record.quality_score), tier.as_str()),
            record.face_count,
            format_eyes(record),
            format_uploaded(record.upload_timestamp),
        );
    }
}

/// Print library counters.
pub fn print_stats(stats: &LibraryStats) {
    println!("Total:    {}", stats.total);
    println!("Visible:  {}", stats.visible);
    println!("Selected: {}", stats.selected);
    println!("Rejected: {}", stats.rejected);
    println!("Review:   {}", stats.review);
    println!("Unrated:  {}", stats.unrated);
}

/// One-line description of a key command that took effect.
pub fn describe_key_command(command: KeyCommand) -> String {
    match command {
        KeyCommand::Rate(rating) => format!("rated {rating} star(s)"),
        KeyCommand::Label(label) => format!("labelled {label}"),
        KeyCommand::CloseDetail => "closed detail view".to_string(),
    }
}

fn level_tag(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Info => "info",
        NotificationLevel::Warning => "warn",
        NotificationLevel::Error => "error",
    }
}

/// Print queued notifications; errors and warnings go to stderr.
pub fn print_notifications(events: &[AppEvent]) {
    for event in events {
        let level = event.level();
        let line = format!("[{}] {}", level_tag(level), event.message());
        match level {
            NotificationLevel::Warning | NotificationLevel::Error => eprintln!("{line}"),
            NotificationLevel::Success | NotificationLevel::Info => println!("{line}"),
        }
        if let AppEvent::UploadErrors { errors, .. } = event {
            for failure in errors {
                eprintln!("    {}: {}", failure.filename, failure.error);
            }
        }
    }
}

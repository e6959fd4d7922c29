//! Subcommands and their shared argument groups.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use photocull_core::{
    BatchAction, ExportKind, ImageId, Label, LabelFilter, RatingFilter, SortKey, ViewConfig,
};

/// Available commands.
///
/// Every command that changes a judgment waits for the server to answer
/// before exiting and prints the resulting notifications.
#[derive(Subcommand)]
pub enum Commands {
    /// List the images that pass the filters, in sort order
    List {
        #[command(flatten)]
        view: ViewArgs,
        /// Print the visible records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show label and rating counts for the library
    Stats {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Set the star rating of one image (0 clears it)
    Rate {
        /// Image ID
        id: ImageId,
        /// Stars, 0-5
        stars: u8,
    },

    /// Set the label of one image
    Label {
        /// Image ID
        id: ImageId,
        /// none, selected, rejected or review
        label: Label,
    },

    /// Replay keyboard shortcuts against the detail view of one image
    ///
    /// 1-5 rate, g selects, r rejects, y marks for review, Escape closes
    /// the detail view.
    Keys {
        /// Image ID to open in the detail view
        id: ImageId,
        /// Keys to press, in order
        #[arg(required = true, allow_hyphen_values = true)]
        keys: Vec<String>,
    },

    /// Apply one judgment to every image that passes the filters
    Batch {
        /// select, reject or clear
        action: BatchAction,
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Upload images for analysis
    Upload {
        /// Image files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Export every image labelled selected
    Export {
        /// Export type: csv, copy or zip
        #[arg(short, long, default_value = "csv")]
        kind: ExportKind,
    },

    /// Show the built-in demonstration images (no server needed)
    Sample {
        #[command(flatten)]
        view: ViewArgs,
    },
}

/// Filter and sort options shared by the listing commands.
#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Rating filter: all or 0-5
    #[arg(long, default_value = "all")]
    pub rating: RatingFilter,

    /// Label filter: all, none, selected, rejected or review
    #[arg(long, default_value = "all")]
    pub label: LabelFilter,

    /// Minimum focus score
    #[arg(long, default_value_t = 0)]
    pub min_focus: u32,

    /// Minimum exposure score
    #[arg(long, default_value_t = 0)]
    pub min_exposure: u32,

    /// Sort key: filename, rating, quality_score, focus_score or upload_timestamp
    #[arg(long)]
    pub sort: Option<SortKey>,
}

impl ViewArgs {
    /// Apply the options on top of `base`, keeping its sort key when none
    /// was given.
    pub fn apply(&self, base: ViewConfig) -> ViewConfig {
        base.with_rating_filter(self.rating)
            .with_label_filter(self.label)
            .with_focus_threshold(self.min_focus)
            .with_exposure_threshold(self.min_exposure)
            .with_sort_key(self.sort.unwrap_or(base.sort_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;
    use photocull_core::Rating;

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["photocull"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv).command.unwrap()
    }

    #[test]
    fn test_list_view_args() {
        let Commands::List { view, json } = parse(&[
            "list",
            "--rating",
            "4",
            "--label",
            "selected",
            "--min-focus",
            "50",
            "--sort",
            "quality-score",
        ]) else {
            panic!("expected list");
        };

        assert!(!json);
        let config = view.apply(ViewConfig::default());
        assert_eq!(config.rating_filter, RatingFilter::Exactly(Rating::new(4).unwrap()));
        assert_eq!(config.label_filter, LabelFilter::Only(Label::Selected));
        assert_eq!(config.focus_threshold, 50);
        assert_eq!(config.exposure_threshold, 0);
        assert_eq!(config.sort_key, SortKey::QualityScore);
    }

    #[test]
    fn test_view_args_keep_base_sort() {
        let base = ViewConfig::default().with_sort_key(SortKey::UploadTimestamp);
        let config = ViewArgs::default().apply(base);
        assert_eq!(config.sort_key, SortKey::UploadTimestamp);
    }

    #[test]
    fn test_batch_and_export_parse() {
        assert!(matches!(
            parse(&["batch", "clear", "--label", "review"]),
            Commands::Batch {
                action: BatchAction::Clear,
                ..
            }
        ));
        assert!(matches!(
            parse(&["export", "--kind", "zip"]),
            Commands::Export {
                kind: ExportKind::Zip
            }
        ));
    }

    #[test]
    fn test_invalid_label_rejected() {
        let result = Cli::try_parse_from(["photocull", "label", "3", "maybe"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_keys_accept_escape() {
        let Commands::Keys { id, keys } = parse(&["keys", "7", "3", "g", "Escape"]) else {
            panic!("expected keys");
        };
        assert_eq!(id, 7);
        assert_eq!(keys, vec!["3", "g", "Escape"]);
    }
}

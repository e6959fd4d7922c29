//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::{Parser, ValueEnum};
use photocull_core::RollbackPolicy;

use crate::commands::Commands;

/// Default API root of a locally running photocull server.
pub const DEFAULT_SERVER: &str = "http://localhost:5000/api/";

/// Command-line interface for triaging photos on a photocull server.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "photocull")]
#[command(about = "Rate, label and export photos analysed by a photocull server")]
#[command(version)]
pub struct Cli {
    /// API root of the photocull server
    #[arg(long, global = true, env = "PHOTOCULL_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Give up on a request after this many seconds (no limit by default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// What to do with a local change the server failed to save
    #[arg(long, global = true, value_enum, default_value_t = RollbackArg::Retain)]
    pub rollback: RollbackArg,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Command-line spelling of [`RollbackPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RollbackArg {
    /// Keep the local change and report the failure
    Retain,
    /// Restore the previous judgment
    Revert,
}

impl From<RollbackArg> for RollbackPolicy {
    fn from(arg: RollbackArg) -> Self {
        match arg {
            RollbackArg::Retain => Self::Retain,
            RollbackArg::Revert => Self::Revert,
        }
    }
}

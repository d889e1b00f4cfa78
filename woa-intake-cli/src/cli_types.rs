//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use woa_intake_lib::PathSettings;

#[derive(Parser)]
#[command(name = "woa-intake")]
#[command(
    about = "Turn game compatibility form submissions into catalog entries and user reports",
    long_about = None
)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Path overrides. Anything left unset comes from the settings file.
#[derive(Args, Clone, Default)]
pub(crate) struct PathArgs {
    /// Submission CSV (rewritten in place as rows are processed)
    #[arg(long, global = true)]
    pub table: Option<PathBuf>,

    /// Directory holding one <slug>.md per game
    #[arg(long, global = true)]
    pub catalog_dir: Option<PathBuf>,

    /// Directory holding <slug>_NNNN.md user reports
    #[arg(long, global = true)]
    pub reports_dir: Option<PathBuf>,
}

impl PathArgs {
    pub fn to_settings(&self) -> PathSettings {
        PathSettings {
            table: self.table.clone(),
            catalog_dir: self.catalog_dir.clone(),
            reports_dir: self.reports_dir.clone(),
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Process every unprocessed submission in the table
    Process {
        /// Stop after this many submissions
        #[arg(short, long)]
        limit: Option<usize>,

        /// Show what would be written without writing files or marking rows
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// List unprocessed submissions without touching anything
    Pending,

    /// Show how a title matches against the catalog
    Match {
        /// Game title as it would appear in a submission
        title: String,
    },

    /// Print the file slug for a game title
    Slug {
        /// Game title
        title: String,
    },

    /// Inspect path configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved paths and where each one came from
    Show,

    /// Print the settings file path
    Path,
}

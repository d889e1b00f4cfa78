use thiserror::Error;

use woa_intake_catalog::DocumentError;

use crate::table::RowId;

/// Errors reading or writing the submission table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{0} has no header row")]
    Empty(String),
}

/// Errors from the operator-facing chooser.
#[derive(Debug, Error)]
pub enum ChooserError {
    #[error("I/O error while prompting: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended before the operator answered.
    #[error("Input closed before a choice was made")]
    Aborted,
}

/// An out-of-range menu choice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Choice {choice} is out of range (expected 1..={max})")]
pub struct SelectionError {
    pub choice: usize,
    pub max: usize,
}

/// Errors turning a match result into a decision.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Chooser(#[from] ChooserError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Custom game title is empty")]
    EmptyTitle,
}

/// Errors resolving paths from CLI flags and the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    /// A required path was neither passed on the command line nor saved.
    #[error("No {0} configured (pass --{1} or set paths.{0} in the settings file)")]
    Missing(&'static str, &'static str),
}

/// Errors that stop a batch run.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Row {row}: {source}")]
    Resolve { row: RowId, source: ResolveError },

    /// The table couldn't be saved after a row's document was written.
    #[error("Failed to save the table after row {row}: {source}")]
    Persist { row: RowId, source: TableError },
}

use thiserror::Error;

use woa_intake_catalog::DocumentError;
use woa_intake_lib::{IntakeError, SettingsError, TableError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Missing or unreadable path configuration
    #[error("Config error: {0}")]
    Config(#[from] SettingsError),

    /// A batch run stopped
    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// The submission table couldn't be read
    #[error(transparent)]
    Table(#[from] TableError),

    /// The catalog couldn't be read
    #[error(transparent)]
    Document(#[from] DocumentError),
}

pub(crate) mod config;
pub(crate) mod lookup;
pub(crate) mod pending;
pub(crate) mod process;

use woa_intake_lib::{IntakeConfig, PathSettings};

use crate::error::CliError;

/// Command-line paths, with gaps filled from the settings file.
pub(crate) fn resolve_settings(flags: &PathSettings) -> Result<PathSettings, CliError> {
    Ok(flags.clone().or(PathSettings::load()?))
}

/// All three paths, or an error naming the first one missing.
pub(crate) fn resolve_config(flags: &PathSettings) -> Result<IntakeConfig, CliError> {
    Ok(IntakeConfig::from_settings(&resolve_settings(flags)?)?)
}

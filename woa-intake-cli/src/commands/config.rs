use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use woa_intake_lib::PathSettings;
use woa_intake_lib::settings::settings_path;

use crate::error::CliError;

/// Show each path and whether it came from a flag or the settings file.
pub(crate) fn run_config_show(flags: &PathSettings) -> Result<(), CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "woa-intake Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        if path.exists() {
            "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()).to_string()
        },
    );
    log::info!("");

    let saved = PathSettings::load()?;
    let fields: [(&str, &Option<PathBuf>, &Option<PathBuf>); 3] = [
        ("table", &flags.table, &saved.table),
        ("catalog_dir", &flags.catalog_dir, &saved.catalog_dir),
        ("reports_dir", &flags.reports_dir, &saved.reports_dir),
    ];

    for (name, flag, saved) in fields {
        let (value, source) = match (flag, saved) {
            (Some(v), _) => (Some(v), "flag"),
            (None, Some(v)) => (Some(v), "settings file"),
            (None, None) => (None, "missing"),
        };
        let source = format!("({})", source);
        match value {
            Some(v) => log::info!(
                "  {} {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                v.display(),
                source.if_supports_color(Stdout, |t| t.dimmed()),
            ),
            None => log::info!(
                "  {} {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                "not set".if_supports_color(Stdout, |t| t.yellow()),
                source.if_supports_color(Stdout, |t| t.dimmed()),
            ),
        }
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

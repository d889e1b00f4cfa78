use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use woa_intake_catalog::{CatalogStore, slugify};
use woa_intake_lib::{MatchState, PathSettings, match_title};

use crate::error::CliError;

/// Show the exact hit or ranked candidates for `title`.
pub(crate) fn run_match(flags: &PathSettings, title: &str) -> Result<(), CliError> {
    let settings = super::resolve_settings(flags)?;
    let catalog = CatalogStore::new(settings.require_catalog_dir()?);
    let entries = catalog.entries()?;
    log::debug!(
        "{} catalog entries in {}",
        entries.len(),
        catalog.root().display()
    );

    let result = match_title(title, &entries).with_display_names(&entries);
    match result.state() {
        MatchState::Exact(entry) => {
            log::info!(
                "{} Exact match: {} {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                entry.title.if_supports_color(Stdout, |t| t.bold()),
                entry.path.display().if_supports_color(Stdout, |t| t.cyan()),
            );
        }
        MatchState::Fuzzy(candidates) => {
            log::info!("Close matches for '{}':", title);
            for (i, c) in candidates.iter().enumerate() {
                log::info!(
                    "  {}. {} {} {}",
                    i + 1,
                    c.title.if_supports_color(Stdout, |t| t.bold()),
                    format!("[{}]", c.slug).if_supports_color(Stdout, |t| t.cyan()),
                    format!("{:.3}", c.score).if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
        MatchState::None => {
            log::info!(
                "No close matches for '{}' among {} catalog entries",
                title,
                entries.len(),
            );
        }
    }
    Ok(())
}

pub(crate) fn run_slug(title: &str) {
    log::info!("{}", slugify(title));
}

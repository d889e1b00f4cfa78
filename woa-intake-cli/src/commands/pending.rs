use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use woa_intake_lib::{PathSettings, SourceTable, pending_rows};

use crate::error::CliError;

/// List what `process` would walk over.
pub(crate) fn run_pending(flags: &PathSettings) -> Result<(), CliError> {
    let settings = super::resolve_settings(flags)?;
    let path = settings.require_table()?;
    let table = SourceTable::load(&path)?;
    let rows = pending_rows(&table);

    if rows.is_empty() {
        log::info!("No unprocessed rows in {}", path.display());
        return Ok(());
    }

    let submissions = rows.iter().filter(|r| !r.stranded).count();
    log::info!(
        "{} unprocessed submission(s) in {}",
        submissions,
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("");

    for pending in &rows {
        let row = pending.row.to_string();
        if pending.stranded {
            log::info!(
                "  {:>5}  {}",
                row,
                "(no key, will be skipped)".if_supports_color(Stdout, |t| t.yellow()),
            );
        } else if pending.continuations > 0 {
            log::info!(
                "  {:>5}  {} {}",
                row,
                pending.title,
                format!("(+{} continuation row(s))", pending.continuations)
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
        } else {
            log::info!("  {:>5}  {}", row, pending.title);
        }
    }
    Ok(())
}

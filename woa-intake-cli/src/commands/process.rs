use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use woa_intake_lib::{
    BatchSummary, Decision, IntakeOptions, IntakeProgress, PathSettings, run_intake,
};

use crate::console::ConsoleChooser;
use crate::error::CliError;

/// Process every unprocessed submission, prompting when a title is ambiguous.
pub(crate) fn run_process(
    flags: &PathSettings,
    limit: Option<usize>,
    dry_run: bool,
) -> Result<(), CliError> {
    let config = super::resolve_config(flags)?;
    log::debug!("Table:   {}", config.table.display());
    log::debug!("Catalog: {}", config.catalog_dir.display());
    log::debug!("Reports: {}", config.reports_dir.display());

    if dry_run {
        log::info!(
            "{}",
            "Dry run: no files will be written and no rows marked"
                .if_supports_color(Stdout, |t| t.yellow()),
        );
    }

    let options = IntakeOptions { limit, dry_run };
    let mut chooser = ConsoleChooser::stdio();
    let summary = run_intake(&config, &mut chooser, &options, &|event| {
        print_progress(event, dry_run)
    })?;

    print_summary(&summary, dry_run);
    Ok(())
}

fn print_progress(event: IntakeProgress, dry_run: bool) {
    match event {
        IntakeProgress::Started { pending } => {
            log::info!("{} unprocessed row(s)", pending);
        }
        IntakeProgress::Row {
            row,
            title,
            absorbed,
        } => {
            log::info!("");
            if absorbed > 0 {
                log::info!(
                    "Row {}: {} {}",
                    row,
                    title.if_supports_color(Stdout, |t| t.bold()),
                    format!("(+{} continuation row(s))", absorbed)
                        .if_supports_color(Stdout, |t| t.dimmed()),
                );
            } else {
                log::info!(
                    "Row {}: {}",
                    row,
                    title.if_supports_color(Stdout, |t| t.bold()),
                );
            }
        }
        IntakeProgress::Selected { decision, .. } => match decision {
            Decision::Existing { title, slug } => {
                log::debug!("  Existing game '{}' ({})", title, slug);
            }
            Decision::New { title } => log::debug!("  New game '{}'", title),
        },
        IntakeProgress::Document { document, .. } => {
            let verb = if dry_run { "Would write" } else { "Wrote" };
            log::info!(
                "  {} {} {}: {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                verb,
                document.kind,
                document.path.display().if_supports_color(Stdout, |t| t.cyan()),
            );
        }
        IntakeProgress::Saved { row } => log::debug!("  Marked row {} processed", row),
        IntakeProgress::Stranded { .. } | IntakeProgress::Done => {}
    }
}

fn print_summary(summary: &BatchSummary, dry_run: bool) {
    log::info!("");
    if summary.rows == 0 {
        log::info!("Nothing to process.");
    } else {
        log::info!(
            "{} {} submission(s){}: {} new game(s), {} report(s)",
            if dry_run { "Checked" } else { "Processed" },
            summary.rows,
            if summary.absorbed > 0 {
                format!(" ({} continuation row(s) merged)", summary.absorbed)
            } else {
                String::new()
            },
            summary.catalog_entries,
            summary.reports,
        );
    }

    if !summary.stranded.is_empty() {
        let rows: Vec<String> = summary.stranded.iter().map(|r| r.to_string()).collect();
        log::warn!(
            "{} {} row(s) left unprocessed: {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            rows.len(),
            rows.join(", "),
        );
    }
}

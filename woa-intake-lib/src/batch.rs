//! The batch driver: every unprocessed row, one document each, persisted as it goes.
//!
//! For each primary row the driver normalizes it, absorbs its continuation
//! rows, matches and resolves its title, writes one document, then marks the
//! row and everything it absorbed as processed and saves the table. Saving
//! after every row keeps finished rows marked if a later row fails.

use std::path::PathBuf;

use woa_intake_catalog::{CatalogEntry, CatalogStore, ReportStore, slugify};

use crate::aggregate::{collect_continuations, merge_details};
use crate::error::IntakeError;
use crate::matcher::match_title;
use crate::normalize::{columns, normalize};
use crate::resolve::{Chooser, Decision, resolve};
use crate::settings::IntakeConfig;
use crate::table::{RowId, SourceTable};
use crate::writer::{DocumentKind, WrittenDocument, plan_document, write_document};

/// Knobs for a batch run.
#[derive(Debug, Clone, Default)]
pub struct IntakeOptions {
    /// Stop after this many primary rows.
    pub limit: Option<usize>,
    /// Resolve decisions and report target paths without writing anything.
    pub dry_run: bool,
}

/// Progress events, for the CLI to render.
#[derive(Debug, Clone)]
pub enum IntakeProgress {
    /// The run is starting with this many unprocessed rows.
    Started { pending: usize },
    /// A primary row is being handled.
    Row {
        row: RowId,
        title: String,
        absorbed: usize,
    },
    /// The row's title was resolved.
    Selected { row: RowId, decision: Decision },
    /// A document was written (or would be, in a dry run).
    Document { row: RowId, document: WrittenDocument },
    /// The table was saved with the row marked.
    Saved { row: RowId },
    /// A keyless row that isn't a continuation was left alone.
    Stranded { row: RowId },
    Done,
}

/// What a batch run did.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Primary rows handled.
    pub rows: usize,
    /// Continuation rows absorbed into them.
    pub absorbed: usize,
    pub catalog_entries: usize,
    pub reports: usize,
    /// Keyless rows skipped and left unprocessed.
    pub stranded: Vec<RowId>,
    /// Every document path, in order.
    pub documents: Vec<PathBuf>,
}

/// Runs the intake pipeline over a table.
pub struct BatchDriver<'a> {
    catalog: CatalogStore,
    reports: ReportStore,
    chooser: &'a mut dyn Chooser,
}

impl<'a> BatchDriver<'a> {
    pub fn new(config: &IntakeConfig, chooser: &'a mut dyn Chooser) -> Self {
        Self {
            catalog: CatalogStore::new(&config.catalog_dir),
            reports: ReportStore::new(&config.reports_dir),
            chooser,
        }
    }

    /// Process every unprocessed row of `table`.
    ///
    /// Stops at the first error. Rows finished before it stay marked on disk.
    pub fn run(
        &mut self,
        table: &mut SourceTable,
        options: &IntakeOptions,
        progress: &dyn Fn(IntakeProgress),
    ) -> Result<BatchSummary, IntakeError> {
        let pending = table.unprocessed();
        progress(IntakeProgress::Started {
            pending: pending.len(),
        });

        let mut summary = BatchSummary::default();
        // Catalog entries a dry run would have created, matched like real ones.
        let mut planned: Vec<CatalogEntry> = Vec::new();
        let mut position = 0;

        while position < pending.len() {
            if options.limit.is_some_and(|limit| summary.rows >= limit) {
                log::debug!("Row limit reached, stopping");
                break;
            }

            let row_id = pending[position];
            let row = table.row(row_id);
            if row.key().is_empty() {
                log::warn!(
                    "Row {row_id} has no {} and no preceding submission, leaving it unprocessed",
                    table.headers().get(0).unwrap_or("key"),
                );
                summary.stranded.push(row_id);
                progress(IntakeProgress::Stranded { row: row_id });
                position += 1;
                continue;
            }

            let mut report = normalize(&row);
            let continuation = collect_continuations(table, &pending, position);
            report.compatibility_details =
                merge_details(&report.compatibility_details, &continuation.details);

            progress(IntakeProgress::Row {
                row: row_id,
                title: report.game_name.clone(),
                absorbed: continuation.len(),
            });

            let mut entries = self.catalog.entries()?;
            entries.extend(planned.iter().cloned());
            let matched =
                match_title(&report.game_name, &entries).with_display_names(&entries);
            let decision = resolve(&report.game_name, &matched, &mut *self.chooser)
                .map_err(|source| IntakeError::Resolve {
                    row: row_id,
                    source,
                })?;
            progress(IntakeProgress::Selected {
                row: row_id,
                decision: decision.clone(),
            });

            let document = if options.dry_run {
                let document =
                    plan_document(&decision, &self.catalog, &self.reports, &summary.documents)?;
                if let Decision::New { title } = &decision {
                    planned.push(CatalogEntry {
                        slug: slugify(title),
                        title: title.clone(),
                        path: document.path.clone(),
                    });
                }
                document
            } else {
                write_document(&decision, &report, &self.catalog, &self.reports)?
            };
            match document.kind {
                DocumentKind::CatalogEntry => summary.catalog_entries += 1,
                DocumentKind::Report => summary.reports += 1,
            }
            summary.documents.push(document.path.clone());
            progress(IntakeProgress::Document {
                row: row_id,
                document,
            });

            if !options.dry_run {
                let mut done = Vec::with_capacity(1 + continuation.len());
                done.push(row_id);
                done.extend_from_slice(&continuation.absorbed);
                table.mark_processed(&done);
                table.save().map_err(|source| IntakeError::Persist {
                    row: row_id,
                    source,
                })?;
                progress(IntakeProgress::Saved { row: row_id });
            }

            summary.rows += 1;
            summary.absorbed += continuation.len();
            position += 1 + continuation.len();
        }

        progress(IntakeProgress::Done);
        Ok(summary)
    }
}

/// Load the configured table and run the driver over it.
///
/// An unreadable table fails before any row is touched.
pub fn run_intake(
    config: &IntakeConfig,
    chooser: &mut dyn Chooser,
    options: &IntakeOptions,
    progress: &dyn Fn(IntakeProgress),
) -> Result<BatchSummary, IntakeError> {
    let mut table = SourceTable::load(&config.table)?;
    log::debug!(
        "Loaded {} rows from {}",
        table.len(),
        config.table.display()
    );
    BatchDriver::new(config, chooser).run(&mut table, options, progress)
}

/// An unprocessed primary row (or stranded row), as the driver would see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRow {
    pub row: RowId,
    pub title: String,
    /// Continuation rows that would be absorbed.
    pub continuations: usize,
    /// Keyless row that the driver would skip.
    pub stranded: bool,
}

/// List what a run would walk over, without resolving or writing anything.
pub fn pending_rows(table: &SourceTable) -> Vec<PendingRow> {
    let pending = table.unprocessed();
    let mut rows = Vec::new();
    let mut position = 0;
    while position < pending.len() {
        let id = pending[position];
        let row = table.row(id);
        if row.key().is_empty() {
            rows.push(PendingRow {
                row: id,
                title: String::new(),
                continuations: 0,
                stranded: true,
            });
            position += 1;
            continue;
        }
        let continuation = collect_continuations(table, &pending, position);
        rows.push(PendingRow {
            row: id,
            title: row.get(columns::GAME_NAME).to_string(),
            continuations: continuation.len(),
            stranded: false,
        });
        position += 1 + continuation.len();
    }
    rows
}

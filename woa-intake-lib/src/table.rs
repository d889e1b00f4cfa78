//! The submission table: a CSV export with a `Processed` marker column.
//!
//! The whole file is held in memory. Markers are applied as a batch of row
//! ids and the file is rewritten in place (via a temp file and rename).

use std::fmt;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::error::TableError;
use crate::normalize::columns;

/// Index of a data row (0-based, header excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(pub usize);

impl fmt::Display for RowId {
    /// Rows are shown 1-based, matching a spreadsheet view without the header.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

/// Value written into the `Processed` column.
pub const PROCESSED_MARKER: &str = "1";

/// An in-memory copy of the submission table.
#[derive(Debug, Clone)]
pub struct SourceTable {
    path: PathBuf,
    headers: StringRecord,
    rows: Vec<StringRecord>,
    processed_col: usize,
}

impl SourceTable {
    /// Read the table at `path`.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let contents = std::fs::read_to_string(path).map_err(|e| TableError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(path, &contents)
    }

    /// Parse CSV `contents` as the table that lives at `path`.
    ///
    /// Short rows are padded to the header width. A missing `Processed`
    /// column is appended, leaving every row unprocessed.
    pub fn parse(path: &Path, contents: &str) -> Result<Self, TableError> {
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
        let csv_err = |source| TableError::Csv {
            path: path.display().to_string(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(contents.as_bytes());

        let mut headers = reader.headers().map_err(csv_err)?.clone();
        if headers.is_empty() {
            return Err(TableError::Empty(path.display().to_string()));
        }

        let processed_col = match headers.iter().position(|h| h == columns::PROCESSED) {
            Some(i) => i,
            None => {
                log::debug!("No '{}' column, appending one", columns::PROCESSED);
                headers.push_field(columns::PROCESSED);
                headers.len() - 1
            }
        };

        let mut rows = Vec::new();
        for result in reader.records() {
            let mut record = result.map_err(csv_err)?;
            while record.len() < headers.len() {
                record.push_field("");
            }
            rows.push(record);
        }

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
            processed_col,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column labelled `label`, if present.
    pub fn column(&self, label: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == label)
    }

    /// Borrow row `id`.
    ///
    /// # Panics
    /// If `id` is not a row of this table.
    pub fn row(&self, id: RowId) -> RowView<'_> {
        RowView {
            table: self,
            record: &self.rows[id.0],
        }
    }

    pub fn is_processed(&self, id: RowId) -> bool {
        is_truthy(self.rows[id.0].get(self.processed_col).unwrap_or(""))
    }

    /// Ids of all rows not yet marked processed, in table order.
    pub fn unprocessed(&self) -> Vec<RowId> {
        (0..self.rows.len())
            .map(RowId)
            .filter(|&id| !self.is_processed(id))
            .collect()
    }

    /// Set the processed marker on every row in `ids`.
    pub fn mark_processed(&mut self, ids: &[RowId]) {
        for &id in ids {
            let record = &self.rows[id.0];
            let mut updated = StringRecord::with_capacity(record.as_slice().len() + 1, record.len());
            for (i, field) in record.iter().enumerate() {
                if i == self.processed_col {
                    updated.push_field(PROCESSED_MARKER);
                } else {
                    updated.push_field(field);
                }
            }
            self.rows[id.0] = updated;
        }
    }

    /// Rewrite the table at its own path.
    pub fn save(&self) -> Result<(), TableError> {
        self.save_to(&self.path)
    }

    /// Write the table to `path`, replacing it atomically.
    pub fn save_to(&self, path: &Path) -> Result<(), TableError> {
        let io_err = |source| TableError::Io {
            path: path.display().to_string(),
            source,
        };
        let csv_err = |source| TableError::Csv {
            path: path.display().to_string(),
            source,
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "table.csv".to_string());
        let tmp = path.with_file_name(format!("{file_name}.tmp"));

        let mut writer = csv::Writer::from_path(&tmp).map_err(csv_err)?;
        writer.write_record(&self.headers).map_err(csv_err)?;
        for record in &self.rows {
            writer.write_record(record).map_err(csv_err)?;
        }
        writer.flush().map_err(io_err)?;
        drop(writer);

        std::fs::rename(&tmp, path).map_err(io_err)
    }
}

/// A borrowed view of one row, addressed by column label.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a SourceTable,
    record: &'a StringRecord,
}

impl<'a> RowView<'a> {
    /// The cell under `label`; empty when the column or the cell is missing.
    pub fn get(&self, label: &str) -> &'a str {
        self.table
            .column(label)
            .and_then(|i| self.record.get(i))
            .unwrap_or("")
    }

    /// The first column's cell. An empty key marks a continuation row.
    pub fn key(&self) -> &'a str {
        self.record.get(0).unwrap_or("")
    }
}

/// Whether a `Processed` cell counts as set.
///
/// Empty cells and the literals `0`, `0.0`, `false`, `no`, `nan` are unset.
pub fn is_truthy(cell: &str) -> bool {
    let cell = cell.trim();
    if cell.is_empty() {
        return false;
    }
    !matches!(
        cell.to_ascii_lowercase().as_str(),
        "0" | "0.0" | "false" | "no" | "nan"
    )
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;

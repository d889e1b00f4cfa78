//! Continuation rows: overflow detail text for the preceding submission.
//!
//! A continuation row has an empty key cell (first column) and a non-empty
//! `Compatibility Details` cell. Any run of them directly after a primary row
//! belongs to that row.

use crate::normalize::columns;
use crate::table::{RowId, SourceTable};

/// Continuation rows absorbed by one primary row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Continuation {
    /// Absorbed rows, in table order.
    pub absorbed: Vec<RowId>,
    /// Their detail text, in the same order.
    pub details: Vec<String>,
}

impl Continuation {
    pub fn is_empty(&self) -> bool {
        self.absorbed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.absorbed.len()
    }
}

/// Collect the continuation rows following `pending[position]`.
///
/// Only rows in `pending` are considered, so already-processed rows in
/// between are invisible. The scan stops at the first row with a key or with
/// empty details; a keyless row with empty details is not absorbed.
pub fn collect_continuations(
    table: &SourceTable,
    pending: &[RowId],
    position: usize,
) -> Continuation {
    let mut continuation = Continuation::default();
    for &id in pending.iter().skip(position + 1) {
        let row = table.row(id);
        let details = row.get(columns::COMPATIBILITY_DETAILS);
        if !row.key().is_empty() || details.is_empty() {
            break;
        }
        continuation.absorbed.push(id);
        continuation.details.push(details.to_string());
    }
    continuation
}

/// Append continuation details to a primary row's details, space-joined.
pub fn merge_details(base: &str, extra: &[String]) -> String {
    if extra.is_empty() {
        return base.to_string();
    }
    format!("{base} {}", extra.join(" "))
}

#[cfg(test)]
#[path = "tests/aggregate_tests.rs"]
mod tests;

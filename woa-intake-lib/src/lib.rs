//! Intake pipeline for compatibility-report submissions.
//!
//! Rows from the submission table flow through [`normalize`](mod@normalize), absorb their
//! [`aggregate`] continuation rows, get matched against the catalog
//! ([`matcher`]), are resolved to a single [`resolve::Decision`] (asking the
//! operator when needed), and end up as exactly one document via [`writer`].
//! [`batch`] drives that loop and persists processed markers after each row.

pub mod aggregate;
pub mod batch;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod resolve;
pub mod settings;
pub mod table;
pub mod writer;

pub use batch::{
    BatchDriver, BatchSummary, IntakeOptions, IntakeProgress, PendingRow, pending_rows,
    run_intake,
};
pub use error::{
    ChooserError, IntakeError, ResolveError, SelectionError, SettingsError, TableError,
};
pub use matcher::{Candidate, MatchResult, MatchState, match_title};
pub use normalize::{NormalizedReport, normalize};
pub use resolve::{Chooser, Decision, Menu, MenuOption, Selection, resolve, resolve_selection};
pub use settings::{IntakeConfig, PathSettings};
pub use table::{RowId, RowView, SourceTable};
pub use writer::{DocumentKind, WrittenDocument};

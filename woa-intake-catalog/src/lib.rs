//! Game compatibility catalog documents: data model, slugs, and front-matter I/O.
//!
//! The catalog is a directory of Markdown files, one per game, whose YAML
//! front matter carries the game's metadata and first compatibility result.
//! User reports for games already in the catalog live in a sibling directory
//! as `<slug>_NNNN.md` files. This crate knows how to enumerate the former and
//! write both, without any knowledge of where the submissions come from.

pub mod error;
pub mod front_matter;
pub mod slug;
pub mod store;
pub mod types;

pub use error::DocumentError;
pub use front_matter::{parse_front_matter, render_front_matter, split_front_matter};
pub use slug::{catalog_file_name, report_file_name, slugify, validate_slug};
pub use store::{CatalogStore, ReportStore};
pub use types::*;

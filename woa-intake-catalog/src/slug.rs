//! Filename slugs for catalog and report documents.

use crate::error::DocumentError;

/// Derive the filename slug for a game title.
///
/// Lowercases, turns each space into `_`, and drops colons. Nothing else is
/// touched, so apostrophes and other punctuation survive.
///
/// ```
/// use woa_intake_catalog::slugify;
///
/// assert_eq!(slugify("Halo Infinite"), "halo_infinite");
/// assert_eq!(slugify("Tom Clancy's: Rainbow Six"), "tom_clancy's_rainbow_six");
/// ```
pub fn slugify(title: &str) -> String {
    title.to_lowercase().replace(' ', "_").replace(':', "")
}

/// Check that `slug` names a single file directly inside a directory.
///
/// Empty slugs, `.`, `..`, and anything containing a path separator or NUL
/// are rejected.
///
/// ```
/// use woa_intake_catalog::validate_slug;
///
/// assert!(validate_slug("halo_infinite").is_ok());
/// assert!(validate_slug("fate/samurai_remnant").is_err());
/// assert!(validate_slug("..").is_err());
/// ```
pub fn validate_slug(slug: &str) -> Result<(), DocumentError> {
    let unusable = slug.is_empty()
        || slug == "."
        || slug == ".."
        || slug.contains(['/', '\\', '\0']);
    if unusable {
        return Err(DocumentError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

/// File name of the `sequence`-th report for `slug`: `<slug>_NNNN.md`.
///
/// The sequence is zero-padded to four digits and simply grows wider past 9999.
pub fn report_file_name(slug: &str, sequence: u32) -> String {
    format!("{slug}_{sequence:04}.md")
}

/// File name of the catalog entry for `slug`: `<slug>.md`.
pub fn catalog_file_name(slug: &str) -> String {
    format!("{slug}.md")
}

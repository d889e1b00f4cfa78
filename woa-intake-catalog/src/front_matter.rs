//! YAML front matter delimited by `---` lines.
//!
//! Documents look like:
//! ```text
//! ---
//! name: Halo Infinite
//! compatibility: playable
//! ...
//! ---
//! ```
//! Anything after the closing delimiter is Markdown body and is ignored here.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DocumentError;

pub const DELIMITER: &str = "---";

/// Render `doc` as a front-matter block, including both delimiter lines.
pub fn render_front_matter<T: Serialize>(doc: &T) -> Result<String, DocumentError> {
    let yaml = serde_yml::to_string(doc)?;
    let body = yaml.strip_prefix("---\n").unwrap_or(&yaml);
    let mut out = String::with_capacity(body.len() + 8);
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push('\n');
    Ok(out)
}

/// Return the YAML between the opening and closing `---` lines, if present.
///
/// The opening delimiter must be the first line (a leading UTF-8 BOM is
/// tolerated). Returns `None` for documents without a closed block.
pub fn split_front_matter(contents: &str) -> Option<&str> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let mut lines = contents.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Some(&contents[start..offset]);
        }
        offset += line.len();
    }
    None
}

/// Parse the front matter of `contents` into `T`.
///
/// `origin` names the document in the error when there is no front matter.
pub fn parse_front_matter<T: DeserializeOwned>(
    contents: &str,
    origin: &str,
) -> Result<T, DocumentError> {
    let yaml = split_front_matter(contents)
        .ok_or_else(|| DocumentError::MissingFrontMatter(origin.to_string()))?;
    Ok(serde_yml::from_str(yaml)?)
}

#[cfg(test)]
#[path = "tests/front_matter_tests.rs"]
mod tests;

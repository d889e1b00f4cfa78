use std::path::Path;

use thiserror::Error;

/// Errors raised while reading or writing catalog and report documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("No front matter in {0}")]
    MissingFrontMatter(String),

    /// A new catalog entry would overwrite an existing one.
    #[error("Catalog entry already exists: {0}")]
    CatalogCollision(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// The slug would not name a single file inside the target directory.
    #[error("'{0}' can't be used as a file name")]
    InvalidSlug(String),
}

impl DocumentError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn collision(path: &Path) -> Self {
        Self::CatalogCollision(path.display().to_string())
    }
}

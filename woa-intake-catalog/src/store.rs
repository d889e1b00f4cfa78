//! Directory-backed catalog and report stores.
//!
//! Neither store ever overwrites a file: catalog entries fail on collision and
//! reports take the next free `_NNNN` suffix.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::DocumentError;
use crate::front_matter::{parse_front_matter, render_front_matter};
use crate::slug::{catalog_file_name, report_file_name, validate_slug};
use crate::types::{CatalogDocument, CatalogEntry, CatalogHeader, ReportDocument};

/// The directory of one-per-game catalog entries.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    root: PathBuf,
}

impl CatalogStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path the entry for `slug` lives at (whether or not it exists).
    pub fn entry_path(&self, slug: &str) -> PathBuf {
        self.root.join(catalog_file_name(slug))
    }

    /// Enumerate every `.md` document in the catalog, sorted by file name.
    ///
    /// A missing directory is an empty catalog. Only the directory is read:
    /// each entry's title is its stem until
    /// [`CatalogEntry::with_display_name`] loads the front matter.
    pub fn entries(&self) -> Result<Vec<CatalogEntry>, DocumentError> {
        if !self.root.exists() {
            log::debug!("Catalog {} does not exist yet", self.root.display());
            return Ok(Vec::new());
        }
        if !self.root.is_dir() {
            return Err(DocumentError::NotADirectory(self.root.display().to_string()));
        }

        let mut files: Vec<_> = fs::read_dir(&self.root)
            .map_err(|e| DocumentError::io(&self.root, e))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
            })
            .collect();
        files.sort_by_key(|e| e.file_name());

        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            let path = file.path();
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                log::warn!("Skipping catalog file with non-UTF-8 name: {}", path.display());
                continue;
            };
            let slug = slug.to_string();
            entries.push(CatalogEntry {
                title: slug.clone(),
                slug,
                path,
            });
        }
        Ok(entries)
    }

    /// Write a new catalog entry as `<slug>.md`.
    ///
    /// Fails with [`DocumentError::InvalidSlug`] if `slug` isn't a plain file
    /// name, and with [`DocumentError::CatalogCollision`] if the file already
    /// exists.
    pub fn write_entry(
        &self,
        slug: &str,
        doc: &CatalogDocument,
    ) -> Result<PathBuf, DocumentError> {
        validate_slug(slug)?;
        let contents = render_front_matter(doc)?;
        ensure_dir(&self.root)?;

        let path = self.entry_path(slug);
        match write_new(&path, &contents) {
            Ok(()) => Ok(path),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(DocumentError::collision(&path))
            }
            Err(e) => Err(DocumentError::io(&path, e)),
        }
    }
}

/// The directory of per-submission user reports.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The first `<slug>_NNNN.md` path (counting from 0001) not present on disk.
    pub fn next_report_path(&self, slug: &str) -> PathBuf {
        self.next_report_path_excluding(slug, &[])
    }

    /// Like [`next_report_path`](Self::next_report_path), also skipping
    /// paths already handed out in `reserved`.
    pub fn next_report_path_excluding(&self, slug: &str, reserved: &[PathBuf]) -> PathBuf {
        let mut sequence = 1;
        loop {
            let path = self.root.join(report_file_name(slug, sequence));
            if !path.exists() && !reserved.contains(&path) {
                return path;
            }
            sequence += 1;
        }
    }

    /// Write a report under the first free sequence number for `slug`.
    pub fn write_report(
        &self,
        slug: &str,
        doc: &ReportDocument,
    ) -> Result<PathBuf, DocumentError> {
        validate_slug(slug)?;
        let contents = render_front_matter(doc)?;
        ensure_dir(&self.root)?;

        let mut sequence = 1;
        loop {
            let path = self.root.join(report_file_name(slug, sequence));
            match write_new(&path, &contents) {
                Ok(()) => {
                    log::debug!("Report for '{}' written as #{:04}", doc.game, sequence);
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => sequence += 1,
                Err(e) => return Err(DocumentError::io(&path, e)),
            }
        }
    }
}

impl CatalogEntry {
    /// Replace the title with the file's front-matter `name`.
    ///
    /// Keeps the current title when the file can't be read, has no front
    /// matter, or has a blank `name`.
    pub fn with_display_name(mut self) -> Self {
        if let Some(name) = read_display_name(&self.path) {
            self.title = name;
        }
        self
    }
}

fn read_display_name(path: &Path) -> Option<String> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::debug!("Could not read {}: {e}", path.display());
            return None;
        }
    };
    match parse_front_matter::<CatalogHeader>(&contents, &path.display().to_string()) {
        Ok(header) => header.name.filter(|n| !n.trim().is_empty()),
        Err(e) => {
            log::debug!("No display name in {}: {e}", path.display());
            None
        }
    }
}

fn ensure_dir(dir: &Path) -> Result<(), DocumentError> {
    fs::create_dir_all(dir).map_err(|e| DocumentError::io(dir, e))
}

/// Create `path` and write `contents`, refusing to touch an existing file.
fn write_new(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}

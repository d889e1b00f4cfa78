//! Turning a decision and a normalized report into one written document.

use std::fmt;
use std::path::PathBuf;

use woa_intake_catalog::{
    AutoSuperResolution, CatalogDocument, CatalogStore, DocumentError, ReportDocument,
    ReportStore, slugify, split_categories, validate_slug,
};

use crate::normalize::NormalizedReport;
use crate::resolve::Decision;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    CatalogEntry,
    Report,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CatalogEntry => write!(f, "catalog entry"),
            Self::Report => write!(f, "report"),
        }
    }
}

/// A document written (or, in a dry run, about to be written).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDocument {
    pub kind: DocumentKind,
    pub path: PathBuf,
}

/// Build the front matter for a new catalog entry titled `title`.
pub fn catalog_document(title: &str, report: &NormalizedReport) -> CatalogDocument {
    CatalogDocument {
        name: title.to_string(),
        categories: split_categories(&report.categories),
        publisher: report.publisher.clone(),
        compatibility: report.compatibility.clone(),
        device_configuration: report.device_configuration.clone(),
        date_tested: report.date_tested.clone(),
        os_version: report.os_version.clone(),
        compatibility_details: report.compatibility_details.clone(),
        auto_super_resolution: upscaling(report),
    }
}

/// Build the front matter for a user report against the game titled `title`.
pub fn report_document(title: &str, report: &NormalizedReport) -> ReportDocument {
    ReportDocument {
        game: title.to_string(),
        compatibility: report.compatibility.clone(),
        device_configuration: report.device_configuration.clone(),
        date_tested: report.date_tested.clone(),
        os_version: report.os_version.clone(),
        compatibility_details: report.compatibility_details.clone(),
        auto_super_resolution: upscaling(report),
        reporter: report.reporter.clone(),
    }
}

fn upscaling(report: &NormalizedReport) -> AutoSuperResolution {
    AutoSuperResolution::new(
        report.auto_super_resolution_compatibility.clone(),
        &report.auto_super_res_fps_boost,
    )
}

/// Write the document `decision` calls for.
///
/// New games become `<slug>.md` in the catalog (failing if that exists);
/// existing games get the next free `<slug>_NNNN.md` report.
pub fn write_document(
    decision: &Decision,
    report: &NormalizedReport,
    catalog: &CatalogStore,
    reports: &ReportStore,
) -> Result<WrittenDocument, DocumentError> {
    match decision {
        Decision::New { title } => {
            let path = catalog.write_entry(&slugify(title), &catalog_document(title, report))?;
            Ok(WrittenDocument {
                kind: DocumentKind::CatalogEntry,
                path,
            })
        }
        Decision::Existing { title, slug } => {
            let path = reports.write_report(slug, &report_document(title, report))?;
            Ok(WrittenDocument {
                kind: DocumentKind::Report,
                path,
            })
        }
    }
}

/// Where [`write_document`] would write, without touching the filesystem.
///
/// `planned` holds paths earlier plans in the same run already claimed; they
/// count as taken. A new catalog entry whose file exists (or is planned) is
/// reported as a collision, and an unusable slug as invalid, just as a real
/// write would.
pub fn plan_document(
    decision: &Decision,
    catalog: &CatalogStore,
    reports: &ReportStore,
    planned: &[PathBuf],
) -> Result<WrittenDocument, DocumentError> {
    match decision {
        Decision::New { title } => {
            let slug = slugify(title);
            validate_slug(&slug)?;
            let path = catalog.entry_path(&slug);
            if path.exists() || planned.contains(&path) {
                return Err(DocumentError::collision(&path));
            }
            Ok(WrittenDocument {
                kind: DocumentKind::CatalogEntry,
                path,
            })
        }
        Decision::Existing { slug, .. } => {
            validate_slug(slug)?;
            Ok(WrittenDocument {
                kind: DocumentKind::Report,
                path: reports.next_report_path_excluding(slug, planned),
            })
        }
    }
}

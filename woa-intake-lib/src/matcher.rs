//! Matching a submitted title against the catalog.
//!
//! A file stem is an exact match when it equals the title's slug or the title
//! itself, ignoring case: `"Halo Infinite"` matches both `halo_infinite.md`
//! and `Halo Infinite.md`. Without an exact match, the closest stems by
//! normalized Levenshtein similarity to the slug are offered.

use strsim::normalized_levenshtein;
use woa_intake_catalog::{CatalogEntry, slugify};

/// Candidates scoring below this are never offered.
pub const MIN_SIMILARITY: f64 = 0.1;

/// At most this many candidates are offered.
pub const MAX_CANDIDATES: usize = 3;

/// A catalog entry close to, but not exactly, the submitted title.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub title: String,
    pub slug: String,
    /// Similarity in `0.0..=1.0`.
    pub score: f64,
}

/// Outcome of matching one title.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchResult {
    /// The catalog entry with the same slug, if any.
    pub exact: Option<CatalogEntry>,
    /// Closest entries, best first. Empty when `exact` is set.
    pub candidates: Vec<Candidate>,
}

/// Which branch of selection a match result leads to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchState<'a> {
    Exact(&'a CatalogEntry),
    Fuzzy(&'a [Candidate]),
    None,
}

impl MatchResult {
    pub fn is_exact(&self) -> bool {
        self.exact.is_some()
    }

    /// Load front-matter display names for the exact hit and the candidates.
    ///
    /// `entries` is the listing the result was matched against; only the
    /// files named in the result are read.
    pub fn with_display_names(mut self, entries: &[CatalogEntry]) -> Self {
        self.exact = self.exact.map(CatalogEntry::with_display_name);
        for candidate in &mut self.candidates {
            if let Some(entry) = entries.iter().find(|e| e.slug == candidate.slug) {
                candidate.title = entry.clone().with_display_name().title;
            }
        }
        self
    }

    pub fn state(&self) -> MatchState<'_> {
        match (&self.exact, self.candidates.is_empty()) {
            (Some(entry), _) => MatchState::Exact(entry),
            (None, false) => MatchState::Fuzzy(&self.candidates),
            (None, true) => MatchState::None,
        }
    }
}

/// Match `title` against the catalog `entries`.
///
/// Ties in score keep the order of `entries`.
pub fn match_title(title: &str, entries: &[CatalogEntry]) -> MatchResult {
    let wanted = slugify(title);
    let lowered = title.to_lowercase();

    if let Some(entry) = entries.iter().find(|e| {
        let stem = e.slug.to_lowercase();
        stem == wanted || stem == lowered
    }) {
        return MatchResult {
            exact: Some(entry.clone()),
            candidates: Vec::new(),
        };
    }

    let mut scored: Vec<Candidate> = entries
        .iter()
        .map(|e| Candidate {
            title: e.title.clone(),
            slug: e.slug.clone(),
            score: normalized_levenshtein(&wanted, &e.slug.to_lowercase()),
        })
        .filter(|c| c.score >= MIN_SIMILARITY)
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(MAX_CANDIDATES);

    for c in &scored {
        log::debug!("Candidate for '{title}': {} ({:.3})", c.slug, c.score);
    }

    MatchResult {
        exact: None,
        candidates: scored,
    }
}

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod tests;

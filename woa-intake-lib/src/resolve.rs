//! Turning a [`MatchResult`] into a [`Decision`].
//!
//! Three states:
//!
//! - **Exact**: the catalog already has the game; no questions asked.
//! - **Fuzzy**: the operator picks a candidate, keeps the submitted title as
//!   a new game, or types a custom title for a new game.
//! - **None**: the operator types a custom title for a new game.
//!
//! Menu choices are mapped by the pure [`resolve_selection`]; talking to the
//! operator is behind the [`Chooser`] trait. A new-game title whose slug
//! can't be a file name (`"Fate/Samurai Remnant"`) sends the operator to the
//! custom-title prompt until they give one that can.

use woa_intake_catalog::{slugify, validate_slug};

use crate::error::{ChooserError, ResolveError, SelectionError};
use crate::matcher::{Candidate, MatchResult, MatchState};

/// Where a submission should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Add a user report against an existing catalog entry.
    ///
    /// `title` is the entry's display title: its front-matter `name`, or the
    /// file stem when the file has none. `slug` is always the file stem, so
    /// reports are named after the file on disk.
    Existing { title: String, slug: String },
    /// Create a new catalog entry with this title.
    New { title: String },
}

impl Decision {
    pub fn title(&self) -> &str {
        match self {
            Self::Existing { title, .. } | Self::New { title } => title,
        }
    }

    pub fn is_existing(&self) -> bool {
        matches!(self, Self::Existing { .. })
    }
}

/// One numbered line of the disambiguation menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuOption {
    Candidate(Candidate),
    NewWithTitle(String),
    Custom,
}

impl MenuOption {
    pub fn label(&self) -> String {
        match self {
            Self::Candidate(c) => c.title.clone(),
            Self::NewWithTitle(title) => format!("Create new game called '{title}'"),
            Self::Custom => "Create new game with custom name".to_string(),
        }
    }
}

/// The menu shown when there is no exact match but some candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    /// The submitted title.
    pub title: String,
    pub options: Vec<MenuOption>,
}

impl Menu {
    /// Candidates first, then "new with this title", then "custom".
    pub fn for_candidates(title: &str, candidates: &[Candidate]) -> Self {
        let mut options: Vec<MenuOption> =
            candidates.iter().cloned().map(MenuOption::Candidate).collect();
        options.push(MenuOption::NewWithTitle(title.to_string()));
        options.push(MenuOption::Custom);
        Self {
            title: title.to_string(),
            options,
        }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn candidate_count(&self) -> usize {
        self.options.len().saturating_sub(2)
    }
}

/// What a menu choice means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// 0-based index into the candidates.
    Candidate(usize),
    NewWithTitle,
    Custom,
}

/// Map a 1-based menu `choice` to a [`Selection`].
///
/// With `n` candidates, `1..=n` pick a candidate, `n + 1` keeps the
/// submitted title, and `n + 2` asks for a custom title.
///
/// ```
/// use woa_intake_lib::resolve::{Selection, resolve_selection};
///
/// assert_eq!(resolve_selection(2, 3), Ok(Selection::Candidate(1)));
/// assert_eq!(resolve_selection(4, 3), Ok(Selection::NewWithTitle));
/// assert_eq!(resolve_selection(5, 3), Ok(Selection::Custom));
/// assert!(resolve_selection(6, 3).is_err());
/// ```
pub fn resolve_selection(
    choice: usize,
    candidate_count: usize,
) -> Result<Selection, SelectionError> {
    let max = candidate_count + 2;
    match choice {
        0 => Err(SelectionError { choice, max }),
        c if c <= candidate_count => Ok(Selection::Candidate(c - 1)),
        c if c == candidate_count + 1 => Ok(Selection::NewWithTitle),
        c if c == max => Ok(Selection::Custom),
        _ => Err(SelectionError { choice, max }),
    }
}

/// Source of operator answers.
pub trait Chooser {
    /// Present `menu` and return the operator's 1-based choice.
    fn choose(&mut self, menu: &Menu) -> Result<usize, ChooserError>;

    /// Ask for a custom title for a new game submitted as `submitted`.
    fn custom_title(&mut self, submitted: &str) -> Result<String, ChooserError>;
}

/// Decide where the submission titled `title` goes.
pub fn resolve(
    title: &str,
    result: &MatchResult,
    chooser: &mut dyn Chooser,
) -> Result<Decision, ResolveError> {
    match result.state() {
        MatchState::Exact(entry) => Ok(Decision::Existing {
            title: entry.title.clone(),
            slug: entry.slug.clone(),
        }),
        MatchState::Fuzzy(candidates) => {
            let menu = Menu::for_candidates(title, candidates);
            let choice = chooser.choose(&menu)?;
            match resolve_selection(choice, candidates.len())? {
                Selection::Candidate(i) => {
                    let c = &candidates[i];
                    Ok(Decision::Existing {
                        title: c.title.clone(),
                        slug: c.slug.clone(),
                    })
                }
                Selection::NewWithTitle => new_game(title, chooser),
                Selection::Custom => custom(title, chooser),
            }
        }
        MatchState::None => {
            log::info!("No close matches found for '{title}'.");
            custom(title, chooser)
        }
    }
}

fn usable(title: &str) -> bool {
    validate_slug(&slugify(title)).is_ok()
}

fn new_game(title: &str, chooser: &mut dyn Chooser) -> Result<Decision, ResolveError> {
    if usable(title) {
        return Ok(Decision::New {
            title: title.to_string(),
        });
    }
    log::warn!("'{title}' can't be used as a file name, enter a different title.");
    custom(title, chooser)
}

fn custom(title: &str, chooser: &mut dyn Chooser) -> Result<Decision, ResolveError> {
    loop {
        let custom = chooser.custom_title(title)?;
        let custom = custom.trim();
        if custom.is_empty() {
            return Err(ResolveError::EmptyTitle);
        }
        if usable(custom) {
            return Ok(Decision::New {
                title: custom.to_string(),
            });
        }
        log::warn!("'{custom}' can't be used as a file name, enter a different title.");
    }
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;

//! Row normalization: raw table cells into a [`NormalizedReport`].
//!
//! Normalization is total. Missing columns and empty cells become empty
//! strings, unparseable dates become empty strings, and nothing here ever
//! returns an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::table::RowView;

/// Column labels of the submission form export.
pub mod columns {
    pub const EMAIL: &str = "Email";
    pub const NAME: &str = "Name";
    pub const GAME_NAME: &str = "Name of Game";
    pub const CATEGORIES: &str = "Categories";
    pub const PUBLISHER: &str = "Publisher";
    pub const COMPATIBILITY: &str = "Compatibility";
    pub const DEVICE_CONFIGURATION: &str = "Device Configuration eg Snapdragon X Elite - 32 GB";
    pub const DATE_TESTED: &str = "Date tested1";
    pub const OS_VERSION: &str = "OS Version";
    pub const DRIVER_ID: &str = "Driver ID";
    pub const COMPATIBILITY_DETAILS: &str = "Compatibility Details";
    pub const AUTO_SUPER_RESOLUTION_COMPATIBILITY: &str = "Auto Super Resolution Compatibility";
    pub const AUTO_SUPER_RES_FPS_BOOST: &str = "Auto Super Res FPS boost";
    pub const REPORTER: &str = "Your name/gamertag";
    pub const PROCESSED: &str = "Processed";

    /// Every column the normalizer reads, in form order.
    pub const REPORT_COLUMNS: &[&str] = &[
        EMAIL,
        NAME,
        GAME_NAME,
        CATEGORIES,
        PUBLISHER,
        COMPATIBILITY,
        DEVICE_CONFIGURATION,
        DATE_TESTED,
        OS_VERSION,
        DRIVER_ID,
        COMPATIBILITY_DETAILS,
        AUTO_SUPER_RESOLUTION_COMPATIBILITY,
        AUTO_SUPER_RES_FPS_BOOST,
        REPORTER,
    ];
}

/// One submission in canonical form. Absent values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedReport {
    pub email: String,
    pub name: String,
    pub game_name: String,
    pub categories: String,
    pub publisher: String,
    /// Lowercased first word of the compatibility answer (e.g. `playable`).
    pub compatibility: String,
    pub device_configuration: String,
    /// `YYYY-MM-DD`, or empty when the cell wasn't a recognizable date.
    pub date_tested: String,
    pub os_version: String,
    pub driver_id: String,
    pub compatibility_details: String,
    pub auto_super_resolution_compatibility: String,
    pub auto_super_res_fps_boost: String,
    pub reporter: String,
}

/// Normalize one table row.
pub fn normalize(row: &RowView<'_>) -> NormalizedReport {
    let cell = |label: &str| row.get(label).to_string();

    NormalizedReport {
        email: cell(columns::EMAIL),
        name: cell(columns::NAME),
        game_name: cell(columns::GAME_NAME),
        categories: cell(columns::CATEGORIES),
        publisher: cell(columns::PUBLISHER),
        compatibility: compatibility_code(row.get(columns::COMPATIBILITY)),
        device_configuration: cell(columns::DEVICE_CONFIGURATION),
        date_tested: normalize_date(row.get(columns::DATE_TESTED)),
        os_version: cell(columns::OS_VERSION),
        driver_id: cell(columns::DRIVER_ID),
        compatibility_details: cell(columns::COMPATIBILITY_DETAILS),
        auto_super_resolution_compatibility: cell(columns::AUTO_SUPER_RESOLUTION_COMPATIBILITY),
        auto_super_res_fps_boost: cell(columns::AUTO_SUPER_RES_FPS_BOOST),
        reporter: cell(columns::REPORTER),
    }
}

/// Reduce a compatibility answer to its lowercased first word.
///
/// ```
/// use woa_intake_lib::normalize::compatibility_code;
///
/// assert_eq!(compatibility_code("Playable with minor bugs"), "playable");
/// assert_eq!(compatibility_code("BROKEN"), "broken");
/// assert_eq!(compatibility_code(""), "");
/// ```
pub fn compatibility_code(raw: &str) -> String {
    raw.split_whitespace()
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default()
}

/// Date-time layouts tried before plain dates. Two-digit years go before
/// `%Y` (which would read `24` as the year 24), and US slashes before
/// `%Y/%m/%d` (which would read `10/03/24` as 0010-03-24).
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Parse a free-form date cell.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Normalize a date cell to `YYYY-MM-DD`, or empty when it can't be parsed.
pub fn normalize_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => {
            if !raw.trim().is_empty() {
                log::debug!("Unrecognized date '{raw}', leaving it empty");
            }
            String::new()
        }
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;

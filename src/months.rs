//! French month lexicon and filename date resolution.
//!
//! Input files are named `{month}-{year}-expression-orale.json` (or
//! `-ecrite`), month spelled out in French. This module turns such names
//! into a sortable [`FileDate`] so the organizer can process files newest
//! first. Unparseable names sort to the oldest position instead of failing.

use std::cmp::Reverse;

/// French month names to calendar position, accented and unaccented variants
/// both listed. Lookup is case-insensitive.
const MONTHS: &[(&str, u32)] = &[
    ("janvier", 1),
    ("fevrier", 2),
    ("février", 2),
    ("mars", 3),
    ("avril", 4),
    ("mai", 5),
    ("juin", 6),
    ("juillet", 7),
    ("aout", 8),
    ("août", 8),
    ("septembre", 9),
    ("octobre", 10),
    ("novembre", 11),
    ("decembre", 12),
    ("décembre", 12),
];

/// Sortable (year, month) key extracted from a topics filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileDate {
    pub year: u32,
    /// 1-12, or 0 for the unparseable fallback.
    pub month: u32,
}

impl FileDate {
    /// Fallback for filenames the resolver cannot parse; sorts before every
    /// real date.
    pub const OLDEST: FileDate = FileDate { year: 0, month: 0 };
}

/// Return the 1-12 calendar position for a French month name.
///
/// Accepts accented and unaccented spellings, any case. Returns `None` for
/// anything outside the lexicon.
pub fn month_index(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTHS
        .iter()
        .find(|(month, _)| *month == lower)
        .map(|(_, index)| *index)
}

/// All month spellings in the lexicon.
pub fn month_names() -> Vec<&'static str> {
    MONTHS.iter().map(|(month, _)| *month).collect()
}

/// Extract the ordering key from a `{month}-{year}-...` filename.
///
/// Returns [`FileDate::OLDEST`] when the name does not match the pattern,
/// the month is not in the lexicon, or the year token is not a 4-digit (or
/// 2-digit, normalized to 2000+) number.
pub fn file_date(filename: &str) -> FileDate {
    let base = filename.strip_suffix(".json").unwrap_or(filename);
    let mut tokens = base.split('-');
    let (Some(month_token), Some(year_token)) = (tokens.next(), tokens.next()) else {
        return FileDate::OLDEST;
    };
    let Some(month) = month_index(month_token) else {
        return FileDate::OLDEST;
    };
    let Some(year) = parse_year(year_token) else {
        return FileDate::OLDEST;
    };
    FileDate { year, month }
}

fn parse_year(token: &str) -> Option<u32> {
    if !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match token.len() {
        4 => token.parse().ok(),
        2 => token.parse::<u32>().ok().map(|y| 2000 + y),
        _ => None,
    }
}

/// Sort filenames newest first (descending year, then month).
///
/// The sort is stable: files with equal dates keep their input order.
pub fn sort_newest_first(files: &mut [String]) {
    files.sort_by_key(|file| Reverse(file_date(file)));
}

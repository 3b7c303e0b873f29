//! Topic content cleaning and boilerplate rejection.
//!
//! The scraper captures everything the source page renders, so raw strings
//! range from genuine exam scenarios to stitched-together navigation menus.
//! [`clean_topic`] normalizes whitespace and decides which strings survive.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Config, PipelineKind};

/// Matches a leading "Partie N" page label, with optional punctuation after
/// the number (e.g. "Partie 7", "partie 12:", "Partie 3 -").
static PART_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^partie\s*\d+\s*[:\-–—]*\s*").unwrap());

/// Collapse whitespace runs to single spaces and trim both ends.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean a raw scraped string, returning `None` when it is rejected.
///
/// Pure and deterministic. Rejection reasons: shorter than
/// `config.min_content_len` after normalization (equal length passes), a
/// known boilerplate prefix or fragment, or a pipeline-specific noise shape.
pub fn clean_topic(raw: &str, kind: PipelineKind, config: &Config) -> Option<String> {
    let mut content = normalize_whitespace(raw);

    if kind == PipelineKind::Oral {
        // Oral topics often keep the "Partie N" page label glued to the front.
        let label_end = PART_PREFIX_RE.find(&content).map(|label| label.end());
        if let Some(end) = label_end {
            content.drain(..end);
        }
    }

    if content.chars().count() < config.min_content_len {
        return None;
    }
    if config
        .boilerplate_prefixes
        .iter()
        .any(|prefix| content.starts_with(prefix.as_str()))
    {
        return None;
    }
    if config
        .boilerplate_fragments
        .iter()
        .any(|fragment| content.contains(fragment.as_str()))
    {
        return None;
    }

    match kind {
        PipelineKind::Oral => {
            // A long string still starting with "Partie " is a run of
            // concatenated page headers, not a topic.
            if content.starts_with("Partie ") && content.chars().count() > 500 {
                return None;
            }
        }
        PipelineKind::Written => {
            // Section names repeating means the scraper stitched a menu
            // together.
            if content.matches("Compréhension").count() > 1
                || content.matches("Expression").count() > 1
            {
                return None;
            }
        }
    }

    Some(content)
}

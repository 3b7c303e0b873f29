//! Organizer for scraped TCF Canada expression topics.
//!
//! `tcf_topics` ingests the JSON files produced by the topics scraper,
//! normalizes every entry into a uniform [`TopicRecord`], filters out
//! navigation noise captured from the source pages, removes in-file
//! duplicates, and aggregates everything newest-first for export.
//!
//! Two structurally parallel collections exist: oral expression (tasks 2-3,
//! grouped into numbered parts) and written expression (tasks 1-3, flat entry
//! lists with word-count targets). Both run through the same pipeline,
//! parameterized by [`PipelineKind`].
//!
//! # Quick start
//!
//! ```no_run
//! use tcf_topics::{Config, PipelineKind, TopicOrganizer};
//!
//! let mut organizer = TopicOrganizer::new(PipelineKind::Oral, "output", Config::default());
//! let report = organizer.load_all_topics().unwrap();
//! println!(
//!     "{} topics from {} files",
//!     report.total_topics,
//!     report.files_processed.len()
//! );
//! organizer.export_organized_topics("organized_topics.json").unwrap();
//! ```

mod clean;
mod dedup;
mod error;
mod extract;
pub mod months;
mod organizer;
mod record;

pub use clean::clean_topic;
pub use error::TopicsError;
pub use months::{file_date, month_index, FileDate};
pub use organizer::{FileFailure, LoadReport, TopicOrganizer};
pub use record::{Task, TopicRecord};

/// Which of the two scraped topic collections a pipeline processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    /// Expression orale: tasks 2-3, part-label maps of plain strings.
    Oral,
    /// Expression écrite: tasks 1-3, lists of structured entries.
    Written,
}

impl PipelineKind {
    /// Filename suffix an input file must carry to belong to this pipeline.
    pub fn file_suffix(self) -> &'static str {
        match self {
            PipelineKind::Oral => "-expression-orale.json",
            PipelineKind::Written => "-expression-ecrite.json",
        }
    }
}

/// Exact prefixes of known non-topic strings observed on the source site.
const DEFAULT_BOILERPLATE_PREFIXES: &[&str] = &[
    "AccueilSe connecter",
    "Nous utilisons des cookies",
    "Nos Contacts",
    "🎯 Nouveau Service Exceptionnel",
    "Sujets d'actualité corrigés pour",
    "les méthodologiesCompréhension",
    "Les méthodologiesCompréhension",
    "Partager avec votre réseau",
    "Combinaison",
    "Tâche 1",
    "Tâche 2",
    "Tâche 3",
    "Document 1",
    "Document 2",
    "mots minimum",
    "mots maximum",
    "/* <![CDATA[",
];

/// Substrings that mark a navigation menu wherever they appear.
const DEFAULT_BOILERPLATE_FRAGMENTS: &[&str] = &[
    "AccueilSe connecter",
    "Compréhension écrite",
    "Expression Orale",
    "Nos Formations",
    "Cabinet d'immigration",
    "Contactez-nous",
    "Politique de retour",
    "Mentions Légales",
    "les pagesActualité",
    "Nous acceptons",
    "Paiment",
    "Cliquez ici",
];

/// Configuration for topic cleaning.
///
/// The boilerplate sets are heuristic: they hold the fragments observed on
/// the source site so far, and new source sites will need additions. Extend
/// them with [`Config::with_boilerplate_prefix`] and
/// [`Config::with_boilerplate_fragment`].
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Minimum cleaned length, in characters. A topic of exactly this length
    /// is accepted.
    pub min_content_len: usize,
    /// Strings rejected when the cleaned content starts with any of them.
    pub boilerplate_prefixes: Vec<String>,
    /// Strings rejected when the cleaned content contains any of them.
    pub boilerplate_fragments: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_content_len: 20,
            boilerplate_prefixes: DEFAULT_BOILERPLATE_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            boilerplate_fragments: DEFAULT_BOILERPLATE_FRAGMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    pub fn with_min_content_len(mut self, n: usize) -> Self {
        self.min_content_len = n;
        self
    }
    pub fn with_boilerplate_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.boilerplate_prefixes.push(prefix.into());
        self
    }
    pub fn with_boilerplate_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.boilerplate_fragments.push(fragment.into());
        self
    }
}

/// Load and organize one pipeline's topics in a single call.
///
/// Equivalent to constructing a [`TopicOrganizer`] with the default
/// [`Config`] and calling `load_all_topics()`.
///
/// # Example
///
/// ```no_run
/// let organizer = tcf_topics::load_topics(tcf_topics::PipelineKind::Written, "output").unwrap();
/// ```
pub fn load_topics(
    kind: PipelineKind,
    input_dir: impl Into<std::path::PathBuf>,
) -> Result<TopicOrganizer, TopicsError> {
    let mut organizer = TopicOrganizer::new(kind, input_dir, Config::default());
    organizer.load_all_topics()?;
    Ok(organizer)
}

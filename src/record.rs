//! The uniform topic record shared by both pipelines.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Trailing digits of a part label ("partie_3" -> 3).
static TRAILING_DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*$").unwrap());

/// Exam task a topic belongs to.
///
/// Oral topics only ever carry [`Task::Task2`] or [`Task::Task3`]; written
/// topics use all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Task {
    #[serde(rename = "tache_1")]
    Task1,
    #[serde(rename = "tache_2")]
    Task2,
    #[serde(rename = "tache_3")]
    Task3,
}

impl Task {
    /// Key used for this task in the scraped JSON.
    pub fn key(self) -> &'static str {
        match self {
            Task::Task1 => "tache_1",
            Task::Task2 => "tache_2",
            Task::Task3 => "tache_3",
        }
    }

    /// Zero-based slot in the organizer's per-task aggregation.
    pub(crate) fn index(self) -> usize {
        match self {
            Task::Task1 => 0,
            Task::Task2 => 1,
            Task::Task3 => 2,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A cleaned exam topic with its provenance.
///
/// One record belongs to exactly one source file and one task. The optional
/// fields are pipeline-specific: `part`/`part_number` are set for oral
/// records only, the rest for written records only. Records are immutable
/// once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
    /// Cleaned topic text; never empty, at least the configured minimum
    /// length.
    pub content: String,
    /// Origin URL declared by the source document; empty when absent.
    #[serde(default)]
    pub source_url: String,
    /// Name of the file the record was extracted from.
    pub source_file: String,
    pub task: Task,
    /// Part label within an oral task (e.g. "partie_1").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
    /// Numeric form of `part`, parsed from trailing digits; 0 when
    /// unparseable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<u32>,
    /// Declared word-count target for a written task, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<String>,
    /// Human-readable written task type (e.g. "message_personnel").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_label: Option<String>,
    /// Supporting documents of a written task-3 prompt, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>,
    /// Identifier of the topic-combination group the record came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combination: Option<String>,
}

/// Parse the trailing digits of a part label; 0 when there are none.
pub(crate) fn part_number_from_label(label: &str) -> u32 {
    TRAILING_DIGITS_RE
        .captures(label)
        .and_then(|captures| captures[1].parse().ok())
        .unwrap_or(0)
}

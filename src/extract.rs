//! Record extraction from parsed source documents.
//!
//! The two pipelines differ only in which task keys exist and how each
//! task's entries are laid out, so extraction is one generic walk driven by
//! a per-pipeline table of [`TaskSpec`]s.

use serde_json::{Map, Value};
use tracing::debug;

use crate::clean::clean_topic;
use crate::record::{part_number_from_label, Task, TopicRecord};
use crate::{Config, PipelineKind};

/// How a task's entries are laid out in the scraped JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TaskShape {
    /// `{part_label: [string, ...], ...}` (oral tasks).
    PartMap,
    /// `[{content, ...}, ...]` (written tasks).
    EntryList,
}

/// Field-extraction rules for one task of one pipeline.
pub(crate) struct TaskSpec {
    pub task: Task,
    pub shape: TaskShape,
    /// Fixed human-readable task type stamped on written records.
    pub type_label: Option<&'static str>,
    /// Word-count target used when an entry does not declare one.
    pub default_word_count: Option<&'static str>,
    /// Whether entries may carry supporting documents (written task 3).
    pub documents: bool,
}

const ORAL_TASKS: &[TaskSpec] = &[
    TaskSpec {
        task: Task::Task2,
        shape: TaskShape::PartMap,
        type_label: None,
        default_word_count: None,
        documents: false,
    },
    TaskSpec {
        task: Task::Task3,
        shape: TaskShape::PartMap,
        type_label: None,
        default_word_count: None,
        documents: false,
    },
];

const WRITTEN_TASKS: &[TaskSpec] = &[
    TaskSpec {
        task: Task::Task1,
        shape: TaskShape::EntryList,
        type_label: Some("message_personnel"),
        default_word_count: Some("60-120"),
        documents: false,
    },
    TaskSpec {
        task: Task::Task2,
        shape: TaskShape::EntryList,
        type_label: Some("article_blog"),
        default_word_count: Some("120-150"),
        documents: false,
    },
    TaskSpec {
        task: Task::Task3,
        shape: TaskShape::EntryList,
        type_label: Some("texte_argumentatif"),
        default_word_count: Some("120-180"),
        documents: true,
    },
];

impl PipelineKind {
    /// The pipeline's task table, in task order.
    pub(crate) fn tasks(self) -> &'static [TaskSpec] {
        match self {
            PipelineKind::Oral => ORAL_TASKS,
            PipelineKind::Written => WRITTEN_TASKS,
        }
    }
}

/// Extraction output for one file, with skip accounting.
#[derive(Debug, Default)]
pub(crate) struct Extraction {
    pub records: Vec<TopicRecord>,
    /// Malformed entries (wrong JSON type, missing content) skipped.
    pub entries_skipped: usize,
    /// Well-formed strings the cleaner rejected.
    pub topics_rejected: usize,
}

/// Extract all records from one parsed document.
///
/// Missing task keys contribute zero records. Malformed entries are skipped
/// and counted, never fatal. `Err` is returned only for a document whose
/// top-level shape is unusable; the caller records it as a file failure.
pub(crate) fn extract_file(
    doc: &Value,
    source_file: &str,
    kind: PipelineKind,
    config: &Config,
) -> Result<Extraction, String> {
    let Some(root) = doc.as_object() else {
        return Err("top-level value is not an object".to_string());
    };
    let source_url = root
        .get("source_url")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let topics = match root.get("topics") {
        None => return Ok(Extraction::default()),
        Some(Value::Object(map)) => map,
        Some(_) => return Err("\"topics\" is not an object".to_string()),
    };

    let mut extractor = Extractor {
        source_file,
        source_url,
        kind,
        config,
        out: Extraction::default(),
    };
    for spec in kind.tasks() {
        if let Some(value) = topics.get(spec.task.key()) {
            extractor.extract_task(spec, value);
        }
    }
    Ok(extractor.out)
}

/// Walk state for one document.
struct Extractor<'a> {
    source_file: &'a str,
    source_url: &'a str,
    kind: PipelineKind,
    config: &'a Config,
    out: Extraction,
}

impl Extractor<'_> {
    fn extract_task(&mut self, spec: &TaskSpec, value: &Value) {
        match spec.shape {
            TaskShape::PartMap => self.extract_part_map(spec, value),
            TaskShape::EntryList => self.extract_entry_list(spec, value),
        }
    }

    fn extract_part_map(&mut self, spec: &TaskSpec, value: &Value) {
        let Some(parts) = value.as_object() else {
            self.skip_entry(spec.task, "task value is not a part map");
            return;
        };
        for (part_label, part_topics) in parts {
            let Some(topics) = part_topics.as_array() else {
                self.skip_entry(spec.task, "part value is not a list");
                continue;
            };
            let part_number = part_number_from_label(part_label);
            for topic in topics {
                let Some(raw) = topic.as_str() else {
                    self.skip_entry(spec.task, "part entry is not a string");
                    continue;
                };
                let Some(content) = clean_topic(raw, self.kind, self.config) else {
                    self.out.topics_rejected += 1;
                    continue;
                };
                self.out.records.push(TopicRecord {
                    content,
                    source_url: self.source_url.to_string(),
                    source_file: self.source_file.to_string(),
                    task: spec.task,
                    part: Some(part_label.clone()),
                    part_number: Some(part_number),
                    word_count: None,
                    type_label: None,
                    documents: None,
                    combination: None,
                });
            }
        }
    }

    fn extract_entry_list(&mut self, spec: &TaskSpec, value: &Value) {
        let Some(entries) = value.as_array() else {
            self.skip_entry(spec.task, "task value is not a list");
            return;
        };
        for entry in entries {
            match entry {
                Value::Object(fields) => self.written_entry(spec, fields),
                // Some scraped editions carry bare strings instead of
                // structured entries.
                Value::String(content) => self.push_written(spec, content, None, None, None),
                _ => self.skip_entry(spec.task, "entry is neither object nor string"),
            }
        }
    }

    fn written_entry(&mut self, spec: &TaskSpec, fields: &Map<String, Value>) {
        let Some(content) = fields.get("content").and_then(Value::as_str) else {
            self.skip_entry(spec.task, "entry has no string \"content\"");
            return;
        };
        let word_count = fields.get("word_count").and_then(Value::as_str);
        let combination = fields
            .get("combination")
            .and_then(Value::as_str)
            .map(str::to_string);
        // Supporting documents are material for the candidate, not scraped
        // prose, and pass through without cleaning.
        let documents = if spec.documents {
            fields
                .get("documents")
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                })
                .filter(|docs| !docs.is_empty())
        } else {
            None
        };
        self.push_written(spec, content, word_count, combination, documents);
    }

    fn push_written(
        &mut self,
        spec: &TaskSpec,
        raw: &str,
        word_count: Option<&str>,
        combination: Option<String>,
        documents: Option<Vec<String>>,
    ) {
        let Some(content) = clean_topic(raw, self.kind, self.config) else {
            self.out.topics_rejected += 1;
            return;
        };
        self.out.records.push(TopicRecord {
            content,
            source_url: self.source_url.to_string(),
            source_file: self.source_file.to_string(),
            task: spec.task,
            part: None,
            part_number: None,
            word_count: word_count
                .or(spec.default_word_count)
                .map(str::to_string),
            type_label: spec.type_label.map(str::to_string),
            documents,
            combination,
        });
    }

    fn skip_entry(&mut self, task: Task, reason: &str) {
        debug!(file = self.source_file, %task, reason, "skipping malformed entry");
        self.out.entries_skipped += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VALID: &str = "Vous racontez à un ami un voyage qui vous a beaucoup plu.";

    fn extract(doc: &Value, kind: PipelineKind) -> Extraction {
        extract_file(doc, "mars-2025-expression-orale.json", kind, &Config::default()).unwrap()
    }

    #[test]
    fn test_oral_part_map() {
        let doc = json!({
            "source_url": "https://example.test/sujets",
            "topics": {
                "tache_2": { "partie_1": [VALID], "partie_2": [VALID] },
                "tache_3": { "partie_1": [VALID] }
            }
        });
        let extraction = extract(&doc, PipelineKind::Oral);
        assert_eq!(extraction.records.len(), 3);

        let first = &extraction.records[0];
        assert_eq!(first.task, Task::Task2);
        assert_eq!(first.part.as_deref(), Some("partie_1"));
        assert_eq!(first.part_number, Some(1));
        assert_eq!(first.source_url, "https://example.test/sujets");
        assert_eq!(first.source_file, "mars-2025-expression-orale.json");
        assert!(first.word_count.is_none());
    }

    #[test]
    fn test_oral_unparseable_part_number_is_zero() {
        let doc = json!({ "topics": { "tache_2": { "partie_finale": [VALID] } } });
        let extraction = extract(&doc, PipelineKind::Oral);
        assert_eq!(extraction.records[0].part_number, Some(0));
    }

    #[test]
    fn test_missing_task_keys_are_not_errors() {
        let doc = json!({ "topics": {} });
        let extraction = extract(&doc, PipelineKind::Oral);
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.entries_skipped, 0);
    }

    #[test]
    fn test_missing_topics_key_is_empty() {
        let doc = json!({ "source_url": "https://example.test" });
        let extraction = extract(&doc, PipelineKind::Written);
        assert!(extraction.records.is_empty());
    }

    #[test]
    fn test_wrong_top_level_shape() {
        assert!(extract_file(
            &json!([1, 2, 3]),
            "f.json",
            PipelineKind::Oral,
            &Config::default()
        )
        .is_err());
        assert!(extract_file(
            &json!({ "topics": [VALID] }),
            "f.json",
            PipelineKind::Oral,
            &Config::default()
        )
        .is_err());
    }

    #[test]
    fn test_malformed_entries_skipped_individually() {
        let doc = json!({
            "topics": {
                "tache_2": {
                    "partie_1": [VALID, 42, null],
                    "partie_2": "not a list"
                }
            }
        });
        let extraction = extract(&doc, PipelineKind::Oral);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.entries_skipped, 3);
    }

    #[test]
    fn test_written_entry_fields() {
        let doc = json!({
            "topics": {
                "tache_1": [
                    { "content": VALID, "combination": "Combinaison 2", "word_count": "60-120" }
                ],
                "tache_2": [ { "content": VALID } ],
                "tache_3": [
                    { "content": VALID, "documents": ["Doc A", "Doc B"] }
                ]
            }
        });
        let extraction = extract(&doc, PipelineKind::Written);
        assert_eq!(extraction.records.len(), 3);

        let task1 = &extraction.records[0];
        assert_eq!(task1.combination.as_deref(), Some("Combinaison 2"));
        assert_eq!(task1.word_count.as_deref(), Some("60-120"));
        assert_eq!(task1.type_label.as_deref(), Some("message_personnel"));

        // Declared word_count absent: per-task default applies.
        let task2 = &extraction.records[1];
        assert_eq!(task2.word_count.as_deref(), Some("120-150"));
        assert_eq!(task2.type_label.as_deref(), Some("article_blog"));
        assert!(task2.combination.is_none());

        let task3 = &extraction.records[2];
        assert_eq!(task3.word_count.as_deref(), Some("120-180"));
        assert_eq!(task3.type_label.as_deref(), Some("texte_argumentatif"));
        assert_eq!(
            task3.documents.as_deref(),
            Some(&["Doc A".to_string(), "Doc B".to_string()][..])
        );
    }

    #[test]
    fn test_written_bare_string_entries() {
        let doc = json!({ "topics": { "tache_2": [VALID] } });
        let extraction = extract(&doc, PipelineKind::Written);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].word_count.as_deref(), Some("120-150"));
    }

    #[test]
    fn test_written_entry_without_content_skipped() {
        let doc = json!({
            "topics": { "tache_1": [ { "combination": "Combinaison 1" }, 7 ] }
        });
        let extraction = extract(&doc, PipelineKind::Written);
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.entries_skipped, 2);
    }

    #[test]
    fn test_rejected_content_counts_but_keeps_going() {
        let doc = json!({
            "topics": { "tache_3": [
                { "content": "ok", "documents": ["Doc A", "Doc B"] },
                { "content": VALID }
            ] }
        });
        let extraction = extract(&doc, PipelineKind::Written);
        // Short "ok" is rejected; its documents never rescue it and are
        // never cleaned.
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.topics_rejected, 1);
        assert_eq!(extraction.records[0].content, VALID);
    }

    #[test]
    fn test_empty_documents_recorded_as_absent() {
        let doc = json!({
            "topics": { "tache_3": [ { "content": VALID, "documents": [] } ] }
        });
        let extraction = extract(&doc, PipelineKind::Written);
        assert!(extraction.records[0].documents.is_none());
    }

    #[test]
    fn test_documents_kept_verbatim() {
        // A document string that the cleaner would reject as boilerplate
        // still passes through untouched.
        let noisy_doc = "  Document   1 :  Mentions Légales  ";
        let doc = json!({
            "topics": { "tache_3": [ { "content": VALID, "documents": [noisy_doc] } ] }
        });
        let extraction = extract(&doc, PipelineKind::Written);
        assert_eq!(
            extraction.records[0].documents.as_deref(),
            Some(&[noisy_doc.to_string()][..])
        );
    }
}

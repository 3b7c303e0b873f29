//! Pipeline orchestration: discovery, aggregation, queries, export.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::dedup::dedup_file_records;
use crate::error::TopicsError;
use crate::extract::extract_file;
use crate::months;
use crate::record::{Task, TopicRecord};
use crate::{Config, PipelineKind};

/// A source file the loader had to skip, with the reason.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub file: String,
    pub reason: String,
}

/// Accounting for one `load_all_topics` run. Every skip is visible here.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Files successfully parsed and extracted, newest first.
    pub files_processed: Vec<String>,
    /// Files skipped because they could not be read or parsed.
    pub failed_files: Vec<FileFailure>,
    /// Malformed entries skipped inside otherwise-good files.
    pub entries_skipped: usize,
    /// Strings the cleaner rejected as too short or boilerplate.
    pub topics_rejected: usize,
    /// In-file duplicates removed.
    pub duplicates_removed: usize,
    /// Records aggregated across all tasks.
    pub total_topics: usize,
}

/// Loads, organizes, and exports one pipeline's topics.
///
/// All aggregated records live in memory for the lifetime of the organizer;
/// re-running `load_all_topics` reprocesses every source file from scratch.
pub struct TopicOrganizer {
    kind: PipelineKind,
    input_dir: PathBuf,
    config: Config,
    /// Aggregated records, one slot per task.
    buckets: [Vec<TopicRecord>; 3],
    report: LoadReport,
}

impl TopicOrganizer {
    pub fn new(kind: PipelineKind, input_dir: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            kind,
            input_dir: input_dir.into(),
            config,
            buckets: Default::default(),
            report: LoadReport::default(),
        }
    }

    pub fn kind(&self) -> PipelineKind {
        self.kind
    }

    /// Accounting for the most recent load.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Discover, parse, extract, dedup, and aggregate all topic files.
    ///
    /// Files are processed newest first (per the date in their name), and
    /// records are aggregated in file-then-extraction order. Only an
    /// unreadable input directory is fatal; every other problem is recorded
    /// in the returned [`LoadReport`] and processing continues.
    pub fn load_all_topics(&mut self) -> Result<&LoadReport, TopicsError> {
        self.buckets = Default::default();
        self.report = LoadReport::default();

        let files = self.discover_files()?;
        info!(
            count = files.len(),
            dir = %self.input_dir.display(),
            "processing topic files newest first"
        );
        for file in &files {
            self.process_file(file);
        }
        self.report.total_topics = self.buckets.iter().map(Vec::len).sum();
        Ok(&self.report)
    }

    fn discover_files(&self) -> Result<Vec<String>, TopicsError> {
        let dir_error = |source| TopicsError::DirUnreadable {
            path: self.input_dir.clone(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.input_dir).map_err(dir_error)? {
            let entry = entry.map_err(dir_error)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.ends_with(self.kind.file_suffix()) {
                files.push(name.to_string());
            }
        }
        // read_dir order is platform-dependent; fix it before the date sort
        // so files with equal dates resolve the same way on every run.
        files.sort();
        months::sort_newest_first(&mut files);
        Ok(files)
    }

    fn process_file(&mut self, file: &str) {
        let path = self.input_dir.join(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                self.fail_file(file, format!("read failed: {e}"));
                return;
            }
        };
        let doc: Value = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                self.fail_file(file, format!("invalid JSON: {e}"));
                return;
            }
        };
        let extraction = match extract_file(&doc, file, self.kind, &self.config) {
            Ok(extraction) => extraction,
            Err(reason) => {
                self.fail_file(file, reason);
                return;
            }
        };

        let (records, duplicates) = dedup_file_records(extraction.records);
        debug!(
            file,
            topics = records.len(),
            rejected = extraction.topics_rejected,
            duplicates,
            "extracted"
        );
        self.report.entries_skipped += extraction.entries_skipped;
        self.report.topics_rejected += extraction.topics_rejected;
        self.report.duplicates_removed += duplicates;
        for record in records {
            self.buckets[record.task.index()].push(record);
        }
        self.report.files_processed.push(file.to_string());
    }

    fn fail_file(&mut self, file: &str, reason: String) {
        warn!(file, %reason, "skipping topics file");
        self.report.failed_files.push(FileFailure {
            file: file.to_string(),
            reason,
        });
    }

    /// All aggregated records for one task, in file-then-extraction order.
    pub fn topics(&self, task: Task) -> &[TopicRecord] {
        &self.buckets[task.index()]
    }

    /// Alias for [`TopicOrganizer::topics`] matching the written pipeline's
    /// query vocabulary.
    pub fn topics_by_task(&self, task: Task) -> &[TopicRecord] {
        self.topics(task)
    }

    /// Records of `task` extracted from the given source file; empty when
    /// the file is unknown.
    pub fn topics_by_source(&self, task: Task, source_file: &str) -> Vec<&TopicRecord> {
        self.topics(task)
            .iter()
            .filter(|record| record.source_file == source_file)
            .collect()
    }

    /// Oral grouping query: records of `task` whose part number matches.
    pub fn topics_by_part(&self, task: Task, part_number: u32) -> Vec<&TopicRecord> {
        self.topics(task)
            .iter()
            .filter(|record| record.part_number == Some(part_number))
            .collect()
    }

    /// Serialize the summary and all aggregated records to `path`.
    ///
    /// The document is written to a sibling temp file first and renamed into
    /// place, so a failure partway through leaves any previous export
    /// untouched.
    pub fn export_organized_topics(&self, path: impl AsRef<Path>) -> Result<(), TopicsError> {
        let path = path.as_ref();
        let export_error = |source| TopicsError::ExportFailed {
            path: path.to_path_buf(),
            source,
        };

        let written = self.kind == PipelineKind::Written;
        let doc = ExportDoc {
            summary: ExportSummary {
                total_files_processed: self.report.files_processed.len(),
                total_topics: self.report.total_topics,
                task1_topics_count: written.then(|| self.buckets[0].len()),
                task2_topics_count: self.buckets[1].len(),
                task3_topics_count: self.buckets[2].len(),
                files_processed: &self.report.files_processed,
            },
            task1_topics: written.then(|| self.buckets[0].as_slice()),
            task2_topics: &self.buckets[1],
            task3_topics: &self.buckets[2],
        };

        let tmp = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp).map_err(export_error)?;
        if let Err(e) = serde_json::to_writer_pretty(&mut file, &doc) {
            let _ = fs::remove_file(&tmp);
            return Err(export_error(e.into()));
        }
        file.flush().map_err(export_error)?;
        drop(file);
        fs::rename(&tmp, path).map_err(export_error)?;
        info!(path = %path.display(), topics = self.report.total_topics, "exported organized topics");
        Ok(())
    }

    /// Print the first `sample_size` topics of each task to stdout.
    pub fn display_sample_topics(&self, sample_size: usize) {
        for spec in self.kind.tasks() {
            let records = self.topics(spec.task);
            println!("\n{} sample ({} total):", spec.task, records.len());
            for (i, record) in records.iter().take(sample_size).enumerate() {
                let preview: String = record.content.chars().take(200).collect();
                let ellipsis = if record.content.chars().count() > 200 {
                    "..."
                } else {
                    ""
                };
                match &record.part {
                    Some(part) => println!(
                        "{}. [{} - {}]\n   {preview}{ellipsis}",
                        i + 1,
                        record.source_file,
                        part
                    ),
                    None => println!("{}. [{}]\n   {preview}{ellipsis}", i + 1, record.source_file),
                }
                if let Some(docs) = &record.documents {
                    println!("   {} supporting document(s)", docs.len());
                }
            }
        }
    }
}

#[derive(Serialize)]
struct ExportSummary<'a> {
    total_files_processed: usize,
    total_topics: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    task1_topics_count: Option<usize>,
    task2_topics_count: usize,
    task3_topics_count: usize,
    files_processed: &'a [String],
}

#[derive(Serialize)]
struct ExportDoc<'a> {
    summary: ExportSummary<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    task1_topics: Option<&'a [TopicRecord]>,
    task2_topics: &'a [TopicRecord],
    task3_topics: &'a [TopicRecord],
}

//! In-file duplicate removal.

use std::collections::HashSet;

use crate::record::{Task, TopicRecord};

/// Drop records whose content repeats an earlier record in the same
/// (task, part) group, keeping the first occurrence and the relative order.
///
/// Callers pass the extraction output of a single source file: the same
/// content in two different files, or two different parts, is meaningful
/// repetition and is kept. Returns the surviving records and the number
/// removed.
pub(crate) fn dedup_file_records(records: Vec<TopicRecord>) -> (Vec<TopicRecord>, usize) {
    let mut seen: HashSet<(Task, Option<String>, String)> = HashSet::new();
    let mut kept = Vec::with_capacity(records.len());
    let mut removed = 0;
    for record in records {
        let key = (record.task, record.part.clone(), record.content.clone());
        if seen.insert(key) {
            kept.push(record);
        } else {
            removed += 1;
        }
    }
    (kept, removed)
}

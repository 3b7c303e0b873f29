use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline errors.
///
/// Per-file parse failures and malformed entries are skips recorded in
/// [`crate::LoadReport`], not errors; only problems that make the whole run
/// meaningless surface here.
#[derive(Debug, Error)]
pub enum TopicsError {
    #[error("cannot read topics directory {path}: {source}")]
    DirUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write export file {path}: {source}")]
    ExportFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

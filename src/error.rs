use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the parsing and aggregation pipeline.
///
/// Structural problems in a summary file abort report generation for that
/// dataset; a partial aggregate over garbage input is never produced.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("log file not found: {}", path.display())]
    LogFileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed log entry at {}:{line}: {reason}", file.display())]
    MalformedLogEntry {
        file: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("malformed result entry at {}:{line}: {reason}", file.display())]
    MalformedResultEntry {
        file: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("baseline and variant runs share no filenames")]
    EmptyJoinResult,

    #[error("no record carries keyword '{0}'")]
    NoDataForKeyword(String),

    #[error("unknown outcome '{0}'")]
    UnknownOutcome(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

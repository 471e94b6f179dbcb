//! Parsers for the two batch summary files.
//!
//! Both share the same line-pair shape: a header line starting with `/`
//! whose last path segment names the input file, then one data line. The
//! keyword summary's data line is whitespace-separated `keyword:value`
//! tokens; the result summary's data line is a bracketed literal whose
//! last two elements are the elapsed seconds and the outcome string.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;

use crate::error::BenchError;
use crate::logs::literal::{parse_literal, Value};
use crate::record::{ResultRecord, RunRecord};

fn open_log(path: &Path) -> Result<BufReader<File>, BenchError> {
    match File::open(path) {
        Ok(f) => Ok(BufReader::new(f)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(BenchError::LogFileNotFound {
            path: path.to_path_buf(),
            source: e,
        }),
        Err(e) => Err(BenchError::Io(e)),
    }
}

/// Last path segment of a header line.
fn header_filename(line: &str) -> String {
    let trimmed = line.trim_end();
    trimmed.rsplit('/').next().unwrap_or(trimmed).to_string()
}

/// Reads every line pair of a keyword summary into [`RunRecord`]s.
///
/// Any token without a colon, or with a non-integer value, aborts the
/// parse.
pub fn parse_run_records(path: &Path) -> Result<Vec<RunRecord>, BenchError> {
    let reader = open_log(path)?;
    let mut records = Vec::new();
    let mut lines = reader.lines().enumerate();

    while let Some((header_idx, line)) = lines.next() {
        let line = line?;
        if !line.starts_with('/') {
            continue;
        }
        let filename = header_filename(&line);
        let (data_idx, data) = match lines.next() {
            Some((i, l)) => (i, l?),
            None => {
                return Err(BenchError::MalformedLogEntry {
                    file: path.to_path_buf(),
                    line: header_idx + 1,
                    reason: "header line without a data line".to_string(),
                })
            }
        };

        let mut metrics = IndexMap::new();
        for token in data.split_whitespace() {
            let (keyword, value) =
                token
                    .split_once(':')
                    .ok_or_else(|| BenchError::MalformedLogEntry {
                        file: path.to_path_buf(),
                        line: data_idx + 1,
                        reason: format!("token '{token}' is missing ':'"),
                    })?;
            let value: i64 = value.parse().map_err(|_| BenchError::MalformedLogEntry {
                file: path.to_path_buf(),
                line: data_idx + 1,
                reason: format!("value in '{token}' is not an integer"),
            })?;
            metrics.insert(keyword.to_string(), value);
        }
        records.push(RunRecord { filename, metrics });
    }
    Ok(records)
}

/// Reads every line pair of a result summary into [`ResultRecord`]s.
pub fn parse_result_records(path: &Path) -> Result<Vec<ResultRecord>, BenchError> {
    let reader = open_log(path)?;
    let mut records = Vec::new();
    let mut lines = reader.lines().enumerate();

    while let Some((header_idx, line)) = lines.next() {
        let line = line?;
        if !line.starts_with('/') {
            continue;
        }
        let filename = header_filename(&line);
        let (data_idx, data) = match lines.next() {
            Some((i, l)) => (i, l?),
            None => {
                return Err(BenchError::MalformedResultEntry {
                    file: path.to_path_buf(),
                    line: header_idx + 1,
                    reason: "header line without a data line".to_string(),
                })
            }
        };

        let malformed = |reason: String| BenchError::MalformedResultEntry {
            file: path.to_path_buf(),
            line: data_idx + 1,
            reason,
        };

        let items = match parse_literal(&data) {
            Ok(Value::List(items)) => items,
            Ok(_) => return Err(malformed("expected a bracketed list".to_string())),
            Err(reason) => return Err(malformed(reason)),
        };
        if items.len() < 2 {
            return Err(malformed(format!(
                "expected at least two elements, found {}",
                items.len()
            )));
        }
        let seconds = items[items.len() - 2]
            .as_f64()
            .ok_or_else(|| malformed("second-to-last element is not a number".to_string()))?;
        let outcome = items[items.len() - 1]
            .as_str()
            .ok_or_else(|| malformed("last element is not a string".to_string()))?
            .to_string();

        records.push(ResultRecord {
            filename,
            seconds,
            outcome,
        });
    }
    Ok(records)
}

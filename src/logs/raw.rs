//! The flat per-run log a solver run leaves behind.
//!
//! Layout: one summary line, a bracketed literal list whose last two
//! elements are the elapsed seconds and the outcome string, followed by one
//! block per counter series:
//!
//! ```text
//! [912, 444, 1208, 31, 19, 845.2, 'SAT']
//! restarts:
//! 1,4,9
//!
//! restarts_time:
//! 0.3,12.9,120.4
//!
//! ```
//!
//! The writer exists for the solver-side collaborator and for fixtures; the
//! readers feed the extraction stage.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use log::warn;

/// Name of the raw log inside a run folder; fixed by the solver side.
pub const RAW_LOG_FILE: &str = "rawData.txt";

/// One named counter series sampled during a run, with the solver's
/// timestamp for each sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<i64>,
    pub times: Vec<f64>,
}

/// The run header values, serialized as the log's first line.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub clauses_at_start: i64,
    pub clauses_at_end: i64,
    pub num_variables: i64,
    pub longest_clause: i64,
    pub longest_learnt_clause: i64,
    pub seconds: f64,
    pub outcome: String,
}

impl RunSummary {
    pub fn to_line(&self) -> String {
        format!(
            "[{}, {}, {}, {}, {}, {}, '{}']",
            self.clauses_at_start,
            self.clauses_at_end,
            self.num_variables,
            self.longest_clause,
            self.longest_learnt_clause,
            self.seconds,
            self.outcome
        )
    }
}

/// Writes a complete raw log. Each series becomes two blocks, the values
/// and their timestamps under `<name>_time`.
pub fn write_raw_log(path: &Path, summary: &RunSummary, series: &[Series]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{}", summary.to_line())?;
    for s in series {
        writeln!(out, "{}:", s.name)?;
        writeln!(out, "{}", join_values(&s.values))?;
        writeln!(out)?;
        writeln!(out, "{}_time:", s.name)?;
        writeln!(out, "{}", join_times(&s.times))?;
        writeln!(out)?;
    }
    out.flush()
}

fn join_values(values: &[i64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn join_times(times: &[f64]) -> String {
    times
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// First line of the raw log, `None` when the file is empty.
pub fn first_line(path: &Path) -> std::io::Result<Option<String>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = String::new();
    let n = reader.read_line(&mut line)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Final value of every requested counter series, in order of appearance.
///
/// A series block is recognized by a line that is exactly `<keyword>:`;
/// the following line holds the comma-joined samples and the last sample
/// is the counter's final value. A sample that does not parse is skipped
/// with a warning rather than aborting the run's extraction.
pub fn keyword_finals(path: &Path, keywords: &[&str]) -> std::io::Result<IndexMap<String, i64>> {
    let text = fs::read_to_string(path)?;
    let lines: Vec<&str> = text.lines().collect();
    let mut finals = IndexMap::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(keyword) = line.strip_suffix(':') else {
            continue;
        };
        if !keywords.contains(&keyword) {
            continue;
        }
        let Some(samples) = lines.get(idx + 1) else {
            warn!("{}: series '{keyword}' has no sample line", path.display());
            continue;
        };
        let Some(last) = samples.rsplit(',').next() else {
            continue;
        };
        match last.trim().parse::<i64>() {
            Ok(v) => {
                finals.insert(keyword.to_string(), v);
            }
            Err(_) => {
                warn!(
                    "{}: series '{keyword}' ends in non-numeric sample '{last}'",
                    path.display()
                );
            }
        }
    }
    Ok(finals)
}

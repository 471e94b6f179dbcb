//! Builds the batch summary files from the per-run raw logs.
//!
//! Walks each run folder of a configuration, takes the raw log's first
//! line for the result summary and the final value of every counter series
//! for the keyword summary. A run without a readable raw log is skipped
//! with a warning.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::layout::{Configuration, Workspace};
use crate::logs::raw::{self, RAW_LOG_FILE};
use crate::record::KEYWORDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStats {
    pub runs: usize,
    pub skipped: usize,
}

/// Writes both summary files for one configuration and reports how many
/// runs contributed.
pub fn extract_summaries(ws: &Workspace, config: Configuration) -> Result<ExtractStats> {
    let run_dirs = collect_run_dirs(ws, config)?;

    let result_path = ws.result_summary(config);
    let keyword_path = ws.keyword_summary(config);
    let mut results = BufWriter::new(
        File::create(&result_path)
            .with_context(|| format!("creating {}", result_path.display()))?,
    );
    let mut keywords = BufWriter::new(
        File::create(&keyword_path)
            .with_context(|| format!("creating {}", keyword_path.display()))?,
    );

    let mut stats = ExtractStats {
        runs: 0,
        skipped: 0,
    };
    for dir in run_dirs {
        let raw_path = dir.join(RAW_LOG_FILE);
        let header = dir.to_string_lossy();

        let line = match raw::first_line(&raw_path) {
            Ok(Some(line)) => line,
            Ok(None) => {
                warn!("{}: raw log is empty, run skipped", raw_path.display());
                stats.skipped += 1;
                continue;
            }
            Err(e) => {
                warn!("{}: raw log unreadable ({e}), run skipped", raw_path.display());
                stats.skipped += 1;
                continue;
            }
        };
        writeln!(results, "{header}")?;
        writeln!(results, "{line}")?;

        let finals = raw::keyword_finals(&raw_path, &KEYWORDS)?;
        let tokens = finals
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(keywords, "{header}")?;
        writeln!(keywords, "{tokens}")?;

        stats.runs += 1;
    }
    results.flush()?;
    keywords.flush()?;

    info!(
        "extracted {} runs for {} ({} skipped)",
        stats.runs,
        config.label(),
        stats.skipped
    );
    Ok(stats)
}

/// Run folders of a configuration, sorted for a stable summary order.
fn collect_run_dirs(ws: &Workspace, config: Configuration) -> Result<Vec<PathBuf>> {
    // Summary header lines must be absolute paths for the parsers to
    // recognize them, whatever root the workspace was given.
    let data_dir = ws.data_dir(config);
    let data_dir = fs::canonicalize(&data_dir).unwrap_or(data_dir);
    let mut dirs = Vec::new();
    let entries = fs::read_dir(&data_dir)
        .with_context(|| format!("reading run data in {}", data_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

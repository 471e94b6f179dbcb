//! Joining, averaging, and categorizing parsed records.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::error::BenchError;
use crate::record::{Outcome, ResultRecord, RunRecord, TimedResult, KEYWORDS, TIMEOUT_SECS};

/// Records joined across the two configurations by source filename.
pub trait Keyed {
    fn filename(&self) -> &str;
}

impl Keyed for RunRecord {
    fn filename(&self) -> &str {
        &self.filename
    }
}

impl Keyed for ResultRecord {
    fn filename(&self) -> &str {
        &self.filename
    }
}

impl Keyed for TimedResult {
    fn filename(&self) -> &str {
        &self.filename
    }
}

#[derive(Debug, Clone)]
pub struct Joined<T> {
    pub baseline: Vec<T>,
    pub variant: Vec<T>,
    /// Names present in only one configuration, dropped from both sides.
    pub dropped: Vec<String>,
}

/// Intersection by filename: keeps only records whose filename occurs in
/// both sequences. One-sided records are dropped and their names returned
/// for the caller to surface. An empty intersection is fatal before any
/// averaging can divide by zero.
pub fn join_filter<T: Keyed + Clone>(
    baseline: &[T],
    variant: &[T],
) -> Result<Joined<T>, BenchError> {
    let baseline_names: HashSet<&str> = baseline.iter().map(Keyed::filename).collect();
    let variant_names: HashSet<&str> = variant.iter().map(Keyed::filename).collect();

    let kept_baseline: Vec<T> = baseline
        .iter()
        .filter(|r| variant_names.contains(r.filename()))
        .cloned()
        .collect();
    let kept_variant: Vec<T> = variant
        .iter()
        .filter(|r| baseline_names.contains(r.filename()))
        .cloned()
        .collect();

    if kept_baseline.is_empty() {
        return Err(BenchError::EmptyJoinResult);
    }

    let mut dropped: Vec<String> = baseline
        .iter()
        .filter(|r| !variant_names.contains(r.filename()))
        .chain(variant.iter().filter(|r| !baseline_names.contains(r.filename())))
        .map(|r| r.filename().to_string())
        .collect();
    dropped.dedup();

    Ok(Joined {
        baseline: kept_baseline,
        variant: kept_variant,
        dropped,
    })
}

/// Values of one keyword across a record set. Records lacking the keyword
/// contribute nothing; they are not zeros.
pub fn values_for_keyword(keyword: &str, records: &[RunRecord]) -> Vec<i64> {
    records.iter().filter_map(|r| r.metric(keyword)).collect()
}

/// Floor average of a keyword over the records that carry it.
pub fn average(keyword: &str, records: &[RunRecord]) -> Result<i64, BenchError> {
    let values = values_for_keyword(keyword, records);
    if values.is_empty() {
        return Err(BenchError::NoDataForKeyword(keyword.to_string()));
    }
    let sum: i64 = values.iter().sum();
    Ok(sum.div_euclid(values.len() as i64))
}

/// Per-keyword averages for one configuration, in vocabulary order.
pub fn average_table(records: &[RunRecord]) -> Result<IndexMap<String, i64>, BenchError> {
    KEYWORDS
        .iter()
        .map(|kw| average(kw, records).map(|a| (kw.to_string(), a)))
        .collect()
}

/// Result records bucketed by outcome.
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    pub sat: Vec<TimedResult>,
    pub unsat: Vec<TimedResult>,
    pub indeterminate: Vec<TimedResult>,
}

impl Buckets {
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.sat.len(), self.unsat.len(), self.indeterminate.len())
    }

    /// Union of all buckets, sorted ascending by time.
    pub fn all_sorted(&self) -> Vec<TimedResult> {
        let union: Vec<TimedResult> = self
            .sat
            .iter()
            .chain(self.unsat.iter())
            .chain(self.indeterminate.iter())
            .cloned()
            .collect();
        sort_by_time(&union)
    }
}

/// Buckets each record by outcome. Indeterminate times are clamped to the
/// run timeout before entering any bucket; an outcome string outside the
/// vocabulary is fatal rather than silently dropped.
pub fn categorize(records: &[ResultRecord]) -> Result<Buckets, BenchError> {
    let mut buckets = Buckets::default();
    for record in records {
        let outcome = Outcome::parse(&record.outcome)?;
        let seconds = match outcome {
            Outcome::Indeterminate => TIMEOUT_SECS,
            _ => record.seconds,
        };
        let timed = TimedResult {
            filename: record.filename.clone(),
            seconds,
            outcome,
        };
        match outcome {
            Outcome::Sat => buckets.sat.push(timed),
            Outcome::Unsat => buckets.unsat.push(timed),
            Outcome::Indeterminate => buckets.indeterminate.push(timed),
        }
    }
    Ok(buckets)
}

/// Ascending by time; ties keep their original relative order.
pub fn sort_by_time(results: &[TimedResult]) -> Vec<TimedResult> {
    let mut out = results.to_vec();
    out.sort_by(|a, b| a.seconds.total_cmp(&b.seconds));
    out
}

pub fn total_seconds(results: &[TimedResult]) -> f64 {
    results.iter().map(|r| r.seconds).sum()
}

/// Per-file time pair across the two configurations.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedTimes {
    pub filename: String,
    pub baseline_secs: f64,
    pub variant_secs: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Pairing {
    pub pairs: Vec<PairedTimes>,
    /// Baseline names with no variant counterpart; tolerated, not fatal.
    pub unmatched: Vec<String>,
}

/// Matches each baseline result with the variant time for the same file,
/// preserving the baseline order. Unlike the join-filter, a missing
/// counterpart here is expected partial data and only recorded.
pub fn pair_by_name(baseline: &[TimedResult], variant: &[TimedResult]) -> Pairing {
    let variant_times: HashMap<&str, f64> = variant
        .iter()
        .map(|r| (r.filename.as_str(), r.seconds))
        .collect();

    let mut pairing = Pairing::default();
    let mut seen = HashSet::new();
    for record in baseline {
        if !seen.insert(record.filename.as_str()) {
            continue;
        }
        match variant_times.get(record.filename.as_str()) {
            Some(&variant_secs) => pairing.pairs.push(PairedTimes {
                filename: record.filename.clone(),
                baseline_secs: record.seconds,
                variant_secs,
            }),
            None => pairing.unmatched.push(record.filename.clone()),
        }
    }
    pairing
}

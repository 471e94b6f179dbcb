//! Renders the aggregate table and comparison charts from the summary
//! files.
//!
//! Consumes what the aggregator guarantees: two average tables, two sets
//! of category buckets, and the cross-configuration pairing. Every
//! filename the join-filter or the pairing drops is reported.

pub mod svg;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::warn;

use crate::aggregate::{self, Buckets, PairedTimes};
use crate::layout::{Configuration, Workspace};
use crate::logs::summary::{parse_result_records, parse_run_records};
use crate::record::{RunRecord, TimedResult, KEYWORDS, TIMEOUT_SECS};
use self::svg::PlotSeries;

const BASELINE_COLOR: &str = "green";
const VARIANT_COLOR: &str = "blue";

#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub artifacts: Vec<PathBuf>,
    pub dropped: usize,
    pub unmatched: usize,
}

/// Full report generation: keyword averages and charts, result bar
/// charts, cactus plots, and the paired per-file comparison.
pub fn generate(ws: &Workspace) -> Result<ReportSummary> {
    ws.ensure()?;
    let mut artifacts = Vec::new();

    // Keyword pipeline: averages over the common file set only.
    let baseline_runs = parse_run_records(&ws.keyword_summary(Configuration::Baseline))?;
    let variant_runs = parse_run_records(&ws.keyword_summary(Configuration::Bdd))?;
    let joined = aggregate::join_filter(&baseline_runs, &variant_runs)?;
    for name in &joined.dropped {
        warn!("keyword comparison drops {name}: present in one configuration only");
    }
    let variant_table = aggregate::average_table(&joined.variant)?;
    let baseline_table = aggregate::average_table(&joined.baseline)?;
    artifacts.extend(write_mean_table(ws, &variant_table, &baseline_table)?);
    artifacts.extend(render_keyword_charts(ws, &joined.variant, &joined.baseline)?);

    // Result pipeline: categorize, then compare times.
    let baseline_results = parse_result_records(&ws.result_summary(Configuration::Baseline))?;
    let variant_results = parse_result_records(&ws.result_summary(Configuration::Bdd))?;
    let variant_buckets = aggregate::categorize(&variant_results)?;
    let baseline_buckets = aggregate::categorize(&baseline_results)?;
    let variant_all = variant_buckets.all_sorted();
    let baseline_all = baseline_buckets.all_sorted();

    artifacts.push(render_result_bars(ws, Configuration::Bdd, &variant_buckets)?);
    artifacts.push(render_result_bars(ws, Configuration::Baseline, &baseline_buckets)?);
    artifacts.push(render_cactus(ws, &variant_all, &baseline_all)?);
    artifacts.push(render_outcome_comparison(
        ws,
        "sat_time_comparison",
        "SAT files time comparison",
        &aggregate::sort_by_time(&baseline_buckets.sat),
        &variant_all,
    )?);
    artifacts.push(render_outcome_comparison(
        ws,
        "unsat_time_comparison",
        "UNSAT files time comparison",
        &aggregate::sort_by_time(&baseline_buckets.unsat),
        &variant_all,
    )?);

    let pairing = aggregate::pair_by_name(&baseline_all, &variant_all);
    for name in &pairing.unmatched {
        warn!("no matching run in the other configuration: {name}");
    }
    artifacts.push(render_paired(ws, &pairing.pairs)?);

    Ok(ReportSummary {
        artifacts,
        dropped: joined.dropped.len(),
        unmatched: pairing.unmatched.len(),
    })
}

fn write_mean_table(
    ws: &Workspace,
    variant_table: &IndexMap<String, i64>,
    baseline_table: &IndexMap<String, i64>,
) -> Result<Vec<PathBuf>> {
    let mut text = format!("{:<20} {:>15} {:>15}\n", "keyword", "bdd", "baseline");
    let mut cells = Vec::new();
    for keyword in KEYWORDS {
        let variant = variant_table.get(keyword).copied().unwrap_or(0);
        let baseline = baseline_table.get(keyword).copied().unwrap_or(0);
        text.push_str(&format!(
            "{keyword:<20} {:>15} {:>15}\n",
            group_thousands(variant),
            group_thousands(baseline)
        ));
        cells.push(vec![group_thousands(variant), group_thousands(baseline)]);
    }
    print!("{text}");

    let txt_path = ws.mean_table_txt();
    fs::write(&txt_path, &text).with_context(|| format!("writing {}", txt_path.display()))?;

    let svg_path = ws.mean_table_svg();
    svg::table_image(
        &svg_path,
        "Average counter values",
        &["bdd", "baseline"],
        &KEYWORDS,
        &cells,
    )
    .with_context(|| format!("writing {}", svg_path.display()))?;
    Ok(vec![txt_path, svg_path])
}

/// One chart per keyword: each configuration's values sorted ascending,
/// plotted against their rank.
fn render_keyword_charts(
    ws: &Workspace,
    variant: &[RunRecord],
    baseline: &[RunRecord],
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for keyword in KEYWORDS {
        let mut variant_values = aggregate::values_for_keyword(keyword, variant);
        let mut baseline_values = aggregate::values_for_keyword(keyword, baseline);
        variant_values.sort_unstable();
        baseline_values.sort_unstable();

        let path = ws.keyword_plots_dir().join(format!("{keyword}.svg"));
        svg::line_chart(
            &path,
            keyword,
            "Solved files",
            keyword,
            &[
                ranked_series("bdd", VARIANT_COLOR, &variant_values),
                ranked_series("baseline", BASELINE_COLOR, &baseline_values),
            ],
        )
        .with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn ranked_series(label: &str, color: &str, values: &[i64]) -> PlotSeries {
    PlotSeries {
        label: label.to_string(),
        color: color.to_string(),
        points: values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v as f64))
            .collect(),
    }
}

fn render_result_bars(
    ws: &Workspace,
    config: Configuration,
    buckets: &Buckets,
) -> Result<PathBuf> {
    let (sat, unsat, indeterminate) = buckets.counts();
    let total_minutes = aggregate::total_seconds(&buckets.all_sorted()) as i64 / 60;
    let path = ws
        .plots_dir()
        .join(format!("results_{}.svg", config.label()));
    svg::bar_chart(
        &path,
        &format!(
            "{} results, total solve time {} min",
            config.label(),
            total_minutes
        ),
        &["SAT", "UNSAT", "INDETERMINATE"],
        &[sat, unsat, indeterminate],
    )
    .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Classic cactus plot: each configuration's times sorted ascending
/// against the number of instances solved within that time.
fn render_cactus(
    ws: &Workspace,
    variant_all: &[TimedResult],
    baseline_all: &[TimedResult],
) -> Result<PathBuf> {
    let path = ws.plots_dir().join("cactus_plot.svg");
    svg::line_chart(
        &path,
        "Solve time distribution",
        "Solved instances",
        "Time taken in sec",
        &[
            timed_series("bdd", VARIANT_COLOR, variant_all),
            timed_series("baseline", BASELINE_COLOR, baseline_all),
        ],
    )
    .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn timed_series(label: &str, color: &str, results: &[TimedResult]) -> PlotSeries {
    PlotSeries {
        label: label.to_string(),
        color: color.to_string(),
        points: results
            .iter()
            .enumerate()
            .map(|(i, r)| (i as f64, r.seconds))
            .collect(),
    }
}

/// Times of one outcome bucket next to the other configuration's times
/// for the same files.
fn render_outcome_comparison(
    ws: &Workspace,
    stem: &str,
    title: &str,
    baseline_bucket: &[TimedResult],
    variant_all: &[TimedResult],
) -> Result<PathBuf> {
    let pairing = aggregate::pair_by_name(baseline_bucket, variant_all);
    for name in &pairing.unmatched {
        warn!("{title}: no matching run for {name}");
    }
    let path = ws.plots_dir().join(format!("{stem}.svg"));
    svg::line_chart(
        &path,
        title,
        "Solved instance",
        "Time taken in sec",
        &[
            paired_series("bdd", VARIANT_COLOR, &pairing.pairs, |p| p.variant_secs),
            paired_series("baseline", BASELINE_COLOR, &pairing.pairs, |p| {
                p.baseline_secs
            }),
        ],
    )
    .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Per-file comparison: both configurations' times for the same formula
/// share an x position, clamped at the run timeout.
fn render_paired(ws: &Workspace, pairs: &[PairedTimes]) -> Result<PathBuf> {
    let path = ws.plots_dir().join("paired_times.svg");
    svg::line_chart(
        &path,
        "Per-file time comparison",
        "Solved instance",
        "Time taken in sec",
        &[
            paired_series("bdd", VARIANT_COLOR, pairs, |p| {
                p.variant_secs.min(TIMEOUT_SECS)
            }),
            paired_series("baseline", BASELINE_COLOR, pairs, |p| {
                p.baseline_secs.min(TIMEOUT_SECS)
            }),
        ],
    )
    .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn paired_series(
    label: &str,
    color: &str,
    pairs: &[PairedTimes],
    time: impl Fn(&PairedTimes) -> f64,
) -> PlotSeries {
    PlotSeries {
        label: label.to_string(),
        color: color.to_string(),
        points: pairs
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, time(p)))
            .collect(),
    }
}

fn group_thousands(v: i64) -> String {
    let digits = v.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if v < 0 {
        format!("-{out}")
    } else {
        out
    }
}

use std::fs;
use std::path::PathBuf;

use satbench::error::BenchError;
use satbench::layout::{Configuration, Workspace};
use satbench::logs::extract::extract_summaries;
use satbench::logs::raw::{write_raw_log, RunSummary, Series, RAW_LOG_FILE};
use satbench::record::KEYWORDS;
use satbench::report;

/// Seeds one solver run with every counter series present, the way a
/// complete solver log looks.
fn seed_run(ws: &Workspace, config: Configuration, name: &str, seconds: f64, outcome: &str) {
    let dir = ws.run_dir(config, name);
    fs::create_dir_all(&dir).expect("mkdir run");

    let summary = RunSummary {
        clauses_at_start: 500,
        clauses_at_end: 320,
        num_variables: 100,
        longest_clause: 12,
        longest_learnt_clause: 30,
        seconds,
        outcome: outcome.to_string(),
    };
    let series: Vec<Series> = KEYWORDS
        .iter()
        .enumerate()
        .map(|(i, kw)| Series {
            name: (*kw).to_string(),
            values: vec![1, (i as i64 + 2) * 10],
            times: vec![0.5, seconds],
        })
        .collect();
    write_raw_log(&dir.join(RAW_LOG_FILE), &summary, &series).expect("write raw log");
}

#[test]
fn extract_then_report_renders_all_artifacts() {
    let ws = Workspace::new(temp_dir("full_report"));
    ws.ensure().expect("ensure");

    for config in Configuration::BOTH {
        seed_run(&ws, config, "a.cnf", 12.5, "SAT");
        seed_run(&ws, config, "b.cnf", 333.0, "UNSAT");
    }
    // Present in the baseline only: dropped from the keyword join and
    // unmatched in the pairing.
    seed_run(&ws, Configuration::Baseline, "c.cnf", 45.2, "indeterminate");

    for config in Configuration::BOTH {
        let stats = extract_summaries(&ws, config).expect("extract");
        assert_eq!(stats.skipped, 0);
    }

    let summary = report::generate(&ws).expect("report");
    assert_eq!(summary.dropped, 1);
    assert_eq!(summary.unmatched, 1);

    for artifact in &summary.artifacts {
        assert!(artifact.exists(), "missing artifact {}", artifact.display());
    }

    let table = fs::read_to_string(ws.mean_table_txt()).expect("table");
    for keyword in KEYWORDS {
        assert!(table.contains(keyword), "table lacks {keyword}");
    }

    let cactus = fs::read_to_string(ws.plots_dir().join("cactus_plot.svg")).expect("cactus");
    assert!(cactus.contains("<svg"));
    assert!(cactus.contains("polyline"));

    for keyword in KEYWORDS {
        assert!(ws.keyword_plots_dir().join(format!("{keyword}.svg")).exists());
    }
}

#[test]
fn extraction_skips_runs_without_a_raw_log() {
    let ws = Workspace::new(temp_dir("skip_runs"));
    ws.ensure().expect("ensure");

    seed_run(&ws, Configuration::Bdd, "a.cnf", 1.0, "SAT");
    fs::create_dir_all(ws.run_dir(Configuration::Bdd, "empty.cnf")).expect("mkdir");

    let stats = extract_summaries(&ws, Configuration::Bdd).expect("extract");
    assert_eq!(stats.runs, 1);
    assert_eq!(stats.skipped, 1);
}

#[test]
fn report_without_summaries_fails_with_log_file_not_found() {
    let ws = Workspace::new(temp_dir("no_summaries"));

    let err = report::generate(&ws).expect_err("must fail");
    match err.downcast_ref::<BenchError>() {
        Some(BenchError::LogFileNotFound { .. }) => {}
        other => panic!("expected LogFileNotFound, got {other:?}"),
    }
}

fn temp_dir(tag: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    p.push(format!("satbench_report_{}_{}", tag, t));
    p
}

use std::fs;
use std::path::PathBuf;

use satbench::error::BenchError;
use satbench::logs::summary::parse_result_records;

#[test]
fn parses_times_and_outcomes() {
    let path = write_fixture(
        "ok",
        "/home/bench/Tests/bdd_data/uf100-01.cnf\n\
         [912, 444, 1208, 31, 19, 845.2, 'SAT']\n\
         /home/bench/Tests/bdd_data/uf100-02.cnf\n\
         [100, 90, 300, 12, 7, 900, 'indeterminate']\n",
    );

    let records = parse_result_records(&path).expect("parse");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].filename, "uf100-01.cnf");
    assert_eq!(records[0].seconds, 845.2);
    assert_eq!(records[0].outcome, "SAT");
    // An integer-valued time is still a time.
    assert_eq!(records[1].seconds, 900.0);
    assert_eq!(records[1].outcome, "indeterminate");
}

#[test]
fn tuple_form_and_double_quotes_are_accepted() {
    let path = write_fixture("tuple", "/runs/x.cnf\n(3.25, \"UNSAT\")\n");

    let records = parse_result_records(&path).expect("parse");
    assert_eq!(records[0].seconds, 3.25);
    assert_eq!(records[0].outcome, "UNSAT");
}

#[test]
fn code_like_line_is_malformed_not_executed() {
    let path = write_fixture("code", "/runs/x.cnf\n__import__('os').system('true')\n");

    assert!(matches!(
        parse_result_records(&path),
        Err(BenchError::MalformedResultEntry { line: 2, .. })
    ));
}

#[test]
fn short_list_is_malformed() {
    let path = write_fixture("short", "/runs/x.cnf\n[845.2]\n");

    assert!(matches!(
        parse_result_records(&path),
        Err(BenchError::MalformedResultEntry { .. })
    ));
}

#[test]
fn non_numeric_time_is_malformed() {
    let path = write_fixture("bad_time", "/runs/x.cnf\n['fast', 'SAT']\n");

    assert!(matches!(
        parse_result_records(&path),
        Err(BenchError::MalformedResultEntry { .. })
    ));
}

#[test]
fn non_string_outcome_is_malformed() {
    let path = write_fixture("bad_outcome", "/runs/x.cnf\n[845.2, 1]\n");

    assert!(matches!(
        parse_result_records(&path),
        Err(BenchError::MalformedResultEntry { .. })
    ));
}

#[test]
fn missing_file_is_log_file_not_found() {
    let path = temp_path("missing").join("results.txt");

    assert!(matches!(
        parse_result_records(&path),
        Err(BenchError::LogFileNotFound { .. })
    ));
}

fn temp_path(tag: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    p.push(format!("satbench_result_{}_{}", tag, t));
    p
}

fn write_fixture(tag: &str, text: &str) -> PathBuf {
    let dir = temp_path(tag);
    fs::create_dir_all(&dir).expect("mkdir");
    let path = dir.join("results.txt");
    fs::write(&path, text).expect("write fixture");
    path
}

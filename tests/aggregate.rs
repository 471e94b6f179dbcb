use indexmap::IndexMap;

use satbench::aggregate::{
    average, average_table, categorize, join_filter, pair_by_name, sort_by_time,
};
use satbench::error::BenchError;
use satbench::record::{Outcome, ResultRecord, RunRecord, TimedResult, KEYWORDS};

fn run_record(name: &str, pairs: &[(&str, i64)]) -> RunRecord {
    let mut metrics = IndexMap::new();
    for (k, v) in pairs {
        metrics.insert((*k).to_string(), *v);
    }
    RunRecord {
        filename: name.to_string(),
        metrics,
    }
}

fn result_record(name: &str, seconds: f64, outcome: &str) -> ResultRecord {
    ResultRecord {
        filename: name.to_string(),
        seconds,
        outcome: outcome.to_string(),
    }
}

fn timed(name: &str, seconds: f64) -> TimedResult {
    TimedResult {
        filename: name.to_string(),
        seconds,
        outcome: Outcome::Sat,
    }
}

#[test]
fn average_is_floor_of_sum_over_count() {
    let records = [
        run_record("a.cnf", &[("conflicts", 4)]),
        run_record("b.cnf", &[("conflicts", 6)]),
        run_record("c.cnf", &[("conflicts", 8)]),
    ];
    assert_eq!(average("conflicts", &records).expect("average"), 6);

    let uneven = [
        run_record("a.cnf", &[("conflicts", 1)]),
        run_record("b.cnf", &[("conflicts", 2)]),
    ];
    assert_eq!(average("conflicts", &uneven).expect("average"), 1);
}

#[test]
fn average_excludes_records_missing_the_keyword() {
    let records = [
        run_record("a.cnf", &[("restarts", 2)]),
        run_record("b.cnf", &[]),
        run_record("c.cnf", &[("restarts", 4)]),
    ];
    assert_eq!(average("restarts", &records).expect("average"), 3);
}

#[test]
fn average_with_no_data_is_fatal() {
    let records = [run_record("a.cnf", &[("restarts", 2)])];
    assert!(matches!(
        average("decisions", &records),
        Err(BenchError::NoDataForKeyword(kw)) if kw == "decisions"
    ));
}

#[test]
fn average_table_covers_the_vocabulary_in_order() {
    let pairs: Vec<(&str, i64)> = KEYWORDS.iter().map(|kw| (*kw, 10)).collect();
    let records = [run_record("a.cnf", &pairs)];
    let table = average_table(&records).expect("table");
    let keys: Vec<&str> = table.keys().map(String::as_str).collect();
    assert_eq!(keys, KEYWORDS);
    assert!(table.values().all(|&v| v == 10));
}

#[test]
fn join_filter_keeps_the_intersection_only() {
    let baseline = [
        run_record("a.cnf", &[("restarts", 1)]),
        run_record("b.cnf", &[("restarts", 2)]),
        run_record("c.cnf", &[("restarts", 3)]),
    ];
    let variant = [
        run_record("b.cnf", &[("restarts", 4)]),
        run_record("c.cnf", &[("restarts", 5)]),
        run_record("d.cnf", &[("restarts", 6)]),
    ];

    let joined = join_filter(&baseline, &variant).expect("join");
    let baseline_names: Vec<&str> = joined.baseline.iter().map(|r| r.filename.as_str()).collect();
    let variant_names: Vec<&str> = joined.variant.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(baseline_names, ["b.cnf", "c.cnf"]);
    assert_eq!(variant_names, ["b.cnf", "c.cnf"]);
    assert!(joined.dropped.contains(&"a.cnf".to_string()));
    assert!(joined.dropped.contains(&"d.cnf".to_string()));
    assert_eq!(joined.dropped.len(), 2);
}

#[test]
fn empty_join_is_fatal_not_a_division_by_zero() {
    let baseline = [run_record("a.cnf", &[("restarts", 1)])];
    let variant = [run_record("b.cnf", &[("restarts", 2)])];
    assert!(matches!(
        join_filter(&baseline, &variant),
        Err(BenchError::EmptyJoinResult)
    ));
}

#[test]
fn indeterminate_time_is_clamped_to_the_ceiling() {
    let records = [result_record("a.cnf", 45.2, "indeterminate")];
    let buckets = categorize(&records).expect("categorize");
    assert_eq!(buckets.counts(), (0, 0, 1));
    assert_eq!(buckets.indeterminate[0].seconds, 900.0);
}

#[test]
fn sat_and_unsat_keep_their_logged_time() {
    let records = [
        result_record("a.cnf", 45.2, "SAT"),
        result_record("b.cnf", 123.4, "UNSAT"),
    ];
    let buckets = categorize(&records).expect("categorize");
    assert_eq!(buckets.counts(), (1, 1, 0));
    assert_eq!(buckets.sat[0].seconds, 45.2);
    assert_eq!(buckets.unsat[0].seconds, 123.4);
}

#[test]
fn unknown_outcome_is_fatal_not_dropped() {
    let records = [result_record("a.cnf", 10.0, "TIMEOUT")];
    assert!(matches!(
        categorize(&records),
        Err(BenchError::UnknownOutcome(s)) if s == "TIMEOUT"
    ));
}

#[test]
fn sort_by_time_is_stable_on_ties() {
    let results = [timed("late.cnf", 7.0), timed("first.cnf", 3.0), timed("second.cnf", 3.0)];
    let sorted = sort_by_time(&results);
    let names: Vec<&str> = sorted.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names, ["first.cnf", "second.cnf", "late.cnf"]);
}

#[test]
fn all_sorted_merges_buckets_by_time() {
    let records = [
        result_record("slow.cnf", 200.0, "UNSAT"),
        result_record("fast.cnf", 1.5, "SAT"),
        result_record("stuck.cnf", 45.2, "indeterminate"),
    ];
    let buckets = categorize(&records).expect("categorize");
    let names: Vec<String> = buckets
        .all_sorted()
        .iter()
        .map(|r| r.filename.clone())
        .collect();
    assert_eq!(names, ["fast.cnf", "slow.cnf", "stuck.cnf"]);
}

#[test]
fn pairing_matches_by_name_and_reports_the_rest() {
    let baseline = [timed("f1.cnf", 10.0), timed("f2.cnf", 20.0)];
    let variant = [timed("f2.cnf", 25.0)];

    let pairing = pair_by_name(&baseline, &variant);
    assert_eq!(pairing.pairs.len(), 1);
    assert_eq!(pairing.pairs[0].filename, "f2.cnf");
    assert_eq!(pairing.pairs[0].baseline_secs, 20.0);
    assert_eq!(pairing.pairs[0].variant_secs, 25.0);
    assert_eq!(pairing.unmatched, ["f1.cnf".to_string()]);
}

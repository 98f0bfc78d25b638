//! Statistics derivation and JSON output.

use rvpipe_core::stats::SimStats;

#[test]
fn ipc_of_empty_run_is_zero() {
    assert_eq!(SimStats::default().ipc(), 0.0);
}

#[test]
fn ipc_is_retired_over_cycles() {
    let mut stats = SimStats::default();
    stats.cycles = 200;
    stats.instructions_retired = 50;
    assert!((stats.ipc() - 0.25).abs() < f64::EPSILON);
}

#[test]
fn json_carries_counters_and_cache_stats() {
    let mut stats = SimStats::default();
    stats.cycles = 10;
    stats.stalls_load_use = 2;
    stats.l2.misses = 3;
    let json: serde_json::Value = serde_json::from_str(&stats.to_json().unwrap()).unwrap();
    assert_eq!(json["cycles"], 10);
    assert_eq!(json["stalls_load_use"], 2);
    assert_eq!(json["l2"]["misses"], 3);
    assert!(json.get("start_time").is_none());
}

#[test]
fn report_sections_can_be_selected() {
    let mut stats = SimStats::default();
    stats.cycles = 40;
    stats.instructions_retired = 12;
    stats.branch_mispredictions = 1;
    stats.print_sections(&["summary".to_owned(), "branch".to_owned()]);
    stats.print();
}

//! End-to-end smoke test for attestia-node.
//!
//! Runs the real node binary against a sequence of cycle fixtures in a
//! temp data directory and asserts the persisted event log, attestation
//! log, and snapshot files reflect what each cycle should have produced.
//!
//! Run with:
//!   cargo test -p attestia-node --test smoke

use std::process::Command;

use serde_json::{json, Value as Json};

fn run_node(data_dir: &std::path::Path, cycle_path: &std::path::Path) {
    let node_bin = env!("CARGO_BIN_EXE_attestia-node");
    let output = Command::new(node_bin)
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--cycle",
            cycle_path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run attestia-node");
    assert!(
        output.status.success(),
        "attestia-node exited with {:?}\nstderr:\n{}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn read_jsonl(path: &std::path::Path) -> Vec<Json> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("event line is valid JSON"))
        .collect()
}

fn cycle_one() -> Json {
    json!({
        "accounts": [
            {"id": "cash", "account_type": "asset", "name": "Operating Cash"},
            {"id": "revenue", "account_type": "income", "name": "Attestation Revenue"}
        ],
        "entries": [
            {
                "id": "entry-1-debit",
                "account_id": "cash",
                "entry_type": "debit",
                "amount": "100.00",
                "currency": "USD",
                "decimals": 2,
                "correlation_id": "corr-1"
            },
            {
                "id": "entry-1-credit",
                "account_id": "revenue",
                "entry_type": "credit",
                "amount": "100.00",
                "currency": "USD",
                "decimals": 2,
                "correlation_id": "corr-1"
            }
        ],
        "states": [
            {"id": "client-1", "structure": "clientAccount", "data": {"tier": "standard"}}
        ],
        "intents": [],
        "chain_events": []
    })
}

fn cycle_two() -> Json {
    json!({
        "accounts": [],
        "entries": [
            {
                "id": "entry-2-debit",
                "account_id": "cash",
                "entry_type": "debit",
                "amount": "50.00",
                "currency": "USD",
                "decimals": 2,
                "correlation_id": "corr-2"
            },
            {
                "id": "entry-2-credit",
                "account_id": "revenue",
                "entry_type": "credit",
                "amount": "50.00",
                "currency": "USD",
                "decimals": 2,
                "correlation_id": "corr-2"
            }
        ],
        "states": [],
        "intents": [],
        "chain_events": []
    })
}

#[test]
fn one_cycle_appends_events_and_starts_the_attestation_log() {
    let dir = tempfile::tempdir().unwrap();
    let cycle_path = dir.path().join("cycle.json");
    std::fs::write(&cycle_path, serde_json::to_string(&cycle_one()).unwrap()).unwrap();

    let data_dir = dir.path().join("data");
    run_node(&data_dir, &cycle_path);

    let events = read_jsonl(&data_dir.join("events.jsonl"));
    assert!(
        events.iter().any(|e| e["stream_id"] == "ledger" && e["event"]["type"] == "ledger.account_registered"),
        "expected an account_registered event on the ledger stream"
    );
    assert!(
        events.iter().any(|e| e["stream_id"] == "ledger" && e["event"]["type"] == "ledger.entries_posted"),
        "expected an entries_posted event on the ledger stream"
    );
    assert!(
        events.iter().any(|e| e["stream_id"] == "registrar"),
        "expected a registrar stream event"
    );

    for event in &events {
        let hash = event["hash"].as_str().expect("hash field");
        assert_eq!(hash.len(), 64, "event hash must be 64 hex chars");
    }

    let log_snapshot: Json = serde_json::from_str(
        &std::fs::read_to_string(data_dir.join("snapshots/attestation-log/1.json")).unwrap(),
    )
    .unwrap();
    let log: Vec<String> = serde_json::from_value(log_snapshot["state"].clone()).unwrap();
    assert_eq!(log.len(), 1, "first cycle should produce one attestation hash");
    assert_eq!(log[0].len(), 64);
}

#[test]
fn a_second_cycle_replays_the_full_stream_and_grows_the_attestation_log() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");

    let cycle1_path = dir.path().join("cycle1.json");
    std::fs::write(&cycle1_path, serde_json::to_string(&cycle_one()).unwrap()).unwrap();
    run_node(&data_dir, &cycle1_path);

    let cycle2_path = dir.path().join("cycle2.json");
    std::fs::write(&cycle2_path, serde_json::to_string(&cycle_two()).unwrap()).unwrap();
    run_node(&data_dir, &cycle2_path);

    let events = read_jsonl(&data_dir.join("events.jsonl"));
    let ledger_events: Vec<&Json> = events.iter().filter(|e| e["stream_id"] == "ledger").collect();
    assert_eq!(
        ledger_events.len(),
        3,
        "account_registered once plus entries_posted for each of the two cycles' correlation ids"
    );

    let log_v2: Json = serde_json::from_str(
        &std::fs::read_to_string(data_dir.join("snapshots/attestation-log/2.json")).unwrap(),
    )
    .unwrap();
    let log: Vec<String> = serde_json::from_value(log_v2["state"].clone()).unwrap();
    assert_eq!(log.len(), 2, "second cycle should append a second attestation hash");
    assert_ne!(log[0], log[1], "distinct cycles produce distinct attestation hashes");
}

#[test]
fn strict_mode_is_accepted_as_a_flag_without_chain_hashes_failing_the_process() {
    // Strict mode rejects a bundle lacking chain hashes inside the verifier's
    // own report (logged, not a process failure) — the node itself must still
    // exit cleanly since the verifier only produces a report, never aborts
    // the cycle.
    let dir = tempfile::tempdir().unwrap();
    let cycle_path = dir.path().join("cycle.json");
    std::fs::write(&cycle_path, serde_json::to_string(&cycle_one()).unwrap()).unwrap();

    let data_dir = dir.path().join("data");
    let node_bin = env!("CARGO_BIN_EXE_attestia-node");
    let output = Command::new(node_bin)
        .args([
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--cycle",
            cycle_path.to_str().unwrap(),
            "--strict",
        ])
        .output()
        .expect("failed to run attestia-node");
    assert!(output.status.success());
}

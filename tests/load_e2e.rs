//! End-to-end tests for the load generator

mod common;

use std::collections::HashSet;

use ledger_network_bootstrap::domain::models::load::LoadRequest;
use ledger_network_bootstrap::shared::errors::UseCaseError;

use common::TestNetwork;

fn request(jobs: u32, entries: u32) -> LoadRequest {
    LoadRequest {
        jobs: Some(jobs),
        entries: Some(entries),
    }
}

#[tokio::test]
async fn test_load_issues_jobs_times_entries_invocations() {
    let network = TestNetwork::new();
    let context = network.context(true);

    let report = context.run_load_use_case.execute(request(3, 4)).await.unwrap();

    assert_eq!(network.recorder.count("invoke"), 12);
    assert_eq!(report.attempted, 12);
    assert_eq!(report.confirmed, 12);
    assert_eq!(report.failed, 0);
    assert_eq!(
        report.workers.iter().map(|w| w.worker).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert!(report.workers.iter().all(|w| w.attempted == 4 && w.confirmed == 4));
}

#[tokio::test]
async fn test_load_writes_sequential_values_per_worker() {
    let network = TestNetwork::new();
    let context = network.context(true);

    context.run_load_use_case.execute(request(2, 3)).await.unwrap();

    let values: Vec<String> = network
        .recorder
        .calls()
        .iter()
        .map(|call| {
            let payload: serde_json::Value = serde_json::from_str(call.trim_start_matches("invoke:")).unwrap();
            payload["Args"][2].as_str().unwrap().to_string()
        })
        .collect();
    let distinct: HashSet<&str> = values.iter().map(String::as_str).collect();
    assert_eq!(values.len(), 6);
    assert_eq!(distinct, HashSet::from(["0", "1", "2"]));
}

#[tokio::test]
async fn test_load_attempted_total_ignores_failures() {
    let network = TestNetwork::new();
    network.recorder.fail("invoke");
    let context = network.context(true);

    let report = context.run_load_use_case.execute(request(3, 4)).await.unwrap();

    assert_eq!(report.attempted, 12);
    assert_eq!(report.confirmed, 0);
    assert_eq!(report.failed, 12);
    assert_eq!(network.recorder.count("invoke"), 12);
}

#[tokio::test]
async fn test_load_rejects_zero_jobs() {
    let network = TestNetwork::new();
    let context = network.context(true);

    let err = context.run_load_use_case.execute(request(0, 4)).await.unwrap_err();

    assert!(matches!(err, UseCaseError::Validation(_)));
    assert!(network.recorder.calls().is_empty());
}

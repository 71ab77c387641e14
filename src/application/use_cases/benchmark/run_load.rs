//! Run Load Use Case
//!
//! Launches `jobs` concurrent workers, each issuing `entries` sequential
//! `put(randomKey, value)` invocations. Workers share nothing; each sends a
//! single report over a channel once it is done.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;

use crate::domain::gateways::NetworkCli;
use crate::domain::models::chaincode::{ChaincodeArgs, ChaincodeCall};
use crate::domain::models::channel::ChannelName;
use crate::domain::models::load::{LoadPlan, LoadReport, LoadRequest, LoadTarget, WorkerReport};
use crate::shared::errors::UseCaseError;

/// Use case for running the parallel load generator
pub struct RunLoadUseCase {
    network_cli: Arc<dyn NetworkCli>,
    target: LoadTarget,
}

impl RunLoadUseCase {
    /// Create a new RunLoadUseCase
    #[must_use]
    pub fn new(network_cli: Arc<dyn NetworkCli>, target: LoadTarget) -> Self {
        Self { network_cli, target }
    }

    /// Execute the use case
    ///
    /// Blocks until every worker has finished. Failed invocations are counted,
    /// never retried.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` if `jobs` or `entries` is missing or
    /// zero and `UseCaseError::Domain` for an invalid target channel.
    pub async fn execute(&self, request: LoadRequest) -> Result<LoadReport, UseCaseError> {
        request.validate()?;
        let plan = LoadPlan {
            jobs: request.jobs.unwrap_or_default(),
            entries: request.entries.unwrap_or_default(),
        };
        let channel = ChannelName::parse(&self.target.channel)?;

        let span = tracing::info_span!("benchmark", run_id = %Uuid::new_v4());
        Ok(self.run(plan, channel).instrument(span).await)
    }

    async fn run(&self, plan: LoadPlan, channel: ChannelName) -> LoadReport {
        tracing::info!(jobs = plan.jobs, entries = plan.entries, "Starting load run");
        let started_at = Utc::now();
        let clock = Instant::now();

        let (tx, mut rx) = mpsc::channel::<WorkerReport>(plan.jobs as usize);
        let mut handles = Vec::with_capacity(plan.jobs as usize);
        for worker in 0..plan.jobs {
            let worker_state = Worker {
                id: worker,
                entries: plan.entries,
                channel: channel.to_string(),
                target: self.target.clone(),
                network_cli: Arc::clone(&self.network_cli),
            };
            let tx = tx.clone();
            handles.push(tokio::spawn(
                async move {
                    let report = worker_state.run().await;
                    // Receiver lives until every worker has reported
                    let _ = tx.send(report).await;
                }
                .in_current_span(),
            ));
        }
        drop(tx);

        let mut reports = Vec::with_capacity(plan.jobs as usize);
        while let Some(report) = rx.recv().await {
            reports.push(report);
        }
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Load worker panicked");
            }
        }

        let report = LoadReport::aggregate(plan, reports, clock.elapsed(), started_at);
        tracing::info!(
            attempted = report.attempted,
            confirmed = report.confirmed,
            failed = report.failed,
            elapsed_secs = report.elapsed_secs,
            "Load run finished"
        );
        report
    }
}

struct Worker {
    id: u32,
    entries: u32,
    channel: String,
    target: LoadTarget,
    network_cli: Arc<dyn NetworkCli>,
}

impl Worker {
    async fn run(self) -> WorkerReport {
        let mut report = WorkerReport {
            worker: self.id,
            attempted: 0,
            confirmed: 0,
            failed: 0,
        };

        for entry in 0..self.entries {
            let call = ChaincodeCall {
                channel: self.channel.clone(),
                name: self.target.chaincode.clone(),
                args: ChaincodeArgs::new([
                    self.target.function.clone(),
                    random_key(self.target.key_length),
                    entry.to_string(),
                ]),
            };

            report.attempted += 1;
            match self.network_cli.invoke_chaincode(&call).await {
                Ok(_) => report.confirmed += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(worker = self.id, entry, error = %e, "Benchmark write failed");
                }
            }
        }

        tracing::debug!(worker = self.id, confirmed = report.confirmed, "Worker done");
        report
    }
}

/// Random alphanumeric key; collisions across workers are not reconciled
fn random_key(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

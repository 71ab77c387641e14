//! Load Domain Model
//!
//! Benchmark plan, per-worker results and the aggregate report.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

/// Request for `runLoad(jobCount, entriesPerJob)`
#[derive(Debug, Clone, Default, Validate)]
pub struct LoadRequest {
    #[validate(required(message = "is required"), range(min = 1, message = "must be at least 1"))]
    pub jobs: Option<u32>,

    #[validate(required(message = "is required"), range(min = 1, message = "must be at least 1"))]
    pub entries: Option<u32>,
}

/// Fixed channel/chaincode target of the benchmark writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTarget {
    pub channel: String,
    pub chaincode: String,
    /// Chaincode function taking `(key, value)`
    pub function: String,
    pub key_length: usize,
}

/// Validated benchmark plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPlan {
    pub jobs: u32,
    pub entries: u32,
}

impl LoadPlan {
    /// Total invocations the plan attempts: `jobs × entries`
    #[must_use]
    pub fn attempted(&self) -> u64 {
        u64::from(self.jobs) * u64::from(self.entries)
    }
}

/// What one worker observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    pub worker: u32,
    pub attempted: u32,
    pub confirmed: u32,
    pub failed: u32,
}

/// Aggregate benchmark report
///
/// `attempted` is always `jobs × entries`. Keys that collided across workers
/// still count once per write attempt.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub jobs: u32,
    pub entries_per_job: u32,
    pub attempted: u64,
    pub confirmed: u64,
    pub failed: u64,
    pub elapsed_secs: f64,
    pub attempted_per_sec: f64,
    pub confirmed_per_sec: f64,
    pub started_at: DateTime<Utc>,
    pub workers: Vec<WorkerReport>,
}

impl LoadReport {
    /// Aggregate worker reports into the final report
    #[must_use]
    pub fn aggregate(
        plan: LoadPlan,
        mut workers: Vec<WorkerReport>,
        elapsed: Duration,
        started_at: DateTime<Utc>,
    ) -> Self {
        workers.sort_by_key(|w| w.worker);

        let confirmed: u64 = workers.iter().map(|w| u64::from(w.confirmed)).sum();
        let attempted = plan.attempted();
        let elapsed_secs = elapsed.as_secs_f64();

        Self {
            jobs: plan.jobs,
            entries_per_job: plan.entries,
            attempted,
            confirmed,
            failed: attempted.saturating_sub(confirmed),
            elapsed_secs,
            attempted_per_sec: rate(attempted, elapsed_secs),
            confirmed_per_sec: rate(confirmed, elapsed_secs),
            started_at,
            workers,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn rate(count: u64, secs: f64) -> f64 {
    if secs > 0.0 {
        count as f64 / secs
    } else {
        0.0
    }
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Jobs:            {}", self.jobs)?;
        writeln!(f, "Entries per job: {}", self.entries_per_job)?;
        writeln!(f, "Elapsed:         {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Attempted:       {} ({:.2} tx/s)", self.attempted, self.attempted_per_sec)?;
        writeln!(f, "Confirmed:       {} ({:.2} tx/s)", self.confirmed, self.confirmed_per_sec)?;
        write!(f, "Failed:          {}", self.failed)
    }
}

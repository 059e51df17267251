//! FleetCoordinator - ワーカープールのライフサイクルを持つ
//!
//! # フロー
//! 1. TaskQueue と ResultCollector をタスク数で作る
//! 2. ワーカーを N 本起動
//! 3. 全タスクを投入して close
//! 4. 全ワーカーの終了を待つ
//! 5. Outcome をちょうどタスク数だけ drain して AggregateReport にする

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{Instrument, info, info_span};

use super::builder::CoordinatorBuilder;
use super::collector::ResultCollector;
use super::task_queue::TaskQueue;
use super::worker::WorkerGroup;
use crate::domain::{AggregateReport, Deadline, RunId, RunSettings, Task, WorkerCount};
use crate::error::FleetError;
use crate::ports::BoxedUnit;

/// Runs fleets with fixed settings. Reusable across runs; every run gets
/// its own queue, collector and workers.
#[derive(Debug, Clone)]
pub struct FleetCoordinator {
    settings: RunSettings,
}

impl FleetCoordinator {
    pub fn new(settings: RunSettings) -> Self {
        Self { settings }
    }

    pub fn builder() -> CoordinatorBuilder {
        CoordinatorBuilder::new()
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Process every unit and aggregate the outcomes.
    ///
    /// Per-task failures end up in the report; only contract violations
    /// surface as `Err`.
    pub async fn run<I>(&self, units: I) -> Result<AggregateReport, FleetError>
    where
        I: IntoIterator<Item = BoxedUnit>,
    {
        let units: Vec<BoxedUnit> = units.into_iter().collect();
        let run_id = RunId::generate();
        let span = info_span!(
            "fleet_run",
            run_id = %run_id,
            workers = self.settings.workers.get(),
            tasks = units.len()
        );
        self.run_inner(run_id, units).instrument(span).await
    }

    async fn run_inner(
        &self,
        run_id: RunId,
        units: Vec<BoxedUnit>,
    ) -> Result<AggregateReport, FleetError> {
        let started_at = Utc::now();
        let total = units.len();
        let workers = self.settings.workers.get();
        let deadline = self.settings.task_deadline.map(Deadline::After);
        info!("fleet run started");

        let queue = Arc::new(TaskQueue::new(total));
        let collector = ResultCollector::new(total);
        let group = WorkerGroup::spawn(workers, Arc::clone(&queue), collector.reporter());

        let submitted = submit_all(&queue, units, deadline).await;
        // 投入に失敗してもワーカーを待たせたままにしない
        let closed = queue.close().await;
        submitted?;
        closed?;

        group.join().await?;
        let outcomes = collector.drain(total).await?;

        let report =
            AggregateReport::from_outcomes(run_id, workers, outcomes, started_at, Utc::now());
        info!(
            succeeded = report.succeeded,
            failed = report.failure_count(),
            "fleet run finished"
        );
        Ok(report)
    }
}

async fn submit_all(
    queue: &TaskQueue,
    units: Vec<BoxedUnit>,
    deadline: Option<Deadline>,
) -> Result<(), FleetError> {
    for (seq, unit) in units.into_iter().enumerate() {
        queue.submit(Task::new(seq, unit, deadline)).await?;
    }
    Ok(())
}

/// Free-function form: validate, then run once.
///
/// A zero worker count fails with `FleetError::Configuration` before any
/// worker is spawned or any unit is executed.
pub async fn process_fleet<I>(
    units: I,
    per_task_deadline: Option<Duration>,
    worker_count: usize,
) -> Result<AggregateReport, FleetError>
where
    I: IntoIterator<Item = BoxedUnit>,
{
    let workers = WorkerCount::new(worker_count)?;
    FleetCoordinator::new(RunSettings {
        workers,
        task_deadline: per_task_deadline,
    })
    .run(units)
    .await
}

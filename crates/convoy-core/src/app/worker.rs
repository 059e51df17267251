use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info_span, warn};

use super::collector::OutcomeReporter;
use super::executor::execute_task;
use super::task_queue::TaskQueue;
use crate::error::FleetError;

/// Worker group handle.
/// - ワーカーはキューが close されて空になると自然に終了する
/// - `join()` で全ワーカーの終了を待てる
pub struct WorkerGroup {
    joins: Vec<JoinHandle<usize>>,
}

impl WorkerGroup {
    /// Spawn `n` workers bound to one queue and one reporter.
    pub fn spawn(n: usize, queue: Arc<TaskQueue>, reporter: OutcomeReporter) -> Self {
        let mut joins = Vec::with_capacity(n);
        for worker_id in 0..n {
            let q = Arc::clone(&queue);
            let r = reporter.clone();
            let span = info_span!("worker", id = worker_id);

            let join = tokio::spawn(worker_loop(worker_id, q, r).instrument(span));
            joins.push(join);
        }
        Self { joins }
    }

    pub fn len(&self) -> usize {
        self.joins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }

    /// Wait for every worker. Returns the total number of tasks handled.
    pub async fn join(self) -> Result<usize, FleetError> {
        let mut handled = 0;
        let mut first_err = None;
        for (worker_id, j) in self.joins.into_iter().enumerate() {
            match j.await {
                Ok(n) => handled += n,
                Err(e) => {
                    warn!(worker = worker_id, error = %e, "worker terminated abnormally");
                    first_err.get_or_insert(FleetError::WorkerPanicked(worker_id));
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(handled),
        }
    }
}

/// Pull tasks until the queue is closed and drained; report one outcome each.
async fn worker_loop(
    worker_id: usize,
    queue: Arc<TaskQueue>,
    reporter: OutcomeReporter,
) -> usize {
    debug!("waiting for tasks");
    let mut handled = 0;

    while let Some(task) = queue.recv().await {
        let task_ref = task.task_ref().clone();
        debug!(task = %task_ref, "started task");

        let outcome = execute_task(worker_id, task).await;
        match &outcome.failure {
            None => debug!(
                task = %task_ref,
                elapsed_ms = outcome.elapsed.as_millis() as u64,
                "finished task"
            ),
            Some(cause) => warn!(
                task = %task_ref,
                kind = %cause.kind,
                "task failed: {}",
                cause.message
            ),
        }

        // 失敗もループを止めない。報告先が消えているのは coordinator 側の不具合
        if let Err(lost) = reporter.report(outcome).await {
            warn!(task = %lost.task, "outcome dropped: collector is gone");
        }
        handled += 1;
    }

    debug!(handled, "queue closed, worker exiting");
    handled
}

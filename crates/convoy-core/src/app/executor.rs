//! Executor - 1 タスクを期限付きで実行して Outcome にする
//!
//! # 期限切れの扱い（best-effort abandonment）
//! - unit of work は専用の tokio task 上で動く
//! - 期限が来たらワーカーはその task を切り離し（detach）、DeadlineExceeded を記録する
//! - 切り離された unit はそのまま最後まで走るが、遅れて届いた結果は捨てる
//! - 強制終了（abort）はしない
//!
//! unit 内の panic は JoinError として捕まえ、TaskExecution の失敗として扱う。

use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::{ErrorKind, Outcome, Task, TaskRef, WorkError};
use crate::ports::BoxedUnit;

/// Execute one task on behalf of `worker` and produce its outcome.
pub async fn execute_task(worker: usize, task: Task) -> Outcome {
    let (task_ref, deadline, unit) = task.into_parts();
    let started_at = Instant::now();

    // 期限なし、または表現できないほど遠い期限は最後まで待つ
    let Some(deadline_at) = deadline.and_then(|d| d.resolve(started_at)) else {
        let result = spawn_unit(unit).await;
        return to_outcome(task_ref, worker, started_at.elapsed(), result);
    };

    if deadline_at <= started_at {
        // 既に期限切れ: unit は起動しない
        return Outcome::failure(
            task_ref,
            worker,
            Duration::ZERO,
            ErrorKind::DeadlineExceeded,
            "deadline already passed before execution started",
        );
    }

    let mut handle = spawn_unit(unit);
    match tokio::time::timeout_at(deadline_at, &mut handle).await {
        Ok(result) => to_outcome(task_ref, worker, started_at.elapsed(), result),
        Err(_elapsed) => {
            let budget = deadline_at - started_at;
            detach_late_completion(task_ref.clone(), handle);
            Outcome::failure(
                task_ref,
                worker,
                started_at.elapsed(),
                ErrorKind::DeadlineExceeded,
                format!("deadline of {}ms exceeded", budget.as_millis()),
            )
        }
    }
}

fn spawn_unit(mut unit: BoxedUnit) -> JoinHandle<Result<(), WorkError>> {
    tokio::spawn(async move { unit.execute().await })
}

fn to_outcome(
    task_ref: TaskRef,
    worker: usize,
    elapsed: Duration,
    result: Result<Result<(), WorkError>, JoinError>,
) -> Outcome {
    match result {
        Ok(Ok(())) => Outcome::success(task_ref, worker, elapsed),
        Ok(Err(e)) => Outcome::failure(
            task_ref,
            worker,
            elapsed,
            ErrorKind::TaskExecution,
            e.to_string(),
        ),
        Err(join_err) => {
            let message = if join_err.is_panic() {
                "unit of work panicked".to_string()
            } else {
                format!("unit of work did not complete: {join_err}")
            };
            Outcome::failure(task_ref, worker, elapsed, ErrorKind::TaskExecution, message)
        }
    }
}

/// 期限切れ後に届く結果はログに残して捨てる
fn detach_late_completion(task_ref: TaskRef, handle: JoinHandle<Result<(), WorkError>>) {
    tokio::spawn(async move {
        match handle.await {
            Ok(Ok(())) => debug!(task = %task_ref, "late completion ignored"),
            Ok(Err(e)) => debug!(task = %task_ref, error = %e, "late failure ignored"),
            Err(e) => warn!(task = %task_ref, error = %e, "detached unit of work did not complete"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Deadline, OutcomeKind};
    use crate::ports::UnitOfWork;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Sleepy {
        delay: Duration,
        fail: bool,
        finished: Arc<AtomicBool>,
    }

    impl Sleepy {
        fn new(delay_ms: u64) -> Self {
            Self {
                delay: Duration::from_millis(delay_ms),
                fail: false,
                finished: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    #[async_trait]
    impl UnitOfWork for Sleepy {
        fn label(&self) -> &str {
            "sleepy"
        }

        async fn execute(&mut self) -> Result<(), WorkError> {
            tokio::time::sleep(self.delay).await;
            self.finished.store(true, Ordering::SeqCst);
            if self.fail {
                return Err(WorkError::new("intentional failure"));
            }
            Ok(())
        }
    }

    struct Panicky;

    #[async_trait]
    impl UnitOfWork for Panicky {
        fn label(&self) -> &str {
            "panicky"
        }

        async fn execute(&mut self) -> Result<(), WorkError> {
            panic!("boom");
        }
    }

    fn kind_of(o: &Outcome) -> Option<ErrorKind> {
        o.failure.as_ref().map(|f| f.kind)
    }

    #[tokio::test]
    async fn no_deadline_runs_to_completion() {
        let task = Task::new(0, Box::new(Sleepy::new(30)), None);
        let outcome = execute_task(1, task).await;
        assert_eq!(outcome.kind(), OutcomeKind::Success);
        assert_eq!(outcome.worker, 1);
    }

    #[tokio::test]
    async fn huge_relative_deadline_behaves_like_no_deadline() {
        let task = Task::new(
            0,
            Box::new(Sleepy::new(10)),
            Some(Deadline::After(Duration::MAX)),
        );
        let outcome = execute_task(0, task).await;
        assert_eq!(outcome.kind(), OutcomeKind::Success);
    }

    #[tokio::test]
    async fn unit_error_is_task_execution_failure() {
        let mut unit = Sleepy::new(0);
        unit.fail = true;
        let task = Task::new(0, Box::new(unit), Some(Deadline::After(Duration::from_secs(5))));
        let outcome = execute_task(0, task).await;
        assert_eq!(kind_of(&outcome), Some(ErrorKind::TaskExecution));
        assert_eq!(outcome.failure.unwrap().message, "intentional failure");
    }

    #[tokio::test]
    async fn slow_unit_exceeds_deadline_and_is_detached() {
        let unit = Sleepy::new(300);
        let finished = Arc::clone(&unit.finished);
        let task = Task::new(0, Box::new(unit), Some(Deadline::After(Duration::from_millis(30))));

        let outcome = execute_task(0, task).await;
        assert_eq!(kind_of(&outcome), Some(ErrorKind::DeadlineExceeded));
        assert!(outcome.elapsed < Duration::from_millis(300));
        assert!(!finished.load(Ordering::SeqCst));

        // 切り離された unit は中断されずに走り切る
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn past_absolute_deadline_never_starts_the_unit() {
        let unit = Sleepy::new(0);
        let finished = Arc::clone(&unit.finished);
        let task = Task::new(0, Box::new(unit), Some(Deadline::At(Instant::now())));

        let outcome = execute_task(0, task).await;
        assert_eq!(kind_of(&outcome), Some(ErrorKind::DeadlineExceeded));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn panic_becomes_task_execution_failure() {
        let task = Task::new(0, Box::new(Panicky), None);
        let outcome = execute_task(0, task).await;
        assert_eq!(kind_of(&outcome), Some(ErrorKind::TaskExecution));
        assert_eq!(outcome.failure.unwrap().message, "unit of work panicked");
    }
}

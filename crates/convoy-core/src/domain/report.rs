//! AggregateReport - fleet 全体の結果
//!
//! ワーカーが全て終了した後、drain した Outcome から 1 度だけ組み立てる。
//! Outcome の到着順には依存しない（failures は seq でソートする）。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::ErrorKind;
use super::ids::RunId;
use super::outcome::{FailureCause, Outcome};

/// Overall verdict of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub run_id: RunId,
    pub status: RunStatus,
    pub workers: usize,
    pub total: usize,
    pub succeeded: usize,

    /// Sorted by submission order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FailureCause>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl AggregateReport {
    /// Fold drained outcomes into a report.
    pub fn from_outcomes(
        run_id: RunId,
        workers: usize,
        outcomes: Vec<Outcome>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let total = outcomes.len();
        let mut failures: Vec<FailureCause> =
            outcomes.into_iter().filter_map(|o| o.failure).collect();
        failures.sort_by_key(|f| f.task.seq);

        let status = if failures.is_empty() {
            RunStatus::Succeeded
        } else {
            RunStatus::Failed
        };

        Self {
            run_id,
            status,
            workers,
            total,
            succeeded: total - failures.len(),
            failures,
            started_at,
            finished_at,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Succeeded
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn failures_of(&self, kind: ErrorKind) -> impl Iterator<Item = &FailureCause> {
        self.failures.iter().filter(move |f| f.kind == kind)
    }

    /// Labels of failing tasks, in submission order.
    pub fn failing_labels(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.task.label.as_str()).collect()
    }
}

/// Human-readable summary, one failure per line.
impl fmt::Display for AggregateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            RunStatus::Succeeded => write!(
                f,
                "all {} tasks processed successfully ({} workers)",
                self.total, self.workers
            ),
            RunStatus::Failed => {
                write!(
                    f,
                    "fleet processing had {} errors ({} of {} tasks succeeded)",
                    self.failure_count(),
                    self.succeeded,
                    self.total
                )?;
                for failure in &self.failures {
                    write!(f, "\n  {failure}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskId, TaskRef};
    use std::time::Duration;

    fn outcome(seq: usize, fail: Option<ErrorKind>) -> Outcome {
        let task = TaskRef {
            id: TaskId::generate(),
            seq,
            label: format!("T{seq}"),
        };
        match fail {
            None => Outcome::success(task, 0, Duration::ZERO),
            Some(kind) => Outcome::failure(task, 0, Duration::ZERO, kind, "boom"),
        }
    }

    fn report(outcomes: Vec<Outcome>) -> AggregateReport {
        let now = Utc::now();
        AggregateReport::from_outcomes(RunId::generate(), 3, outcomes, now, now)
    }

    #[test]
    fn empty_run_is_success() {
        let r = report(vec![]);
        assert!(r.is_success());
        assert_eq!(r.total, 0);
        assert_eq!(r.failure_count(), 0);
        assert_eq!(r.to_string(), "all 0 tasks processed successfully (3 workers)");
    }

    #[test]
    fn failures_are_sorted_by_submission_order() {
        let r = report(vec![
            outcome(3, Some(ErrorKind::TaskExecution)),
            outcome(0, None),
            outcome(1, Some(ErrorKind::DeadlineExceeded)),
        ]);
        assert_eq!(r.status, RunStatus::Failed);
        assert_eq!(r.total, 3);
        assert_eq!(r.succeeded, 1);
        assert_eq!(r.failing_labels(), vec!["T1", "T3"]);
        assert_eq!(r.failures_of(ErrorKind::DeadlineExceeded).count(), 1);
    }

    #[test]
    fn summary_lists_every_cause() {
        let r = report(vec![
            outcome(0, Some(ErrorKind::TaskExecution)),
            outcome(1, Some(ErrorKind::TaskExecution)),
        ]);
        let text = r.to_string();
        assert!(text.starts_with("fleet processing had 2 errors"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn serializes_status_and_skips_empty_failures() {
        let v = serde_json::to_value(report(vec![outcome(0, None)])).unwrap();
        assert_eq!(v["status"], "SUCCEEDED");
        assert!(v.get("failures").is_none());
    }
}

//! Task: a unit of work plus its execution constraints.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

use super::TaskId;
use crate::ports::BoxedUnit;

/// Per-task deadline.
///
/// - `After`: relative; the clock starts when a worker picks the task up.
/// - `At`: absolute instant; may already be in the past at pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    After(Duration),
    At(Instant),
}

impl Deadline {
    /// Resolve to an absolute instant, given when execution starts.
    ///
    /// `None` when a relative deadline lies beyond what `Instant` can
    /// represent; such a task runs without a deadline.
    pub fn resolve(self, started_at: Instant) -> Option<Instant> {
        match self {
            Deadline::After(d) => started_at.checked_add(d),
            Deadline::At(at) => Some(at),
        }
    }
}

/// Diagnostic identity of a task, carried into its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TaskRef {
    pub id: TaskId,
    /// Submission order within the run (0-based).
    pub seq: usize,
    pub label: String,
}

impl fmt::Display for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.seq, self.label)
    }
}

/// A task as it travels through the queue.
///
/// Created once at submission, consumed exactly once by one worker.
pub struct Task {
    task_ref: TaskRef,
    deadline: Option<Deadline>,
    unit: BoxedUnit,
}

impl Task {
    pub fn new(seq: usize, unit: BoxedUnit, deadline: Option<Deadline>) -> Self {
        let task_ref = TaskRef {
            id: TaskId::generate(),
            seq,
            label: unit.label().to_string(),
        };
        Self {
            task_ref,
            deadline,
            unit,
        }
    }

    pub fn task_ref(&self) -> &TaskRef {
        &self.task_ref
    }

    /// Split into parts; the worker owns the unit from here on.
    pub fn into_parts(self) -> (TaskRef, Option<Deadline>, BoxedUnit) {
        (self.task_ref, self.deadline, self.unit)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("task_ref", &self.task_ref)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

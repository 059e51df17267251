//! Outcome model: the per-task result.
//!
//! Exactly one Outcome is produced per submitted task. Outcomes arrive in
//! completion order, which is unrelated to submission order; `TaskRef::seq`
//! is the only stable ordering key.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::ErrorKind;
use super::task::TaskRef;

/// Serialized as SUCCESS / FAILURE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    Success,
    Failure,
}

/// Why a task failed, tagged with the task it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCause {
    pub kind: ErrorKind,
    pub task: TaskRef,
    pub message: String,
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.task, self.message)
    }
}

/// The result of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub task: TaskRef,

    /// Ordinal of the worker that handled the task.
    pub worker: usize,

    #[serde(with = "millis")]
    pub elapsed: Duration,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureCause>,
}

impl Outcome {
    pub fn success(task: TaskRef, worker: usize, elapsed: Duration) -> Self {
        Self {
            task,
            worker,
            elapsed,
            failure: None,
        }
    }

    pub fn failure(
        task: TaskRef,
        worker: usize,
        elapsed: Duration,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        let failure = FailureCause {
            kind,
            task: task.clone(),
            message: message.into(),
        };
        Self {
            task,
            worker,
            elapsed,
            failure: Some(failure),
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        if self.failure.is_some() {
            OutcomeKind::Failure
        } else {
            OutcomeKind::Success
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind() == OutcomeKind::Success
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

//! Run settings: worker pool size and per-task deadline.
//!
//! 起動時検証（Fail-fast）: 不正な値はワーカーを 1 本も起動する前に弾く。

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FleetError;

/// Validated worker pool size (always >= 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct WorkerCount(NonZeroUsize);

impl WorkerCount {
    pub fn new(n: usize) -> Result<Self, FleetError> {
        NonZeroUsize::new(n).map(Self).ok_or_else(|| {
            FleetError::Configuration(format!("worker count must be at least 1, got {n}"))
        })
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for WorkerCount {
    type Error = FleetError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl TryFrom<i64> for WorkerCount {
    type Error = FleetError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        let n = usize::try_from(n).map_err(|_| {
            FleetError::Configuration(format!("worker count must be at least 1, got {n}"))
        })?;
        Self::new(n)
    }
}

impl From<WorkerCount> for usize {
    fn from(count: WorkerCount) -> Self {
        count.get()
    }
}

impl std::fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Settings of one coordinator: how many workers, and the deadline every
/// task gets (None = run to completion).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub workers: WorkerCount,
    pub task_deadline: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::one(1)]
    #[case::ten(10)]
    fn accepts_positive_counts(#[case] n: usize) {
        let count = WorkerCount::new(n).unwrap();
        assert_eq!(count.get(), n);
    }

    #[test]
    fn rejects_zero() {
        let err = WorkerCount::new(0).unwrap_err();
        assert!(matches!(err, FleetError::Configuration(_)));
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-1)]
    #[case::very_negative(i64::MIN)]
    fn rejects_non_positive_signed_counts(#[case] n: i64) {
        let err = WorkerCount::try_from(n).unwrap_err();
        assert!(matches!(err, FleetError::Configuration(_)));
    }

    #[test]
    fn deserialize_validates() {
        let ok: WorkerCount = serde_json::from_str("3").unwrap();
        assert_eq!(ok.get(), 3);
        assert!(serde_json::from_str::<WorkerCount>("0").is_err());
    }
}

use thiserror::Error;

use crate::domain::QueueError;

/// Fatal errors of a fleet run.
///
/// Per-task failures never show up here; they are folded into the report.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("worker-{0} terminated abnormally")]
    WorkerPanicked(usize),

    #[error("collected {actual} outcomes for {expected} submitted tasks")]
    OutcomeCountMismatch { expected: usize, actual: usize },
}

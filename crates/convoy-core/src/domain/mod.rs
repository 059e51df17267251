//! Domain model (IDs, tasks, outcomes, report, errors, settings).

pub mod errors;
pub mod ids;
pub mod outcome;
pub mod report;
pub mod settings;
pub mod task;

pub use self::errors::{ErrorKind, QueueError, WorkError};
pub use self::ids::{RunId, TaskId};
pub use self::outcome::{FailureCause, Outcome, OutcomeKind};
pub use self::report::{AggregateReport, RunStatus};
pub use self::settings::{RunSettings, WorkerCount};
pub use self::task::{Deadline, Task, TaskRef};

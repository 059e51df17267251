//! CoordinatorBuilder - FleetCoordinator の構築
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）: ワーカー数 0 は build() で弾く

use std::time::Duration;

use super::coordinator::FleetCoordinator;
use crate::domain::{RunSettings, WorkerCount};
use crate::error::FleetError;

/// Builds a [`FleetCoordinator`].
///
/// # 使用例
/// ```ignore
/// let coordinator = FleetCoordinator::builder()
///     .workers(3)
///     .task_deadline(Duration::from_secs(2))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct CoordinatorBuilder {
    workers: usize,
    task_deadline: Option<Duration>,
}

impl CoordinatorBuilder {
    pub const DEFAULT_WORKERS: usize = 3;

    pub fn new() -> Self {
        Self {
            workers: Self::DEFAULT_WORKERS,
            task_deadline: None,
        }
    }

    pub fn workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    /// Deadline applied to every task, measured from when a worker starts it.
    pub fn task_deadline(mut self, deadline: Duration) -> Self {
        self.task_deadline = Some(deadline);
        self
    }

    /// # 検証
    /// - workers >= 1 でなければ FleetError::Configuration
    pub fn build(self) -> Result<FleetCoordinator, FleetError> {
        let workers = WorkerCount::new(self.workers)?;
        Ok(FleetCoordinator::new(RunSettings {
            workers,
            task_deadline: self.task_deadline,
        }))
    }
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! convoy-core
//!
//! Bounded concurrent task processing with per-task deadlines and error
//! aggregation.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, outcome, report, errors, settings）
//! - **ports**: 抽象化レイヤー（UnitOfWork）
//! - **app**: エンジン本体（task_queue, collector, executor, worker, coordinator）
//! - **error**: 実行全体を止める致命的エラー

pub mod app;
pub mod domain;
pub mod error;
pub mod ports;

pub use app::{FleetCoordinator, process_fleet};
pub use domain::{AggregateReport, ErrorKind, WorkError};
pub use error::FleetError;
pub use ports::{BoxedUnit, UnitOfWork};

//! App - アプリケーション層
//!
//! domain と ports を組み合わせてエンジン本体を実装します。
//!
//! # 主要コンポーネント
//! - **TaskQueue**: 有界・クローズ可能なタスクキュー
//! - **ResultCollector**: Outcome の受け皿
//! - **WorkerGroup**: ワーカープール（recv → execute → report）
//! - **Executor**: 期限付きで 1 タスクを実行
//! - **FleetCoordinator**: 投入・待機・集約

pub mod builder;
pub mod collector;
pub mod coordinator;
pub mod executor;
pub mod task_queue;
pub mod worker;

pub use self::builder::CoordinatorBuilder;
pub use self::collector::{OutcomeReporter, ResultCollector};
pub use self::coordinator::{FleetCoordinator, process_fleet};
pub use self::task_queue::TaskQueue;
pub use self::worker::WorkerGroup;

//! UnitOfWork port - エンジンが実行する最小単位
//!
//! エンジンは具体的なドメイン型（NormalTruck / ElectricTruck など）を知りません。
//! どの実装を使うかは fleet を組み立てる側が構築時に決めます。

use async_trait::async_trait;

use crate::domain::WorkError;

/// A unit of work: one piece of domain logic that may fail.
///
/// The unit is moved into the engine and executed exactly once. It runs on its
/// own tokio task, so it must be `Send + 'static`.
///
/// # 使用例
/// ```ignore
/// struct Ping;
///
/// #[async_trait]
/// impl UnitOfWork for Ping {
///     fn label(&self) -> &str { "ping" }
///     async fn execute(&mut self) -> Result<(), WorkError> { Ok(()) }
/// }
/// ```
#[async_trait]
pub trait UnitOfWork: Send + 'static {
    /// Diagnostic label (e.g. a truck id). Not used for correctness.
    fn label(&self) -> &str;

    async fn execute(&mut self) -> Result<(), WorkError>;
}

/// Boxed unit of work, the form the coordinator accepts.
pub type BoxedUnit = Box<dyn UnitOfWork>;


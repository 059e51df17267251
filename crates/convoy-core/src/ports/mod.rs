//! Ports - 抽象化レイヤー
//!
//! エンジンと外部のドメインロジックの境界。
//! fleet の中身（トラックの積み下ろしなど）はこの trait の向こう側にあります。

pub mod unit_of_work;

pub use self::unit_of_work::{BoxedUnit, UnitOfWork};

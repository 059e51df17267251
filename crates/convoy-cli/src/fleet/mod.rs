//! Fleet - エンジンに渡す unit of work の組み立て
//!
//! - truck: NormalTruck / ElectricTruck とその capability
//! - job: トラックを UnitOfWork に変換するアダプタ
//! - roster: 登録簿（add / get / remove / update）
//! - definition: JSON の fleet 定義ファイル

pub mod definition;
pub mod job;
pub mod roster;
pub mod truck;

pub use self::definition::FleetDefinition;
pub use self::roster::FleetRoster;

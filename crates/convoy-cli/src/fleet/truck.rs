//! Trucks: the domain objects a fleet is made of.
//!
//! 積み下ろし自体は同期・純粋なビジネスロジック。並行性はエンジン側の責務。

use std::fmt;

use thiserror::Error;

/// Cargo units added by one `load_cargo`.
pub const LOAD_STEP: u32 = 2;

/// Battery consumed by each electric load/unload.
pub const BATTERY_PER_OPERATION: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TruckError {
    #[error("truck not found: {0}")]
    NotFound(String),

    #[error("truck already registered: {0}")]
    Duplicate(String),

    #[error("battery depleted ({battery} left)")]
    BatteryDepleted { battery: f64 },

    #[error("cargo overflow ({cargo} on board)")]
    CargoOverflow { cargo: u32 },
}

fn loaded(cargo: u32) -> Result<u32, TruckError> {
    cargo
        .checked_add(LOAD_STEP)
        .ok_or(TruckError::CargoOverflow { cargo })
}

/// The capability every truck variant exposes.
pub trait Truck: fmt::Debug + Send + 'static {
    fn id(&self) -> &str;
    fn cargo(&self) -> u32;
    fn set_cargo(&mut self, cargo: u32);
    fn load_cargo(&mut self) -> Result<(), TruckError>;
    fn unload_cargo(&mut self) -> Result<(), TruckError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalTruck {
    pub id: String,
    pub cargo: u32,
}

impl NormalTruck {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cargo: 0,
        }
    }
}

impl Truck for NormalTruck {
    fn id(&self) -> &str {
        &self.id
    }

    fn cargo(&self) -> u32 {
        self.cargo
    }

    fn set_cargo(&mut self, cargo: u32) {
        self.cargo = cargo;
    }

    fn load_cargo(&mut self) -> Result<(), TruckError> {
        self.cargo = loaded(self.cargo)?;
        Ok(())
    }

    fn unload_cargo(&mut self) -> Result<(), TruckError> {
        self.cargo = 0;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElectricTruck {
    pub id: String,
    pub cargo: u32,
    pub battery: f64,
}

impl ElectricTruck {
    pub const FULL_BATTERY: f64 = 100.0;

    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cargo: 0,
            battery: Self::FULL_BATTERY,
        }
    }

    pub fn with_battery(mut self, battery: f64) -> Self {
        self.battery = battery;
        self
    }

    fn drain_battery(&mut self) -> Result<(), TruckError> {
        if self.battery < BATTERY_PER_OPERATION {
            return Err(TruckError::BatteryDepleted {
                battery: self.battery,
            });
        }
        self.battery -= BATTERY_PER_OPERATION;
        Ok(())
    }
}

impl Truck for ElectricTruck {
    fn id(&self) -> &str {
        &self.id
    }

    fn cargo(&self) -> u32 {
        self.cargo
    }

    fn set_cargo(&mut self, cargo: u32) {
        self.cargo = cargo;
    }

    fn load_cargo(&mut self) -> Result<(), TruckError> {
        let cargo = loaded(self.cargo)?;
        self.drain_battery()?;
        self.cargo = cargo;
        Ok(())
    }

    fn unload_cargo(&mut self) -> Result<(), TruckError> {
        self.drain_battery()?;
        self.cargo = 0;
        Ok(())
    }
}

/// Tagged variant over the concrete trucks, chosen at fleet assembly.
#[derive(Debug, Clone, PartialEq)]
pub enum FleetTruck {
    Normal(NormalTruck),
    Electric(ElectricTruck),
}

impl FleetTruck {
    fn inner(&self) -> &dyn Truck {
        match self {
            FleetTruck::Normal(t) => t,
            FleetTruck::Electric(t) => t,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Truck {
        match self {
            FleetTruck::Normal(t) => t,
            FleetTruck::Electric(t) => t,
        }
    }
}

impl Truck for FleetTruck {
    fn id(&self) -> &str {
        self.inner().id()
    }

    fn cargo(&self) -> u32 {
        self.inner().cargo()
    }

    fn set_cargo(&mut self, cargo: u32) {
        self.inner_mut().set_cargo(cargo);
    }

    fn load_cargo(&mut self) -> Result<(), TruckError> {
        self.inner_mut().load_cargo()
    }

    fn unload_cargo(&mut self) -> Result<(), TruckError> {
        self.inner_mut().unload_cargo()
    }
}

impl From<NormalTruck> for FleetTruck {
    fn from(t: NormalTruck) -> Self {
        FleetTruck::Normal(t)
    }
}

impl From<ElectricTruck> for FleetTruck {
    fn from(t: ElectricTruck) -> Self {
        FleetTruck::Electric(t)
    }
}

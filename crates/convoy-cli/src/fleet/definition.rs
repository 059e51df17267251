//! Fleet definition file (JSON).
//!
//! ```json
//! [
//!   { "id": "NT1", "kind": "normal", "transit_ms": 500 },
//!   { "id": "ET1", "kind": "electric", "battery": 100, "cargo": 4 }
//! ]
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use super::roster::FleetRoster;
use super::truck::{ElectricTruck, FleetTruck, NormalTruck, TruckError};

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("cannot read fleet definition {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid fleet definition: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Truck(#[from] TruckError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TruckKind {
    Normal,
    Electric {
        #[serde(default = "full_battery")]
        battery: f64,
    },
}

fn full_battery() -> f64 {
    ElectricTruck::FULL_BATTERY
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TruckEntry {
    pub id: String,
    #[serde(flatten)]
    pub kind: TruckKind,
    #[serde(default)]
    pub cargo: u32,
    /// Overrides the default transit time for this truck.
    #[serde(default)]
    pub transit_ms: Option<u64>,
}

impl TruckEntry {
    fn to_truck(&self) -> FleetTruck {
        match self.kind {
            TruckKind::Normal => NormalTruck {
                id: self.id.clone(),
                cargo: self.cargo,
            }
            .into(),
            TruckKind::Electric { battery } => ElectricTruck {
                id: self.id.clone(),
                cargo: self.cargo,
                battery,
            }
            .into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FleetDefinition {
    pub trucks: Vec<TruckEntry>,
}

impl FleetDefinition {
    pub fn from_json(s: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Register every entry; duplicate ids are rejected.
    pub fn into_roster(self, default_transit: Duration) -> Result<FleetRoster, DefinitionError> {
        let mut roster = FleetRoster::new();
        for entry in &self.trucks {
            let transit = entry
                .transit_ms
                .map(Duration::from_millis)
                .unwrap_or(default_transit);
            roster.add_truck(entry.to_truck(), transit)?;
        }
        Ok(roster)
    }
}

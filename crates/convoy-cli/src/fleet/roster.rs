//! FleetRoster - トラックの登録簿
//!
//! キーは `Truck-<id>`。挿入順を保持し、その順でエンジンに投入する。

use std::collections::HashMap;
use std::time::Duration;

use convoy_core::BoxedUnit;

use super::job::TruckJob;
use super::truck::{ElectricTruck, FleetTruck, NormalTruck, Truck, TruckError};

#[derive(Debug)]
struct Entry {
    truck: FleetTruck,
    transit: Duration,
}

#[derive(Debug, Default)]
pub struct FleetRoster {
    trucks: HashMap<String, Entry>,
    order: Vec<String>,
}

fn key(id: &str) -> String {
    format!("Truck-{id}")
}

impl FleetRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// NT1, ET1, NT2, ET2 の 4 台
    pub fn demo(transit: Duration) -> Self {
        let trucks: [FleetTruck; 4] = [
            NormalTruck::new("NT1").into(),
            ElectricTruck::new("ET1").into(),
            NormalTruck::new("NT2").into(),
            ElectricTruck::new("ET2").into(),
        ];
        trucks
            .into_iter()
            .fold(Self::new(), |mut roster, truck| {
                roster.insert(truck, transit);
                roster
            })
    }

    pub fn add_truck(
        &mut self,
        truck: impl Into<FleetTruck>,
        transit: Duration,
    ) -> Result<(), TruckError> {
        let truck = truck.into();
        if self.trucks.contains_key(&key(truck.id())) {
            return Err(TruckError::Duplicate(truck.id().to_string()));
        }
        self.insert(truck, transit);
        Ok(())
    }

    /// Register without the duplicate check; an existing entry is replaced in place.
    fn insert(&mut self, truck: FleetTruck, transit: Duration) {
        let k = key(truck.id());
        if self.trucks.insert(k.clone(), Entry { truck, transit }).is_none() {
            self.order.push(k);
        }
    }

    pub fn get_truck(&self, id: &str) -> Result<&FleetTruck, TruckError> {
        self.trucks
            .get(&key(id))
            .map(|e| &e.truck)
            .ok_or_else(|| TruckError::NotFound(id.to_string()))
    }

    pub fn remove_truck(&mut self, id: &str) -> Result<FleetTruck, TruckError> {
        let k = key(id);
        let entry = self
            .trucks
            .remove(&k)
            .ok_or_else(|| TruckError::NotFound(id.to_string()))?;
        self.order.retain(|o| o != &k);
        Ok(entry.truck)
    }

    pub fn update_truck_cargo(&mut self, id: &str, cargo: u32) -> Result<(), TruckError> {
        let entry = self
            .trucks
            .get_mut(&key(id))
            .ok_or_else(|| TruckError::NotFound(id.to_string()))?;
        entry.truck.set_cargo(cargo);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Hand every truck over to the engine, in registration order.
    pub fn into_units(self) -> Vec<BoxedUnit> {
        let Self { mut trucks, order } = self;
        order
            .iter()
            .filter_map(|k| trucks.remove(k))
            .map(|e| Box::new(TruckJob::new(e.truck, e.transit)) as BoxedUnit)
            .collect()
    }
}

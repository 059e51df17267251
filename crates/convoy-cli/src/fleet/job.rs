use std::time::Duration;

use async_trait::async_trait;
use convoy_core::{UnitOfWork, WorkError};
use tracing::debug;

use super::truck::Truck;

/// Adapts a truck to the engine: drive (simulated transit), load, unload.
#[derive(Debug)]
pub struct TruckJob<T: Truck> {
    truck: T,
    transit: Duration,
}

impl<T: Truck> TruckJob<T> {
    pub fn new(truck: T, transit: Duration) -> Self {
        Self { truck, transit }
    }
}

#[async_trait]
impl<T: Truck> UnitOfWork for TruckJob<T> {
    fn label(&self) -> &str {
        self.truck.id()
    }

    async fn execute(&mut self) -> Result<(), WorkError> {
        debug!(truck = ?self.truck, "started processing truck");

        if !self.transit.is_zero() {
            tokio::time::sleep(self.transit).await;
        }

        self.truck
            .load_cargo()
            .map_err(|e| WorkError::with_source("error loading cargo", e))?;
        self.truck
            .unload_cargo()
            .map_err(|e| WorkError::with_source("error unloading cargo", e))?;

        debug!(truck = ?self.truck, "finished processing truck");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::truck::{ElectricTruck, NormalTruck};

    #[tokio::test]
    async fn job_loads_then_unloads() {
        let mut job = TruckJob::new(NormalTruck::new("NT1"), Duration::ZERO);
        job.execute().await.unwrap();
        assert_eq!(job.truck.cargo, 0);
        assert_eq!(job.label(), "NT1");
    }

    #[tokio::test]
    async fn electric_job_spends_two_battery_units() {
        let mut job = TruckJob::new(ElectricTruck::new("ET1"), Duration::from_millis(5));
        job.execute().await.unwrap();
        assert_eq!(job.truck.battery, ElectricTruck::FULL_BATTERY - 2.0);
    }

    #[tokio::test]
    async fn truck_errors_are_wrapped_with_context() {
        let truck = ElectricTruck::new("ET9").with_battery(0.5);
        let mut job = TruckJob::new(truck, Duration::ZERO);
        let err = job.execute().await.unwrap_err();
        assert_eq!(err.message(), "error loading cargo");
        assert_eq!(
            err.to_string(),
            "error loading cargo: battery depleted (0.5 left)"
        );
    }

    #[tokio::test]
    async fn overfull_truck_fails_instead_of_wrapping() {
        let mut truck = NormalTruck::new("NT9");
        truck.cargo = u32::MAX;
        let mut job = TruckJob::new(truck, Duration::ZERO);
        let err = job.execute().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("error loading cargo: cargo overflow ({} on board)", u32::MAX)
        );
    }
}

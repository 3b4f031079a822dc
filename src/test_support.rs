//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::api::{ApiError, CarRecord, CarResource};

/// In-memory stand-in for the backend. Serves canned records and keeps
/// a journal of every call so tests can assert what the page actually
/// asked for.
#[derive(Default)]
pub struct StubResource {
    cars: Vec<CarRecord>,
    fail_status: Option<u16>,
    calls: Mutex<Vec<String>>,
    last_update: Mutex<Option<CarRecord>>,
}

impl StubResource {
    /// A stub pre-loaded with two records: a fully filled one and a
    /// sparse one.
    pub fn with_sample_cars() -> Self {
        let full = CarRecord {
            id: Some("car-1".to_string()),
            mileage: Some(56000.0),
            fuel_consumption: Some(6.2),
            fuel_type: Some("petrol".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 6, 15, 4, 30, 0).single(),
            ..CarRecord::new("Toyota", "Corolla")
        };
        let sparse = CarRecord {
            id: Some("car-2".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).single(),
            ..CarRecord::new("BYD", "Seal")
        };
        StubResource {
            cars: vec![full, sparse],
            ..StubResource::default()
        }
    }

    /// A stub whose every operation fails with the given status.
    pub fn failing(status: u16) -> Self {
        StubResource {
            fail_status: Some(status),
            ..StubResource::default()
        }
    }

    /// The operations seen so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// The record most recently passed to `update_car`.
    pub fn last_update(&self) -> Option<CarRecord> {
        self.last_update.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call.into());
        match self.fail_status {
            Some(status) => Err(ApiError::Status {
                status,
                message: "stub failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CarResource for StubResource {
    async fn list_cars(&self) -> Result<Vec<CarRecord>, ApiError> {
        self.record("list")?;
        Ok(self.cars.clone())
    }

    async fn get_car(&self, id: &str) -> Result<CarRecord, ApiError> {
        self.record(format!("get:{id}"))?;
        self.cars
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                message: "车辆信息不存在".to_string(),
            })
    }

    async fn cars_by_brand(&self, brand: &str) -> Result<Vec<CarRecord>, ApiError> {
        self.record(format!("brand:{brand}"))?;
        Ok(self
            .cars
            .iter()
            .filter(|c| c.brand == brand)
            .cloned()
            .collect())
    }

    async fn create_car(&self, car: &CarRecord) -> Result<CarRecord, ApiError> {
        self.record(format!("create:{}", car.brand))?;
        let mut created = car.clone();
        created.id = Some(format!("car-{}", self.cars.len() + 1));
        created.created_at = Some(Utc::now());
        Ok(created)
    }

    async fn update_car(&self, id: &str, car: &CarRecord) -> Result<CarRecord, ApiError> {
        self.record(format!("update:{id}"))?;
        *self.last_update.lock().unwrap() = Some(car.clone());
        let mut updated = car.clone();
        updated.id = Some(id.to_string());
        updated.updated_at = Some(Utc::now());
        Ok(updated)
    }

    async fn delete_car(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete:{id}"))
    }
}

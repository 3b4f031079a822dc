use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One vehicle record, in the backend's wire shape (camelCase keys,
/// optional fields omitted when absent).
///
/// The client carries this payload back and forth without validating
/// or interpreting it: only `id` and `brand` ever participate in
/// request construction. `id`, `created_at` and `updated_at` are
/// assigned by the backend, so a record built locally for creation
/// leaves them `None`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub brand: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_consumption: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_mileage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_scenario: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CarRecord {
    /// Creates a record with only the required fields set, ready to be
    /// sent to the create endpoint.
    pub fn new(brand: impl Into<String>, model: impl Into<String>) -> Self {
        CarRecord {
            brand: brand.into(),
            model: model.into(),
            ..CarRecord::default()
        }
    }
}

//! HTTP access to the backend's car collection.
//!
//! Six operations, each one request/response pair. There is no retry,
//! no caching and no status-code interpretation here: the response
//! body either decodes into the caller's type or the failure is
//! handed back as an [`ApiError`] for the caller to deal with.

use std::fmt;

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;

use super::types::CarRecord;

/// Errors surfaced by car API operations.
///
/// The variants mirror what the transport can actually report; the
/// client never maps them to anything finer.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (DNS, refused connection, timeout).
    Network(String),
    /// The backend answered with a non-success status. The body text
    /// is preserved verbatim.
    Status { status: u16, message: String },
    /// The response body did not decode into the expected type.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Status { status, message } => {
                write!(f, "backend error (HTTP {status}): {message}")
            }
            ApiError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The six car operations behind one seam, so callers (and tests) can
/// run against something other than a live backend.
#[async_trait]
pub trait CarResource: Send + Sync {
    /// Fetches every record in the collection.
    async fn list_cars(&self) -> Result<Vec<CarRecord>, ApiError>;

    /// Fetches a single record by its backend-assigned id.
    async fn get_car(&self, id: &str) -> Result<CarRecord, ApiError>;

    /// Fetches all records of one brand.
    async fn cars_by_brand(&self, brand: &str) -> Result<Vec<CarRecord>, ApiError>;

    /// Creates a record; the backend assigns the id and timestamps.
    async fn create_car(&self, car: &CarRecord) -> Result<CarRecord, ApiError>;

    /// Replaces the record stored under `id`.
    async fn update_car(&self, id: &str, car: &CarRecord) -> Result<CarRecord, ApiError>;

    /// Deletes the record stored under `id`.
    async fn delete_car(&self, id: &str) -> Result<(), ApiError>;
}

/// Resource client backed by reqwest.
pub struct CarApi {
    client: reqwest::Client,
    base_url: String,
}

impl CarApi {
    /// Creates a client against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        CarApi {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sorts a response into the success body or an [`ApiError`].
    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("car API error: HTTP {} - {}", status.as_u16(), message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        response.json().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CarResource for CarApi {
    async fn list_cars(&self) -> Result<Vec<CarRecord>, ApiError> {
        debug!("GET /api/cars");
        let response = self
            .client
            .get(self.url("/api/cars"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.decode(response).await
    }

    async fn get_car(&self, id: &str) -> Result<CarRecord, ApiError> {
        debug!("GET /api/cars/{id}");
        let response = self
            .client
            .get(self.url(&format!("/api/cars/{id}")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.decode(response).await
    }

    async fn cars_by_brand(&self, brand: &str) -> Result<Vec<CarRecord>, ApiError> {
        debug!("GET /api/cars/brand/{brand}");
        let response = self
            .client
            .get(self.url(&format!("/api/cars/brand/{brand}")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.decode(response).await
    }

    async fn create_car(&self, car: &CarRecord) -> Result<CarRecord, ApiError> {
        debug!("POST /api/cars ({} {})", car.brand, car.model);
        let response = self
            .client
            .post(self.url("/api/cars"))
            .json(car)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.decode(response).await
    }

    async fn update_car(&self, id: &str, car: &CarRecord) -> Result<CarRecord, ApiError> {
        debug!("PUT /api/cars/{id}");
        let response = self
            .client
            .put(self.url(&format!("/api/cars/{id}")))
            .json(car)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.decode(response).await
    }

    async fn delete_car(&self, id: &str) -> Result<(), ApiError> {
        debug!("DELETE /api/cars/{id}");
        let response = self
            .client
            .delete(self.url(&format!("/api/cars/{id}")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("car API error: HTTP {} - {}", status.as_u16(), message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let api = CarApi::new("http://localhost:8080");
        assert_eq!(api.url("/api/cars"), "http://localhost:8080/api/cars");
        assert_eq!(
            api.url("/api/cars/brand/Toyota"),
            "http://localhost:8080/api/cars/brand/Toyota"
        );
    }

    #[test]
    fn test_api_error_display_keeps_status_and_body() {
        let err = ApiError::Status {
            status: 404,
            message: "车辆信息不存在".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("404"));
        assert!(rendered.contains("车辆信息不存在"));
    }
}

//! # Car API
//!
//! The only interface to the backend's `/api/cars` collection.
//!
//! - [`types`]: the `CarRecord` wire type
//! - [`client`]: the `CarResource` trait and its reqwest-backed
//!   implementation, `CarApi`
//!
//! Requests are fire-and-await: no retries, no caching, no in-flight
//! coordination. Two overlapping calls for the same record race and
//! the last response wins.

pub mod client;
pub mod types;

pub use client::{ApiError, CarApi, CarResource};
pub use types::CarRecord;

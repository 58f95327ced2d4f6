//! The `utils` module provides a collection of utility functions and common
//! definitions used across the `sensorhub` application.
//!
//! It holds the crate-wide error type and the tracing setup shared by both
//! binaries.

pub mod error;
pub mod logging;

pub use error::{Error, Result};

//! The `publisher` module runs the simulated sensors.
//!
//! Every configured sensor gets its own `SensorPublisher` running on an
//! independent tokio task. Loops share nothing; a failure in one never
//! affects the others.

pub mod sensor_publisher;
pub mod supervisor;

pub use sensor_publisher::SensorPublisher;
pub use supervisor::{run_until, spawn_publishers};

#[cfg(test)]
mod tests;

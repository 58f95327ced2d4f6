//! The `sensor` module holds everything a simulated sensor produces: the
//! random value generators and the `Reading` payload sent over the wire.

pub mod generator;
pub mod reading;

pub use generator::{Generator, SensorKind, SensorValue};
pub use reading::Reading;

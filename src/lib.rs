//! # SensorHub
//!
//! `sensorhub` simulates a small set of MQTT sensors and records what they
//! publish. It ships two binaries built on this library:
//!
//! - `publisher`: one timer loop per sensor, each publishing a JSON reading to
//!   its own topic.
//! - `subscriber`: subscribes to every sensor topic and appends each message
//!   to a shared log file and a per-topic log file.
//!
//! ## Core Modules
//!
//! - `config`: Loads settings from `config/default.toml` and the environment.
//! - `sensor`: Value generators and the `Reading` payload.
//! - `transport`: Broker traits and their `rumqttc` implementation.
//! - `publisher`: Sensor publisher loops and the task supervisor.
//! - `subscriber`: The message logger and its log records.
//! - `utils`: Error type and tracing setup.

pub mod config;
pub mod publisher;
pub mod sensor;
pub mod subscriber;
pub mod transport;
pub mod utils;

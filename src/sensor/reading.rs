use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::sensor::generator::{SensorKind, SensorValue};
use crate::utils::Result;

/// The payload published by every simulated sensor.
///
/// Serialized as a flat JSON object whose keys keep this field order:
///
/// ```json
/// {"student_id":"12217558","sensor":"temperature","value":24.17,"timestamp":"2024-05-01T12:00:00.123456Z"}
/// ```
///
/// `sensor` stays a plain string so that readings from publishers using other
/// naming schemes still parse on the subscriber side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub student_id: String,
    pub sensor: String,
    pub value: SensorValue,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Reading {
    /// Builds a reading stamped with `at`.
    pub fn new(
        student_id: impl Into<String>,
        kind: SensorKind,
        value: SensorValue,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            sensor: kind.name().to_string(),
            value,
            timestamp: at,
        }
    }

    /// Builds a reading stamped with the current UTC time.
    ///
    /// The time is truncated to microseconds, the precision of the wire format,
    /// so a reading survives a JSON round trip unchanged.
    pub fn now(student_id: impl Into<String>, kind: SensorKind, value: SensorValue) -> Self {
        Self::new(student_id, kind, value, Utc::now().trunc_subsecs(6))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// ISO-8601 timestamps in UTC with microseconds and a trailing `Z`.
///
/// Parsing accepts any RFC 3339 timestamp and normalizes it to UTC.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(at: &DateTime<Utc>) -> String {
        at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sensor::Reading;
use crate::sensor::reading::timestamp;
use crate::utils::Result;

/// What was received: the JSON document as received, or the raw text when
/// the body is not JSON at all.
///
/// Parsed documents keep their key order, integer/float distinction and
/// string values such as timestamps.
/// The fallback serializes as `{"raw": "<text>"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogPayload {
    Parsed(Value),
    Raw { raw: String },
}

impl LogPayload {
    /// Parses a message body; anything that is not JSON becomes `Raw`.
    pub fn parse(text: &str) -> std::result::Result<Self, (Self, serde_json::Error)> {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Ok(LogPayload::Parsed(value)),
            Err(e) => Err((
                LogPayload::Raw {
                    raw: text.to_string(),
                },
                e,
            )),
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, LogPayload::Raw { .. })
    }

    /// The payload as a sensor reading, if it has that shape.
    pub fn reading(&self) -> Option<Reading> {
        match self {
            LogPayload::Parsed(value) => Reading::deserialize(value).ok(),
            LogPayload::Raw { .. } => None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One received message, as written to the logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    #[serde(with = "timestamp")]
    pub received_at: DateTime<Utc>,
    pub topic: String,
    pub payload: LogPayload,
}

impl LogEntry {
    /// Line for the shared log: the whole entry as JSON.
    pub fn shared_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Line for the per-topic log: `<received_at> <payload as JSON>`.
    pub fn topic_line(&self) -> Result<String> {
        Ok(format!(
            "{} {}",
            timestamp::format(&self.received_at),
            self.payload.to_json()?
        ))
    }
}

/// File name of the per-topic log, e.g. `sub_sensors_humidity.log`.
pub fn topic_log_name(topic: &str) -> String {
    format!("sub_{}.log", topic.replace('/', "_"))
}

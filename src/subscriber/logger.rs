use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SubsecRound, Utc};
use tracing::{debug, info, warn};

use crate::config::SubscriberSettings;
use crate::subscriber::log_entry::{LogEntry, LogPayload, topic_log_name};
use crate::transport::{ConnectReturnCode, MessageHandler};
use crate::utils::{Error, Result};

/// Records every inbound message.
///
/// Log files are opened in append mode for each message and closed again
/// before the next one; no handle is kept between messages.
#[derive(Debug, Clone)]
pub struct MessageLogger {
    topic_filter: String,
    log_dir: PathBuf,
    shared_log: PathBuf,
}

impl MessageLogger {
    /// Builds a logger and makes sure its log directory exists.
    pub fn new(settings: &SubscriberSettings) -> Result<Self> {
        let log_dir = PathBuf::from(&settings.log_dir);
        fs::create_dir_all(&log_dir).map_err(|source| Error::Io {
            path: log_dir.clone(),
            source,
        })?;

        Ok(Self {
            topic_filter: settings.topic_filter.clone(),
            shared_log: log_dir.join(&settings.shared_log),
            log_dir,
        })
    }

    pub fn shared_log_path(&self) -> &Path {
        &self.shared_log
    }

    pub fn topic_log_path(&self, topic: &str) -> PathBuf {
        self.log_dir.join(topic_log_name(topic))
    }

    /// Parses, records and returns the entry for one message.
    ///
    /// JSON bodies are logged as received. A body that is not JSON is kept
    /// verbatim under `raw` and still written everywhere. Only file errors fail.
    pub fn handle(&self, topic: &str, payload: &[u8]) -> Result<LogEntry> {
        let text = String::from_utf8_lossy(payload);

        let payload = match LogPayload::parse(&text) {
            Ok(parsed) => {
                if parsed.reading().is_none() {
                    debug!("Payload on {} is JSON but not a sensor reading", topic);
                }
                println!("Received message on topic {}: {}", topic, parsed.to_json()?);
                parsed
            }
            Err((raw, e)) => {
                warn!("Invalid JSON on {}: {}", topic, e);
                println!("Received invalid JSON on topic {}: {}", topic, raw.to_json()?);
                raw
            }
        };

        let entry = LogEntry {
            received_at: Utc::now().trunc_subsecs(6),
            topic: topic.to_string(),
            payload,
        };

        append_line(&self.shared_log, &entry.shared_line()?)?;
        let topic_line = entry.topic_line()?;
        append_line(&self.topic_log_path(topic), &topic_line)?;

        info!("RECEIVED {} : {}", topic, text);
        println!("Logged entry: {}", entry.shared_line()?);
        println!("{}", topic_line);

        Ok(entry)
    }
}

impl MessageHandler for MessageLogger {
    fn on_connect(&mut self, code: ConnectReturnCode) -> Vec<String> {
        info!("Connected to broker with result code {:?}", code);
        println!("Connected with result code {:?}", code);
        vec![self.topic_filter.clone()]
    }

    fn on_message(&mut self, topic: &str, payload: &[u8]) -> Result<()> {
        self.handle(topic, payload).map(|_| ())
    }
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let io_error = |source: std::io::Error| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error)?;
    writeln!(file, "{}", line).map_err(io_error)
}

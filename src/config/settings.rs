use serde::Deserialize;

use crate::sensor::SensorKind;

/// Top-level configuration settings for the application.
///
/// Includes settings for the broker connection, both binaries and logging.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub broker: BrokerSettings,
    pub publisher: PublisherSettings,
    pub subscriber: SubscriberSettings,
    pub logging: LoggingSettings,
}

/// Where the MQTT broker lives and how to keep the session alive.
#[derive(Debug, Deserialize, Clone)]
pub struct BrokerSettings {
    pub host: String,
    pub port: u16,
    pub keep_alive_secs: u64,
}

/// Configuration of the simulated sensor publishers.
///
/// `student_id` is stamped on every reading. Each publisher connects with the
/// client id `client_prefix` + `client_suffix`.
#[derive(Debug, Deserialize, Clone)]
pub struct PublisherSettings {
    pub student_id: String,
    pub client_prefix: String,
    pub sensors: Vec<SensorSettings>,
}

/// One simulated sensor.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SensorSettings {
    pub kind: SensorKind,
    pub client_suffix: String,
    pub topic: String,
    pub interval_secs: u64,
}

/// Configuration of the logging subscriber.
#[derive(Debug, Deserialize, Clone)]
pub struct SubscriberSettings {
    pub client_id: String,
    pub topic_filter: String,
    pub log_dir: String,
    pub shared_log: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub broker: Option<PartialBrokerSettings>,
    pub publisher: Option<PartialPublisherSettings>,
    pub subscriber: Option<PartialSubscriberSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialBrokerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub keep_alive_secs: Option<u64>,
}

/// Partial publisher settings.
///
/// The sensor list is replaced as a whole when present.
#[derive(Debug, Deserialize)]
pub struct PartialPublisherSettings {
    pub student_id: Option<String>,
    pub client_prefix: Option<String>,
    pub sensors: Option<Vec<SensorSettings>>,
}

#[derive(Debug, Deserialize)]
pub struct PartialSubscriberSettings {
    pub client_id: Option<String>,
    pub topic_filter: Option<String>,
    pub log_dir: Option<String>,
    pub shared_log: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

/// Provides default values for `Settings`.
///
/// These reproduce the fixed deployment: a local broker, three sensors
/// publishing every 5, 7 and 10 seconds, and logs under `logs/`.
impl Default for Settings {
    fn default() -> Self {
        Self {
            broker: BrokerSettings {
                host: "localhost".to_string(),
                port: 1883,
                keep_alive_secs: 60,
            },
            publisher: PublisherSettings {
                student_id: "12217558".to_string(),
                client_prefix: "pub_client_".to_string(),
                sensors: vec![
                    SensorSettings {
                        kind: SensorKind::Temperature,
                        client_suffix: "temp".to_string(),
                        topic: "sensors/temperature".to_string(),
                        interval_secs: 5,
                    },
                    SensorSettings {
                        kind: SensorKind::Humidity,
                        client_suffix: "hum".to_string(),
                        topic: "sensors/humidity".to_string(),
                        interval_secs: 7,
                    },
                    SensorSettings {
                        kind: SensorKind::PeopleCounter,
                        client_suffix: "people".to_string(),
                        topic: "sensors/people_counter".to_string(),
                        interval_secs: 10,
                    },
                ],
            },
            subscriber: SubscriberSettings {
                client_id: "subscriber_client".to_string(),
                topic_filter: "sensors/#".to_string(),
                log_dir: "logs".to_string(),
                shared_log: "subscriber_log.txt".to_string(),
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

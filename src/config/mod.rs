mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{
    BrokerSettings, LoggingSettings, PublisherSettings, SensorSettings, Settings,
    SubscriberSettings,
};

/// Prefix of the environment variables that override file settings,
/// e.g. `SENSORHUB__BROKER__PORT=1884`.
pub const ENV_PREFIX: &str = "SENSORHUB";

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the broker, publisher, subscriber and logging configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    // Keys contain underscores, so nesting uses a double underscore.
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    let broker = partial.broker;
    let publisher = partial.publisher;
    let subscriber = partial.subscriber;

    Ok(Settings {
        broker: BrokerSettings {
            host: broker
                .as_ref()
                .and_then(|b| b.host.clone())
                .unwrap_or(default.broker.host),
            port: broker
                .as_ref()
                .and_then(|b| b.port)
                .unwrap_or(default.broker.port),
            keep_alive_secs: broker
                .as_ref()
                .and_then(|b| b.keep_alive_secs)
                .unwrap_or(default.broker.keep_alive_secs),
        },
        publisher: PublisherSettings {
            student_id: publisher
                .as_ref()
                .and_then(|p| p.student_id.clone())
                .unwrap_or(default.publisher.student_id),
            client_prefix: publisher
                .as_ref()
                .and_then(|p| p.client_prefix.clone())
                .unwrap_or(default.publisher.client_prefix),
            sensors: publisher
                .and_then(|p| p.sensors)
                .unwrap_or(default.publisher.sensors),
        },
        subscriber: SubscriberSettings {
            client_id: subscriber
                .as_ref()
                .and_then(|s| s.client_id.clone())
                .unwrap_or(default.subscriber.client_id),
            topic_filter: subscriber
                .as_ref()
                .and_then(|s| s.topic_filter.clone())
                .unwrap_or(default.subscriber.topic_filter),
            log_dir: subscriber
                .as_ref()
                .and_then(|s| s.log_dir.clone())
                .unwrap_or(default.subscriber.log_dir),
            shared_log: subscriber
                .as_ref()
                .and_then(|s| s.shared_log.clone())
                .unwrap_or(default.subscriber.shared_log),
        },
        logging: LoggingSettings {
            level: partial
                .logging
                .and_then(|l| l.level)
                .unwrap_or(default.logging.level),
        },
    })
}

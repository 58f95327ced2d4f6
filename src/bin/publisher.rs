use std::sync::Arc;

use sensorhub::config::load_config;
use sensorhub::publisher::run_until;
use sensorhub::transport::mqtt::MqttTransport;
use sensorhub::utils::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(&config.logging.level);

    info!(
        "Publishing {} sensors to {}:{}",
        config.publisher.sensors.len(),
        config.broker.host,
        config.broker.port
    );

    let transport = Arc::new(MqttTransport::new(&config.broker));
    run_until(&config.publisher, transport, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
    })
    .await;
}

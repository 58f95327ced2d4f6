use sensorhub::config::{Settings, load_config};
use sensorhub::subscriber::MessageLogger;
use sensorhub::transport::mqtt::run_subscriber;
use sensorhub::utils::{Result, logging};
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

    tokio::select! {
        result = run(&config) => {
            if let Err(e) = result {
                error!("Subscriber failed: {}", e);
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            println!("\nSubscriber stopped by user");
        }
    }
}

async fn run(config: &Settings) -> Result<()> {
    let mut logger = MessageLogger::new(&config.subscriber)?;
    info!(
        "Logging {} to {}",
        config.subscriber.topic_filter,
        logger.shared_log_path().display()
    );
    run_subscriber(&config.broker, &config.subscriber.client_id, &mut logger).await
}

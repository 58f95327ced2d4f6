use std::future::Future;
use std::sync::Arc;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::PublisherSettings;
use crate::publisher::SensorPublisher;
use crate::transport::Transport;
use crate::utils::Result;

/// Starts one task per configured sensor.
pub fn spawn_publishers<T: Transport>(
    settings: &PublisherSettings,
    transport: Arc<T>,
) -> Vec<JoinHandle<Result<()>>> {
    settings
        .sensors
        .iter()
        .map(|sensor| {
            let publisher = SensorPublisher::from_settings(settings, sensor);
            info!("Starting publisher {} on {}", publisher.client_id, publisher.topic);
            tokio::spawn(publisher.run(transport.clone()))
        })
        .collect()
}

/// Runs every publisher until `shutdown` resolves.
///
/// Returns early if every loop has ended on its own, which only happens when
/// all of them failed to connect. Loops still running when this returns are
/// not stopped; they end with the runtime.
pub async fn run_until<T, F>(settings: &PublisherSettings, transport: Arc<T>, shutdown: F)
where
    T: Transport,
    F: Future<Output = ()>,
{
    let handles = spawn_publishers(settings, transport);

    tokio::select! {
        _ = shutdown => {
            info!("Shutdown signal received");
            println!("Stopping publishers...");
        }
        results = join_all(handles) => {
            let failed = results
                .iter()
                .filter(|r| !matches!(r, Ok(Ok(()))))
                .count();
            warn!("All publishers stopped ({} failed)", failed);
        }
    }
}

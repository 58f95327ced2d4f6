use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::{PublisherSettings, SensorSettings};
use crate::sensor::{Generator, Reading, SensorKind};
use crate::transport::{Session, Transport};
use crate::utils::Result;

/// A timer loop publishing one simulated sensor.
#[derive(Debug, Clone)]
pub struct SensorPublisher {
    pub client_id: String,
    pub topic: String,
    pub interval: Duration,
    pub kind: SensorKind,
    pub student_id: String,
    generator: Generator,
}

impl SensorPublisher {
    pub fn new(
        client_id: impl Into<String>,
        topic: impl Into<String>,
        interval: Duration,
        kind: SensorKind,
        student_id: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            topic: topic.into(),
            interval,
            kind,
            student_id: student_id.into(),
            generator: kind.generator(),
        }
    }

    pub fn from_settings(publisher: &PublisherSettings, sensor: &SensorSettings) -> Self {
        Self::new(
            format!("{}{}", publisher.client_prefix, sensor.client_suffix),
            sensor.topic.clone(),
            Duration::from_secs(sensor.interval_secs),
            sensor.kind,
            publisher.student_id.clone(),
        )
    }

    /// Replaces the value source, e.g. with a fixed value.
    pub fn with_generator(mut self, generator: Generator) -> Self {
        self.generator = generator;
        self
    }

    /// Generates, serializes and wraps the next reading.
    pub fn next_payload(&self) -> Result<String> {
        let value = (self.generator)();
        Reading::now(self.student_id.as_str(), self.kind, value).to_json()
    }

    /// Connects, then publishes forever.
    ///
    /// Only a failed initial connection ends the loop; it is reported and not
    /// retried. Failed publishes are reported and the loop carries on.
    pub async fn run<T: Transport>(self, transport: Arc<T>) -> Result<()> {
        let mut session = match transport.connect(&self.client_id).await {
            Ok(session) => session,
            Err(e) => {
                error!("Publisher {} failed to connect: {}", self.client_id, e);
                println!("Error in publisher {}: {}", self.client_id, e);
                return Err(e);
            }
        };

        info!(
            "Publisher {} started, publishing to {} every {:?}",
            self.client_id, self.topic, self.interval
        );

        loop {
            self.tick(&mut session).await;
            tokio::time::sleep(self.interval).await;
        }
    }

    async fn tick<S: Session>(&self, session: &mut S) {
        let payload = match self.next_payload() {
            Ok(payload) => payload,
            Err(e) => {
                warn!("{}: could not build payload: {}", self.client_id, e);
                return;
            }
        };

        match session.publish(&self.topic, payload.clone()).await {
            Ok(()) => {
                info!("Published to {}: {}", self.topic, payload);
                println!("Published to {}: {}", self.topic, payload);
            }
            Err(e) => {
                warn!("Publish to {} failed: {}", self.topic, e);
                println!("Publish to {} failed: {} (payload {})", self.topic, e, payload);
            }
        }
    }
}

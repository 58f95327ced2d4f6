use std::time::Duration;

use async_trait::async_trait;
use rumqttc::{AsyncClient, ConnectReturnCode, Event, EventLoop, MqttOptions, Packet, QoS};
use tracing::{debug, error, info};

use crate::config::BrokerSettings;
use crate::transport::{MessageHandler, Session, Transport};
use crate::utils::{Error, Result};

/// Capacity of the request channel between a client handle and its event loop.
const REQUEST_CAPACITY: usize = 10;

/// `Transport` backed by a real MQTT broker through `rumqttc`.
#[derive(Debug, Clone)]
pub struct MqttTransport {
    host: String,
    port: u16,
    keep_alive: Duration,
}

impl MqttTransport {
    pub fn new(settings: &BrokerSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            keep_alive: Duration::from_secs(settings.keep_alive_secs),
        }
    }

    fn options(&self, client_id: &str) -> MqttOptions {
        let mut options = MqttOptions::new(client_id, self.host.clone(), self.port);
        options.set_keep_alive(self.keep_alive);
        options
    }
}

#[async_trait]
impl Transport for MqttTransport {
    type Session = MqttSession;

    async fn connect(&self, client_id: &str) -> Result<MqttSession> {
        let (client, mut eventloop) = AsyncClient::new(self.options(client_id), REQUEST_CAPACITY);

        let code = wait_for_connack(&mut eventloop, client_id).await?;
        info!("{} connected to {}:{} ({:?})", client_id, self.host, self.port, code);

        tokio::spawn(drive(eventloop, client_id.to_string()));

        Ok(MqttSession { client })
    }
}

/// A connected publisher. Its event loop runs on a background task.
#[derive(Debug)]
pub struct MqttSession {
    client: AsyncClient,
}

#[async_trait]
impl Session for MqttSession {
    async fn publish(&mut self, topic: &str, payload: String) -> Result<()> {
        self.client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .await
            .map_err(|e| Error::Publish(e.to_string()))
    }
}

/// Polls until the broker answers the CONNECT packet.
async fn wait_for_connack(eventloop: &mut EventLoop, client_id: &str) -> Result<ConnectReturnCode> {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                return match ack.code {
                    ConnectReturnCode::Success => Ok(ack.code),
                    code => Err(Error::Connect {
                        client_id: client_id.to_string(),
                        reason: format!("broker refused connection: {:?}", code),
                    }),
                };
            }
            Ok(_) => {}
            Err(e) => {
                return Err(Error::Connect {
                    client_id: client_id.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// Keeps a publisher's event loop moving. There is no reconnection: after the
/// first error the loop is dropped and later publishes fail.
async fn drive(mut eventloop: EventLoop, client_id: String) {
    loop {
        match eventloop.poll().await {
            Ok(event) => debug!("{} event: {:?}", client_id, event),
            Err(e) => {
                error!("{} lost its broker connection: {}", client_id, e);
                return;
            }
        }
    }
}

/// Connects `client_id` and feeds every inbound message to `handler` until
/// the connection drops or the handler fails.
pub async fn run_subscriber<H: MessageHandler>(
    settings: &BrokerSettings,
    client_id: &str,
    handler: &mut H,
) -> Result<()> {
    let transport = MqttTransport::new(settings);
    let (client, mut eventloop) = AsyncClient::new(transport.options(client_id), REQUEST_CAPACITY);

    loop {
        let event = eventloop
            .poll()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        match event {
            Event::Incoming(Packet::ConnAck(ack)) => {
                for filter in handler.on_connect(ack.code) {
                    client
                        .subscribe(filter.as_str(), QoS::AtMostOnce)
                        .await
                        .map_err(|e| Error::Connection(e.to_string()))?;
                    info!("{} subscribed to {}", client_id, filter);
                }
            }
            Event::Incoming(Packet::Publish(publish)) => {
                handler.on_message(&publish.topic, &publish.payload)?;
            }
            other => debug!("{} event: {:?}", client_id, other),
        }
    }
}

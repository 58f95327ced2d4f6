//! The `transport` module is responsible for handling communication with
//! the MQTT broker.
//!
//! The publisher and subscriber only see the traits defined here, so the
//! loops can run against a real broker (`mqtt`) or an in-process fake.

pub mod mqtt;

use async_trait::async_trait;

use crate::utils::Result;

pub use rumqttc::ConnectReturnCode;

/// Opens broker sessions on behalf of a named client.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    type Session: Session;

    /// Connects `client_id` and waits until the broker accepts the session.
    async fn connect(&self, client_id: &str) -> Result<Self::Session>;
}

/// An established publishing session.
#[async_trait]
pub trait Session: Send + 'static {
    async fn publish(&mut self, topic: &str, payload: String) -> Result<()>;
}

/// Callbacks driven by a subscriber's receive loop.
///
/// The loop owns the connection and invokes the handler synchronously, one
/// message at a time, in arrival order.
pub trait MessageHandler {
    /// Called whenever the broker acknowledges the connection. Returns the
    /// topic filters to subscribe to.
    fn on_connect(&mut self, code: ConnectReturnCode) -> Vec<String>;

    /// Called for every inbound message. An error ends the receive loop.
    fn on_message(&mut self, topic: &str, payload: &[u8]) -> Result<()>;
}

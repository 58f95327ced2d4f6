use super::{SensorPublisher, run_until, spawn_publishers};
use crate::config::Settings;
use crate::sensor::{Reading, SensorKind, SensorValue};
use crate::transport::{Session, Transport};
use crate::utils::{Error, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Published {
    client_id: String,
    topic: String,
    payload: String,
    at: Instant,
    accepted: bool,
}

/// In-process broker stand-in that records every publish attempt.
#[derive(Debug, Default)]
struct FakeTransport {
    log: Arc<Mutex<Vec<Published>>>,
    refused_clients: HashSet<String>,
    failing_topics: HashSet<String>,
}

impl FakeTransport {
    fn refusing(clients: &[&str]) -> Self {
        Self {
            refused_clients: clients.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    fn failing_on(topics: &[&str]) -> Self {
        Self {
            failing_topics: topics.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    fn published_on(&self, topic: &str) -> Vec<Published> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.topic == topic)
            .cloned()
            .collect()
    }
}

struct FakeSession {
    client_id: String,
    log: Arc<Mutex<Vec<Published>>>,
    failing_topics: HashSet<String>,
}

#[async_trait]
impl Transport for FakeTransport {
    type Session = FakeSession;

    async fn connect(&self, client_id: &str) -> Result<FakeSession> {
        if self.refused_clients.contains(client_id) {
            return Err(Error::Connect {
                client_id: client_id.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(FakeSession {
            client_id: client_id.to_string(),
            log: self.log.clone(),
            failing_topics: self.failing_topics.clone(),
        })
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn publish(&mut self, topic: &str, payload: String) -> Result<()> {
        let accepted = !self.failing_topics.contains(topic);
        self.log.lock().unwrap().push(Published {
            client_id: self.client_id.clone(),
            topic: topic.to_string(),
            payload,
            at: Instant::now(),
            accepted,
        });
        if accepted {
            Ok(())
        } else {
            Err(Error::Publish("broker unavailable".to_string()))
        }
    }
}

#[test]
fn test_publisher_from_settings() {
    let settings = Settings::default().publisher;
    let publishers: Vec<SensorPublisher> = settings
        .sensors
        .iter()
        .map(|s| SensorPublisher::from_settings(&settings, s))
        .collect();

    let ids: Vec<&str> = publishers.iter().map(|p| p.client_id.as_str()).collect();
    assert_eq!(ids, vec!["pub_client_temp", "pub_client_hum", "pub_client_people"]);
    assert_eq!(publishers[1].interval, Duration::from_secs(7));
    assert_eq!(publishers[2].kind, SensorKind::PeopleCounter);
}

#[test]
fn test_next_payload_is_a_reading() {
    let publisher = SensorPublisher::new(
        "pub_client_people",
        "sensors/people_counter",
        Duration::from_secs(10),
        SensorKind::PeopleCounter,
        "12217558",
    )
    .with_generator(|| SensorValue::Count(17));

    let payload = publisher.next_payload().unwrap();
    let reading: Reading = serde_json::from_str(&payload).unwrap();
    assert_eq!(reading.student_id, "12217558");
    assert_eq!(reading.sensor, "people_counter");
    assert_eq!(reading.value, SensorValue::Count(17));
}

#[tokio::test(start_paused = true)]
async fn test_each_loop_publishes_once_per_interval() {
    let transport = Arc::new(FakeTransport::default());
    let settings = Settings::default().publisher;
    let start = Instant::now();

    let handles = spawn_publishers(&settings, transport.clone());
    tokio::time::sleep(Duration::from_millis(30_500)).await;
    for handle in &handles {
        handle.abort();
    }

    for (topic, interval, expected) in [
        ("sensors/temperature", 5, 7),
        ("sensors/humidity", 7, 5),
        ("sensors/people_counter", 10, 4),
    ] {
        let events = transport.published_on(topic);
        assert_eq!(events.len(), expected, "publish count on {topic}");
        for (i, event) in events.iter().enumerate() {
            let expected_at = Duration::from_secs(interval * i as u64);
            let drift = (event.at - start).abs_diff(expected_at);
            assert!(
                drift < Duration::from_millis(10),
                "publish #{i} on {topic} drifted by {drift:?}"
            );
            let reading: Reading = serde_json::from_str(&event.payload).unwrap();
            assert!(topic.ends_with(&reading.sensor));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_connect_failure_is_isolated() {
    let transport = Arc::new(FakeTransport::refusing(&["pub_client_hum"]));
    let settings = Settings::default().publisher;

    let mut handles = spawn_publishers(&settings, transport.clone());
    tokio::time::sleep(Duration::from_millis(10_500)).await;

    let humidity = handles.remove(1).await.expect("task panicked");
    match humidity {
        Err(Error::Connect { client_id, .. }) => assert_eq!(client_id, "pub_client_hum"),
        other => panic!("expected a connect error, got {other:?}"),
    }
    for handle in &handles {
        assert!(!handle.is_finished());
        handle.abort();
    }

    assert!(transport.published_on("sensors/humidity").is_empty());
    assert_eq!(transport.published_on("sensors/temperature").len(), 3);
    assert_eq!(transport.published_on("sensors/people_counter").len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_publish_failures_do_not_stop_the_loop() {
    let transport = Arc::new(FakeTransport::failing_on(&["sensors/temperature"]));
    let publisher = SensorPublisher::new(
        "pub_client_temp",
        "sensors/temperature",
        Duration::from_secs(5),
        SensorKind::Temperature,
        "12217558",
    );

    let handle = tokio::spawn(publisher.run(transport.clone()));
    tokio::time::sleep(Duration::from_millis(15_500)).await;
    assert!(!handle.is_finished());
    handle.abort();

    let events = transport.published_on("sensors/temperature");
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| !e.accepted));
    assert!(events.iter().all(|e| e.client_id == "pub_client_temp"));
}

#[tokio::test(start_paused = true)]
async fn test_run_until_stops_on_shutdown() {
    let transport = Arc::new(FakeTransport::default());
    let settings = Settings::default().publisher;

    run_until(
        &settings,
        transport.clone(),
        tokio::time::sleep(Duration::from_millis(12_500)),
    )
    .await;

    let temperature = transport.published_on("sensors/temperature").len();
    assert_eq!(temperature, 3);
}

#[tokio::test(start_paused = true)]
async fn test_run_until_returns_when_every_loop_failed() {
    let transport = Arc::new(FakeTransport::refusing(&[
        "pub_client_temp",
        "pub_client_hum",
        "pub_client_people",
    ]));
    let settings = Settings::default().publisher;

    tokio::time::timeout(
        Duration::from_secs(60),
        run_until(&settings, transport.clone(), std::future::pending()),
    )
    .await
    .expect("run_until should return once every publisher has stopped");

    assert!(transport.log.lock().unwrap().is_empty());
}

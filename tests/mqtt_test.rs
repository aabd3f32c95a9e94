use anyhow::Result;
use async_trait::async_trait;
use protocol_demos::adapters::mqtt::{MqttSettings, RumqttPublisher, RumqttSubscriber};
use protocol_demos::app::demos::{PublishDemo, SubscribeDemo};
use protocol_demos::config::PublishConfig;
use protocol_demos::core::{InboundMessage, MessagePublisher, MessageSource};
use protocol_demos::{DemoError, DemoRunner, MemoryConsole};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
enum Recorded {
    Publish { topic: String, payload: String, at: Instant },
    Disconnect,
}

#[derive(Clone, Default)]
struct RecordingPublisher {
    calls: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingPublisher {
    fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagePublisher for RecordingPublisher {
    async fn publish(&self, topic: &str, payload: &[u8]) -> protocol_demos::Result<()> {
        self.calls.lock().unwrap().push(Recorded::Publish {
            topic: topic.to_string(),
            payload: String::from_utf8_lossy(payload).into_owned(),
            at: Instant::now(),
        });
        Ok(())
    }

    async fn disconnect(&self) -> protocol_demos::Result<()> {
        self.calls.lock().unwrap().push(Recorded::Disconnect);
        Ok(())
    }
}

struct ScriptedSource {
    messages: VecDeque<InboundMessage>,
}

#[async_trait]
impl MessageSource for ScriptedSource {
    async fn next_message(&mut self) -> protocol_demos::Result<Option<InboundMessage>> {
        Ok(self.messages.pop_front())
    }
}

fn inbound(topic: &str, payload: &[u8]) -> InboundMessage {
    InboundMessage {
        topic: topic.to_string(),
        payload: payload.to_vec(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_publisher_sends_five_readings_one_second_apart() -> Result<()> {
    let publisher = RecordingPublisher::default();
    let demo = PublishDemo::new(publisher.clone(), "iweather/temperature", PublishConfig::default());
    let mut runner = DemoRunner::new(demo, MemoryConsole::new());

    let start = Instant::now();
    runner.run().await?;
    assert!(start.elapsed() >= Duration::from_secs(5));

    let calls = publisher.calls();
    assert_eq!(calls.len(), 6);
    assert_eq!(calls.last(), Some(&Recorded::Disconnect));

    let mut previous: Option<Instant> = None;
    for (i, call) in calls[..5].iter().enumerate() {
        match call {
            Recorded::Publish { topic, payload, at } => {
                assert_eq!(topic, "iweather/temperature");
                assert_eq!(payload, &format!("Temperature {}", 30 + i));
                if let Some(previous) = previous {
                    assert!(*at - previous >= Duration::from_secs(1));
                }
                previous = Some(*at);
            }
            Recorded::Disconnect => panic!("disconnect before all readings were published"),
        }
    }

    assert_eq!(
        runner.console().lines(),
        (30..35)
            .map(|t| format!("Published: Temperature {}", t))
            .collect::<Vec<_>>()
    );
    Ok(())
}

#[tokio::test]
async fn test_subscriber_prints_messages_in_arrival_order() -> Result<()> {
    let source = ScriptedSource {
        messages: VecDeque::from(vec![
            inbound("iweather/temperature", b"Temperature 30"),
            inbound("iweather/temperature", b"Temperature 31"),
            inbound("iweather/temperature", &[0x54, 0xff, 0x31]),
        ]),
    };
    let demo = SubscribeDemo::new(source, "iweather/temperature", None);
    let mut runner = DemoRunner::new(demo, MemoryConsole::new());

    tokio_test::assert_ok!(runner.run().await);

    assert_eq!(
        runner.console().lines(),
        vec![
            "Subscribed to topic: iweather/temperature",
            "Received message: Temperature 30 on topic iweather/temperature",
            "Received message: Temperature 31 on topic iweather/temperature",
            "Received message: T\u{fffd}1 on topic iweather/temperature",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_subscriber_stops_at_max_messages() -> Result<()> {
    let source = ScriptedSource {
        messages: (0..10)
            .map(|i| inbound("iweather/temperature", format!("Temperature {}", i).as_bytes()))
            .collect(),
    };
    let mut runner = DemoRunner::new(
        SubscribeDemo::new(source, "iweather/temperature", Some(2)),
        MemoryConsole::new(),
    );

    runner.run().await?;

    assert_eq!(runner.console().lines().len(), 3);
    Ok(())
}

// Minimal MQTT 3.1.1 broker side, just enough for one client session.

async fn read_packet(stream: &mut TcpStream) -> std::io::Result<Option<(u8, Vec<u8>)>> {
    let mut header = [0u8; 1];
    if stream.read(&mut header).await? == 0 {
        return Ok(None);
    }

    let mut remaining = 0usize;
    let mut shift = 0;
    loop {
        let byte = stream.read_u8().await?;
        remaining |= ((byte & 0x7f) as usize) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
    }

    let mut body = vec![0u8; remaining];
    stream.read_exact(&mut body).await?;
    Ok(Some((header[0], body)))
}

async fn accept_session(listener: &TcpListener) -> std::io::Result<TcpStream> {
    let (mut stream, _) = listener.accept().await?;
    match read_packet(&mut stream).await? {
        Some((0x10, _)) => {}
        other => panic!("expected CONNECT, got {:?}", other),
    }
    stream.write_all(&[0x20, 0x02, 0x00, 0x00]).await?;
    Ok(stream)
}

fn publish_packet(topic: &str, payload: &[u8]) -> Vec<u8> {
    let remaining = 2 + topic.len() + payload.len();
    assert!(remaining < 128);
    let mut packet = vec![0x30, remaining as u8, 0x00, topic.len() as u8];
    packet.extend_from_slice(topic.as_bytes());
    packet.extend_from_slice(payload);
    packet
}

fn local_settings(port: u16) -> MqttSettings {
    MqttSettings {
        host: "127.0.0.1".to_string(),
        port,
        client_id: "protocol-demos-test".to_string(),
        keep_alive: Duration::from_secs(10),
    }
}

#[tokio::test]
async fn test_rumqtt_publisher_sends_qos0_publish_and_disconnect() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    let broker = tokio::spawn(async move {
        let mut stream = accept_session(&listener).await.expect("session");
        let mut received = Vec::new();
        while let Some((header, body)) = read_packet(&mut stream).await.expect("packet") {
            match header {
                0x30 => {
                    let topic_len = u16::from_be_bytes([body[0], body[1]]) as usize;
                    let topic = String::from_utf8_lossy(&body[2..2 + topic_len]).into_owned();
                    let payload = String::from_utf8_lossy(&body[2 + topic_len..]).into_owned();
                    received.push(format!("{} {}", topic, payload));
                }
                0xe0 => break,
                _ => {}
            }
        }
        received
    });

    let publisher = RumqttPublisher::connect(&local_settings(port)).await?;
    publisher.publish("iweather/temperature", b"Temperature 30").await?;
    publisher.publish("iweather/temperature", b"Temperature 31").await?;
    publisher.disconnect().await?;

    let received = tokio::time::timeout(Duration::from_secs(5), broker).await??;
    assert_eq!(
        received,
        vec![
            "iweather/temperature Temperature 30",
            "iweather/temperature Temperature 31"
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_rumqtt_subscriber_yields_published_messages() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    tokio::spawn(async move {
        let mut stream = accept_session(&listener).await.expect("session");
        let (header, body) = read_packet(&mut stream)
            .await
            .expect("packet")
            .expect("subscribe");
        assert_eq!(header, 0x82);
        stream
            .write_all(&[0x90, 0x03, body[0], body[1], 0x00])
            .await
            .expect("suback");
        stream
            .write_all(&publish_packet("iweather/temperature", b"Temperature 42"))
            .await
            .expect("publish");
        while let Ok(Some(_)) = read_packet(&mut stream).await {}
    });

    let mut subscriber = RumqttSubscriber::subscribe(&local_settings(port), "iweather/temperature").await?;
    let message = tokio::time::timeout(Duration::from_secs(5), subscriber.next_message())
        .await??
        .expect("message");

    assert_eq!(message.topic, "iweather/temperature");
    assert_eq!(message.payload_text(), "Temperature 42");
    Ok(())
}

#[tokio::test]
async fn test_rumqtt_subscriber_reports_rejected_subscription() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    tokio::spawn(async move {
        let mut stream = accept_session(&listener).await.expect("session");
        let (_, body) = read_packet(&mut stream)
            .await
            .expect("packet")
            .expect("subscribe");
        stream
            .write_all(&[0x90, 0x03, body[0], body[1], 0x80])
            .await
            .expect("suback");
        while let Ok(Some(_)) = read_packet(&mut stream).await {}
    });

    let mut subscriber = RumqttSubscriber::subscribe(&local_settings(port), "iweather/temperature").await?;
    let err = tokio::time::timeout(Duration::from_secs(5), subscriber.next_message())
        .await?
        .unwrap_err();

    assert!(matches!(err, DemoError::ProtocolError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_connect_fails_without_broker() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);

    let err = RumqttPublisher::connect(&local_settings(port)).await.err().expect("error");

    assert!(matches!(err, DemoError::MqttConnectionError(_)));
    Ok(())
}

use crate::config::MqttConfig;
use crate::core::{InboundMessage, MessagePublisher, MessageSource};
use crate::utils::error::{DemoError, Result};
use async_trait::async_trait;
use rumqttc::{
    AsyncClient, ConnectReturnCode, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS,
    SubscribeReasonCode,
};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

const REQUEST_CHANNEL_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
pub struct MqttSettings {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub keep_alive: Duration,
}

impl MqttSettings {
    pub fn from_config(config: &MqttConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            client_id: config
                .client_id
                .clone()
                .unwrap_or_else(generated_client_id),
            keep_alive: config.keep_alive(),
        }
    }
}

fn generated_client_id() -> String {
    format!("protocol-demos-{}", chrono::Utc::now().timestamp_millis())
}

/// Opens the session and waits for the broker's CONNACK.
async fn connect(settings: &MqttSettings) -> Result<(AsyncClient, EventLoop)> {
    let mut options = MqttOptions::new(&settings.client_id, &settings.host, settings.port);
    options.set_keep_alive(settings.keep_alive);

    tracing::debug!(
        "Connecting to MQTT broker {}:{} as {}",
        settings.host,
        settings.port,
        settings.client_id
    );
    let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CHANNEL_CAPACITY);

    loop {
        match eventloop.poll().await? {
            Event::Incoming(Packet::ConnAck(ack)) => {
                if ack.code != ConnectReturnCode::Success {
                    return Err(DemoError::ProtocolError {
                        message: format!("broker refused connection: {:?}", ack.code),
                    });
                }
                tracing::info!("🔌 Connected to MQTT broker {}:{}", settings.host, settings.port);
                return Ok((client, eventloop));
            }
            event => tracing::trace!("MQTT event before CONNACK: {:?}", event),
        }
    }
}

/// QoS 0 publisher; a background task drives the event loop until disconnect.
pub struct RumqttPublisher {
    client: AsyncClient,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl RumqttPublisher {
    pub async fn connect(settings: &MqttSettings) -> Result<Self> {
        let (client, eventloop) = connect(settings).await?;
        let driver = tokio::spawn(drive_until_disconnect(eventloop));
        Ok(Self {
            client,
            driver: Mutex::new(Some(driver)),
        })
    }
}

async fn drive_until_disconnect(mut eventloop: EventLoop) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                tracing::debug!("MQTT disconnect sent");
                break;
            }
            Ok(event) => tracing::trace!("MQTT event: {:?}", event),
            Err(e) => {
                tracing::warn!("MQTT event loop stopped: {}", e);
                break;
            }
        }
    }
}

#[async_trait]
impl MessagePublisher for RumqttPublisher {
    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<()> {
        self.client
            .publish(topic, QoS::AtMostOnce, false, payload.to_vec())
            .await?;
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.client.disconnect().await?;
        if let Some(driver) = self.driver.lock().await.take() {
            if let Err(e) = driver.await {
                tracing::warn!("MQTT driver task ended abnormally: {}", e);
            }
        }
        Ok(())
    }
}

/// Subscription whose event loop is polled inline by `next_message`.
pub struct RumqttSubscriber {
    // dropping the client closes the event loop's request channel
    _client: AsyncClient,
    eventloop: EventLoop,
}

impl RumqttSubscriber {
    pub async fn subscribe(settings: &MqttSettings, topic: &str) -> Result<Self> {
        let (client, eventloop) = connect(settings).await?;
        client.subscribe(topic, QoS::AtMostOnce).await?;
        tracing::debug!("SUBSCRIBE queued for {}", topic);
        Ok(Self {
            _client: client,
            eventloop,
        })
    }
}

#[async_trait]
impl MessageSource for RumqttSubscriber {
    async fn next_message(&mut self) -> Result<Option<InboundMessage>> {
        loop {
            match self.eventloop.poll().await? {
                Event::Incoming(Packet::Publish(publish)) => {
                    return Ok(Some(InboundMessage {
                        topic: publish.topic.clone(),
                        payload: publish.payload.to_vec(),
                    }));
                }
                Event::Incoming(Packet::SubAck(ack)) => {
                    if ack
                        .return_codes
                        .iter()
                        .any(|code| matches!(code, SubscribeReasonCode::Failure))
                    {
                        return Err(DemoError::ProtocolError {
                            message: "broker rejected the subscription".to_string(),
                        });
                    }
                    tracing::debug!("Subscription acknowledged: {:?}", ack.return_codes);
                }
                event => tracing::trace!("MQTT event: {:?}", event),
            }
        }
    }
}

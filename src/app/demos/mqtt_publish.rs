use crate::config::PublishConfig;
use crate::core::{Console, Demo, MessagePublisher};
use crate::utils::error::{DemoError, Result};
use std::time::Duration;

/// Publishes `count` readings in ascending order, pausing after each one, then disconnects.
pub struct PublishDemo<P: MessagePublisher> {
    publisher: P,
    topic: String,
    settings: PublishConfig,
}

impl<P: MessagePublisher> PublishDemo<P> {
    pub fn new(publisher: P, topic: impl Into<String>, settings: PublishConfig) -> Self {
        Self {
            publisher,
            topic: topic.into(),
            settings,
        }
    }

    fn messages(&self) -> Result<Vec<String>> {
        (0..self.settings.count)
            .map(|offset| {
                let reading = i64::try_from(offset)
                    .ok()
                    .and_then(|offset| self.settings.first_reading.checked_add(offset))
                    .ok_or_else(|| DemoError::InvalidConfigValueError {
                        field: "mqtt.publish.first_reading".to_string(),
                        value: self.settings.first_reading.to_string(),
                        reason: format!("{} readings from here overflow", self.settings.count),
                    })?;
                Ok(format!("{} {}", self.settings.message_prefix, reading))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl<P: MessagePublisher> Demo for PublishDemo<P> {
    fn name(&self) -> &str {
        "MQTT publish"
    }

    async fn run(&mut self, console: &dyn Console) -> Result<()> {
        let interval = Duration::from_millis(self.settings.interval_ms);
        let messages = self.messages()?;

        for message in messages {
            self.publisher.publish(&self.topic, message.as_bytes()).await?;
            console.print_line(&format!("Published: {}", message));
            tokio::time::sleep(interval).await;
        }

        self.publisher.disconnect().await?;
        tracing::info!("Disconnected from broker after {} messages", self.settings.count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopPublisher;

    #[async_trait::async_trait]
    impl MessagePublisher for NoopPublisher {
        async fn publish(&self, _topic: &str, _payload: &[u8]) -> Result<()> {
            Ok(())
        }

        async fn disconnect(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_messages_ascend_from_first_reading() {
        let demo = PublishDemo::new(NoopPublisher, "iweather/temperature", PublishConfig::default());
        let messages = demo.messages().unwrap();
        assert_eq!(
            messages,
            vec![
                "Temperature 30",
                "Temperature 31",
                "Temperature 32",
                "Temperature 33",
                "Temperature 34"
            ]
        );
    }

    #[tokio::test]
    async fn test_overflowing_readings_fail_before_publishing() {
        let settings = PublishConfig {
            first_reading: i64::MAX,
            count: 2,
            ..PublishConfig::default()
        };
        let mut demo = PublishDemo::new(NoopPublisher, "iweather/temperature", settings);
        let console = crate::adapters::console::MemoryConsole::new();

        let err = demo.run(&console).await.unwrap_err();

        assert!(matches!(err, DemoError::InvalidConfigValueError { .. }));
        assert!(console.lines().is_empty());
    }

    #[test]
    fn test_single_reading_at_max_is_fine() {
        let settings = PublishConfig {
            first_reading: i64::MAX,
            count: 1,
            ..PublishConfig::default()
        };
        let demo = PublishDemo::new(NoopPublisher, "iweather/temperature", settings);
        assert_eq!(
            demo.messages().unwrap(),
            vec![format!("Temperature {}", i64::MAX)]
        );
    }
}

use crate::core::{Console, Demo, MessageSource};
use crate::utils::error::Result;

/// Prints every message delivered on the subscription. Unbounded unless `max_messages` is set.
pub struct SubscribeDemo<S: MessageSource> {
    source: S,
    topic: String,
    max_messages: Option<usize>,
}

impl<S: MessageSource> SubscribeDemo<S> {
    pub fn new(source: S, topic: impl Into<String>, max_messages: Option<usize>) -> Self {
        Self {
            source,
            topic: topic.into(),
            max_messages,
        }
    }
}

#[async_trait::async_trait]
impl<S: MessageSource> Demo for SubscribeDemo<S> {
    fn name(&self) -> &str {
        "MQTT subscribe"
    }

    async fn run(&mut self, console: &dyn Console) -> Result<()> {
        console.print_line(&format!("Subscribed to topic: {}", self.topic));

        let mut received = 0usize;
        while self.max_messages.map_or(true, |max| received < max) {
            match self.source.next_message().await? {
                Some(message) => {
                    console.print_line(&format!(
                        "Received message: {} on topic {}",
                        message.payload_text(),
                        message.topic
                    ));
                    received += 1;
                }
                None => {
                    tracing::info!("Message source closed after {} messages", received);
                    break;
                }
            }
        }
        Ok(())
    }
}

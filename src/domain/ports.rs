use crate::domain::model::InboundMessage;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Line-oriented output that demos print their results through.
pub trait Console: Send + Sync {
    fn print_line(&self, line: &str);
}

/// One runnable protocol example.
#[async_trait]
pub trait Demo: Send {
    fn name(&self) -> &str;
    async fn run(&mut self, console: &dyn Console) -> Result<()>;
}

#[async_trait]
pub trait MessagePublisher: Send + Sync {
    async fn publish(&self, topic: &str, payload: &[u8]) -> Result<()>;
    async fn disconnect(&self) -> Result<()>;
}

#[async_trait]
pub trait MessageSource: Send {
    /// `None` once the source is exhausted; a live broker connection never ends on its own.
    async fn next_message(&mut self) -> Result<Option<InboundMessage>>;
}

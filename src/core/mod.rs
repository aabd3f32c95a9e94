pub mod envelope;
pub mod runner;
pub mod wsdl;

pub use crate::domain::model::{GraphqlOutcome, GraphqlRequest, InboundMessage, NewPost, ResponseSummary};
pub use crate::domain::ports::{Console, Demo, MessagePublisher, MessageSource};
pub use crate::utils::error::Result;
pub use runner::{DemoRunner, RunSummary};

#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use toml_config::{
    DemoConfig, GraphqlConfig, MqttConfig, PublishConfig, RestConfig, SoapConfig,
    WebSocketConfig, DEFAULT_GRAPHQL_QUERY,
};

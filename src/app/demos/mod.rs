pub mod graphql;
pub mod mqtt_publish;
pub mod mqtt_subscribe;
pub mod rest;
pub mod soap;
pub mod websocket;

pub use graphql::{GraphqlClient, GraphqlDemo};
pub use mqtt_publish::PublishDemo;
pub use mqtt_subscribe::SubscribeDemo;
pub use rest::{RestClient, RestDemo};
pub use soap::{SoapClient, SoapDemo};
pub use websocket::WebSocketDemo;

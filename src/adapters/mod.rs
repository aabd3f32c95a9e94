// Adapters layer: concrete implementations of the domain ports (console, http, mqtt).

pub mod console;
pub mod http;
pub mod mqtt;

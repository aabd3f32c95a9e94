pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::console::{MemoryConsole, StdoutConsole};
pub use config::DemoConfig;
pub use core::{DemoRunner, RunSummary};
pub use utils::error::{DemoError, Result};

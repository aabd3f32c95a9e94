use crate::config::DemoConfig;
use crate::core::RunSummary;
use crate::utils::error::{DemoError, Result};
use crate::utils::logger;
use clap::Args;
use std::path::PathBuf;

/// Arguments shared by every demo binary.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Path to a TOML configuration file; built-in defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl CommonArgs {
    pub fn init_logging(&self) {
        if self.json_logs {
            logger::init_json_logger(self.verbose);
        } else {
            logger::init_cli_logger(self.verbose);
        }
    }

    pub fn load_config(&self) -> Result<DemoConfig> {
        match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                DemoConfig::from_file(path)
            }
            None => {
                tracing::debug!("No configuration file given, using defaults");
                Ok(DemoConfig::default())
            }
        }
    }
}

/// Logs the failure, prints it for the user and terminates with a severity-derived exit code.
pub fn exit_with_error(e: &DemoError) -> ! {
    tracing::error!(
        "❌ Demo failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code())
}

/// Common tail of every binary's `main`.
pub fn finish(result: Result<RunSummary>) {
    match result {
        Ok(summary) => {
            tracing::debug!("{} demo took {:?}", summary.demo, summary.elapsed);
        }
        Err(e) => exit_with_error(&e),
    }
}

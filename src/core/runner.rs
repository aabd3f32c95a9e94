use crate::core::{Console, Demo};
use crate::utils::error::Result;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub demo: String,
    pub elapsed: Duration,
}

pub struct DemoRunner<D: Demo, C: Console> {
    demo: D,
    console: C,
}

impl<D: Demo, C: Console> DemoRunner<D, C> {
    pub fn new(demo: D, console: C) -> Self {
        Self { demo, console }
    }

    pub async fn run(&mut self) -> Result<RunSummary> {
        let name = self.demo.name().to_string();
        tracing::info!("🚀 Starting {} demo", name);
        let start = Instant::now();

        match self.demo.run(&self.console).await {
            Ok(()) => {
                let elapsed = start.elapsed();
                tracing::info!("✅ {} demo finished in {:?}", name, elapsed);
                Ok(RunSummary {
                    demo: name,
                    elapsed,
                })
            }
            Err(e) => {
                tracing::warn!("{} demo stopped after {:?}: {}", name, start.elapsed(), e);
                Err(e)
            }
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }
}

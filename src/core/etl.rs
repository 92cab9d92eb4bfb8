use crate::core::{Pipeline, Stage};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::path::PathBuf;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
    stage: Stage,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
            stage: Stage::NotStarted,
        }
    }

    /// Last stage reached. Stays at the failing step's predecessor on error.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn run(&mut self) -> Result<PathBuf> {
        let started = Instant::now();
        tracing::debug!("Conversion started");

        let result = self.run_stages();

        match &result {
            Ok(_) => self.advance(Stage::Done),
            Err(e) => tracing::debug!("Conversion stopped after stage '{}': {}", self.stage, e),
        }

        self.monitor.log_final_stats();
        tracing::debug!(
            "Conversion finished. Execution time: {:.3}s",
            started.elapsed().as_secs_f64()
        );
        result
    }

    fn run_stages(&mut self) -> Result<PathBuf> {
        self.pipeline.validate_input()?;
        self.advance(Stage::InputValidated);

        let document = self.pipeline.read()?;
        self.advance(Stage::Loaded);

        let records = self.pipeline.extract(&document)?;
        drop(document);
        tracing::info!("Extracted {} records", records.len());
        let mapping = self.pipeline.transform(records)?;
        self.advance(Stage::Extracted);

        let output_path = self.pipeline.load(mapping)?;
        self.advance(Stage::Serialized);
        tracing::info!("Output saved to: {}", output_path.display());

        Ok(output_path)
    }

    fn advance(&mut self, stage: Stage) {
        tracing::debug!("Stage: {} -> {}", self.stage, stage);
        self.stage = stage;
        self.monitor.log_stats(stage);
    }
}

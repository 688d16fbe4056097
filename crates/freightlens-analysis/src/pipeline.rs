//! Feature engineering followed by the hypothesis run, configured in one place.

use freightlens_core::config::FreightlensConfig;
use freightlens_core::errors::PipelineError;
use freightlens_core::types::JoinedDataset;
use serde::Serialize;

use crate::features::{FeatureBuilder, FeatureDiagnostics};
use crate::runner::{HypothesisRunner, RunReport};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub diagnostics: FeatureDiagnostics,
    pub report: RunReport,
}

#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    builder: FeatureBuilder,
    runner: HypothesisRunner,
}

impl AnalysisPipeline {
    pub fn new(config: &FreightlensConfig) -> Self {
        Self {
            builder: FeatureBuilder::from_config(&config.analysis),
            runner: HypothesisRunner::from_config(config),
        }
    }

    pub fn runner(&self) -> &HypothesisRunner {
        &self.runner
    }

    pub fn run(&self, dataset: &JoinedDataset) -> Result<PipelineOutput, PipelineError> {
        let features = self.builder.build(dataset);
        let report = self.runner.run(&features)?;
        Ok(PipelineOutput {
            diagnostics: features.diagnostics().clone(),
            report,
        })
    }
}

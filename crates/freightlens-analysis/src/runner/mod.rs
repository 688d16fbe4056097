//! Runs the four hypotheses against every configured hub.
//!
//! Hubs are independent: each reads the shared [`FeatureSet`] and produces
//! its own findings. Output order is always hub order as configured, then
//! `distance`, `hub`, `weekend`, `high_order` within a hub, whether or not
//! the hubs were processed in parallel.

use std::time::Instant;

use freightlens_core::config::FreightlensConfig;
use freightlens_core::errors::PipelineError;
use freightlens_core::types::{Effect, Finding};
use rayon::prelude::*;
use serde::Serialize;

use crate::estimation::{EffectEstimator, EstimandSpec, IdentificationStatus};
use crate::features::FeatureSet;
use crate::findings::FindingClassifier;
use crate::treatment::TreatmentEncoder;

/// One estimate as recorded in a hub summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateSummary {
    pub effect: Effect,
    pub value: f64,
    pub std_error: Option<f64>,
    pub p_value: Option<f64>,
    pub status: IdentificationStatus,
}

/// What happened for one hub.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HubSummary {
    pub hub: String,
    pub records: usize,
    pub high_order_threshold: f64,
    /// True when the hub had no records and nothing was estimated.
    pub skipped: bool,
    pub estimates: Vec<EstimateSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    /// Ordered findings across all hubs.
    pub findings: Vec<Finding>,
    /// One entry per configured hub, in the same order.
    pub hubs: Vec<HubSummary>,
}

#[derive(Debug, Clone)]
pub struct HypothesisRunner {
    hubs: Vec<String>,
    encoder: TreatmentEncoder,
    estimator: EffectEstimator,
    classifier: FindingClassifier,
    parallel: bool,
    threads: Option<usize>,
}

impl HypothesisRunner {
    pub fn new(
        hubs: Vec<String>,
        encoder: TreatmentEncoder,
        estimator: EffectEstimator,
        classifier: FindingClassifier,
    ) -> Self {
        Self {
            hubs,
            encoder,
            estimator,
            classifier,
            parallel: true,
            threads: None,
        }
    }

    pub fn from_config(config: &FreightlensConfig) -> Self {
        Self::new(
            config.hypotheses.effective_hubs(),
            TreatmentEncoder::from_config(&config.hypotheses),
            EffectEstimator::from_config(&config.analysis),
            FindingClassifier::from_config(&config.analysis),
        )
        .with_parallelism(config.runtime.effective_parallel(), config.runtime.threads)
    }

    /// Toggle parallel hub processing. `threads` sizes a dedicated pool;
    /// `None` uses rayon's global pool.
    pub fn with_parallelism(mut self, parallel: bool, threads: Option<usize>) -> Self {
        self.parallel = parallel;
        self.threads = threads;
        self
    }

    pub fn hubs(&self) -> &[String] {
        &self.hubs
    }

    pub fn run(&self, features: &FeatureSet) -> Result<RunReport, PipelineError> {
        let start = Instant::now();
        let outcomes = if self.parallel {
            match self.threads {
                Some(threads) => {
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(threads)
                        .build()
                        .map_err(|e| PipelineError::Runtime(e.to_string()))?;
                    pool.install(|| self.run_parallel(features))?
                }
                None => self.run_parallel(features)?,
            }
        } else {
            self.hubs
                .iter()
                .map(|hub| self.analyze_hub(hub, features))
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut report = RunReport::default();
        for (summary, findings) in outcomes {
            report.findings.extend(findings);
            report.hubs.push(summary);
        }

        tracing::info!(
            hubs = report.hubs.len(),
            findings = report.findings.len(),
            parallel = self.parallel,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "hypotheses evaluated"
        );
        Ok(report)
    }

    fn run_parallel(
        &self,
        features: &FeatureSet,
    ) -> Result<Vec<(HubSummary, Vec<Finding>)>, PipelineError> {
        self.hubs
            .par_iter()
            .map(|hub| self.analyze_hub(hub, features))
            .collect()
    }

    fn analyze_hub(
        &self,
        hub: &str,
        features: &FeatureSet,
    ) -> Result<(HubSummary, Vec<Finding>), PipelineError> {
        let records = features.hub_subset(hub);
        let mut summary = HubSummary {
            hub: hub.to_string(),
            records: records.len(),
            high_order_threshold: features.high_order_threshold(),
            skipped: records.is_empty(),
            estimates: Vec::with_capacity(Effect::ALL.len()),
        };
        if records.is_empty() {
            tracing::warn!(hub, "no delivery records for hub, skipping");
            return Ok((summary, Vec::new()));
        }

        let frame = self
            .encoder
            .encode(hub, &records, features.high_order_threshold());

        let mut findings = Vec::new();
        for effect in Effect::ALL {
            let estimate = self
                .estimator
                .estimate(&frame, &EstimandSpec::for_effect(effect))
                .map_err(|source| PipelineError::Estimation {
                    hub: hub.to_string(),
                    effect: effect.to_string(),
                    source,
                })?;
            tracing::debug!(
                hub,
                effect = %effect,
                value = estimate.value,
                n_obs = estimate.n_obs,
                "effect estimated"
            );
            findings.extend(self.classifier.classify(hub, effect, estimate.value));
            summary.estimates.push(EstimateSummary {
                effect,
                value: estimate.value,
                std_error: estimate.std_error,
                p_value: estimate.p_value,
                status: estimate.estimand.status,
            });
        }
        Ok((summary, findings))
    }
}

//! # freightlens-analysis
//!
//! Per-hub causal analysis of delivery delay. Builds features from joined
//! order records, encodes treatment indicators per hub, estimates
//! distance-adjusted treatment effects by backdoor linear regression, and
//! classifies the estimates into findings.

pub mod estimation;
pub mod features;
pub mod findings;
pub mod geo;
pub mod pipeline;
pub mod runner;
pub mod treatment;

pub use estimation::{EffectEstimate, EffectEstimator, EstimandSpec};
pub use features::{FeatureBuilder, FeatureDiagnostics, FeatureSet};
pub use findings::FindingClassifier;
pub use geo::GeoDistance;
pub use pipeline::{AnalysisPipeline, PipelineOutput};
pub use runner::{EstimateSummary, HubSummary, HypothesisRunner, RunReport};
pub use treatment::{TreatmentEncoder, TreatmentFrame};

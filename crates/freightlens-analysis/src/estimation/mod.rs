//! Effect estimation: assumed causal graph, backdoor identification, and
//! linear regression on the adjustment set.

pub mod dataset;
pub mod estimator;
pub mod graph;
pub mod identification;
pub mod regression;

pub use dataset::{ColumnRef, ColumnTable, Dataset};
pub use estimator::{EffectEstimate, EffectEstimator, EstimandSpec};
pub use graph::{CausalGraph, CausalVariable};
pub use identification::{identify_backdoor, IdentificationStatus, IdentifiedEstimand};
pub use regression::{fit_ols, OlsFit};

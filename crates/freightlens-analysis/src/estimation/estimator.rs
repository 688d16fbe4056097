//! Backdoor-adjusted linear effect estimation.

use freightlens_core::config::AnalysisConfig;
use freightlens_core::constants::{DISTANCE_COLUMN, OUTCOME_COLUMN};
use freightlens_core::errors::EstimationError;
use freightlens_core::types::Effect;
use serde::Serialize;

use super::dataset::Dataset;
use super::graph::CausalGraph;
use super::identification::{identify_backdoor, IdentifiedEstimand};
use super::regression::fit_ols;

/// Which effect to estimate and what to adjust for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimandSpec {
    pub treatment: String,
    pub outcome: String,
    pub common_causes: Vec<String>,
}

impl EstimandSpec {
    pub fn new(
        treatment: impl Into<String>,
        outcome: impl Into<String>,
        common_causes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            treatment: treatment.into(),
            outcome: outcome.into(),
            common_causes: common_causes.into_iter().map(Into::into).collect(),
        }
    }

    /// `delivery_delay ~ <treatment> + distance_km` for one of the four effects.
    pub fn for_effect(effect: Effect) -> Self {
        Self::new(effect.treatment_column(), OUTCOME_COLUMN, [DISTANCE_COLUMN])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectEstimate {
    /// Regression coefficient of the treatment.
    pub value: f64,
    pub std_error: Option<f64>,
    pub p_value: Option<f64>,
    pub n_obs: usize,
    pub estimand: IdentifiedEstimand,
}

/// Identifies an effect on an assumed graph and estimates it by OLS on the
/// treatment plus the adjustment set.
#[derive(Debug, Clone, Copy)]
pub struct EffectEstimator {
    proceed_when_unidentifiable: bool,
    assume_unobserved_confounders: bool,
}

impl EffectEstimator {
    pub fn new(proceed_when_unidentifiable: bool, assume_unobserved_confounders: bool) -> Self {
        Self {
            proceed_when_unidentifiable,
            assume_unobserved_confounders,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            config.effective_proceed_when_unidentifiable(),
            config.effective_assume_unobserved_confounders(),
        )
    }

    /// Build the assumed graph for `spec` and run the backdoor check.
    pub fn identify(&self, spec: &EstimandSpec) -> Result<IdentifiedEstimand, EstimationError> {
        let graph = CausalGraph::from_common_causes(
            &spec.treatment,
            &spec.outcome,
            &spec.common_causes,
            self.assume_unobserved_confounders,
        )?;
        Ok(identify_backdoor(
            &graph,
            &spec.treatment,
            &spec.outcome,
            &spec.common_causes,
        )?)
    }

    pub fn estimate<D: Dataset + ?Sized>(
        &self,
        data: &D,
        spec: &EstimandSpec,
    ) -> Result<EffectEstimate, EstimationError> {
        let rows = data.n_rows();
        if rows == 0 {
            return Err(EstimationError::EmptyDataset);
        }

        let estimand = self.identify(spec)?;
        if !estimand.is_identified() {
            if !self.proceed_when_unidentifiable {
                return Err(EstimationError::Unidentifiable {
                    treatment: spec.treatment.clone(),
                    outcome: spec.outcome.clone(),
                });
            }
            tracing::debug!(
                treatment = %spec.treatment,
                outcome = %spec.outcome,
                reason = estimand.reason.as_deref().unwrap_or_default(),
                "estimating unidentified effect"
            );
        }

        let y = read_column(data, &spec.outcome, rows)?;
        let mut regressors = Vec::with_capacity(1 + spec.common_causes.len());
        regressors.push(read_column(data, &spec.treatment, rows)?);
        for cause in &spec.common_causes {
            regressors.push(read_column(data, cause, rows)?);
        }

        let fit = fit_ols(&y, &regressors);
        Ok(EffectEstimate {
            value: fit.coefficients[0],
            std_error: fit.std_errors[0],
            p_value: fit.p_values[0],
            n_obs: fit.n_obs,
            estimand,
        })
    }
}

impl Default for EffectEstimator {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

fn read_column<D: Dataset + ?Sized>(
    data: &D,
    name: &str,
    rows: usize,
) -> Result<Vec<f64>, EstimationError> {
    let column = data
        .column(name)
        .ok_or_else(|| EstimationError::MissingColumn {
            name: name.to_string(),
        })?;
    if column.len() != rows {
        return Err(EstimationError::LengthMismatch {
            name: name.to_string(),
            expected: rows,
            actual: column.len(),
        });
    }
    let values = column.to_f64_vec();
    if let Some(row) = values.iter().position(|v| !v.is_finite()) {
        return Err(EstimationError::NonFiniteValue {
            name: name.to_string(),
            row,
        });
    }
    Ok(values)
}

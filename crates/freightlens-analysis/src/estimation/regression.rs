//! Ordinary least squares with an intercept.
//!
//! Columns are centered (absorbing the intercept) and scaled to unit norm
//! before solving the normal equations through an SVD pseudo-inverse, so
//! collinear or constant regressors get a minimum-norm solution instead of
//! an error. A regressor with no variation gets a coefficient of exactly 0.

use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Singular values below `RCOND * max` are treated as zero.
const RCOND: f64 = 1e-10;

/// Relative spread below which a regressor is treated as constant.
const CONSTANT_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    /// One slope per regressor, in input order. The intercept is not reported.
    pub coefficients: Vec<f64>,
    /// `None` for constant regressors or when there are no residual degrees
    /// of freedom.
    pub std_errors: Vec<Option<f64>>,
    /// Two-sided p-values from the Student t distribution.
    pub p_values: Vec<Option<f64>>,
    /// Rank of the design matrix including the intercept.
    pub rank: usize,
    pub residual_dof: usize,
    pub n_obs: usize,
}

/// Fit `y ~ 1 + regressors[0] + regressors[1] + ...`.
///
/// Every regressor must have the same length as `y`.
pub fn fit_ols(y: &[f64], regressors: &[Vec<f64>]) -> OlsFit {
    let n = y.len();
    let k = regressors.len();
    if n == 0 {
        return OlsFit {
            coefficients: vec![0.0; k],
            std_errors: vec![None; k],
            p_values: vec![None; k],
            rank: 0,
            residual_dof: 0,
            n_obs: 0,
        };
    }

    let y_mean = mean(y);
    let y_centered: Vec<f64> = y.iter().map(|v| v - y_mean).collect();

    // (original column index, scale, centered-and-scaled values)
    let mut active: Vec<(usize, f64, Vec<f64>)> = Vec::with_capacity(k);
    for (j, column) in regressors.iter().enumerate() {
        let m = mean(column);
        let centered: Vec<f64> = column.iter().map(|v| v - m).collect();
        let scale = norm(&centered);
        let raw = norm(column);
        if scale <= CONSTANT_TOLERANCE * raw || scale == 0.0 {
            continue;
        }
        active.push((j, scale, centered.into_iter().map(|v| v / scale).collect()));
    }

    let p = active.len();
    let design = DMatrix::from_fn(n, p, |i, a| active[a].2[i]);
    let response = DVector::from_vec(y_centered);
    let (gram_inv, kept) = gram_pseudo_inverse(design.transpose() * &design);

    let beta_scaled = &gram_inv * (design.transpose() * &response);
    let residuals = &response - &design * &beta_scaled;
    let rss = residuals.norm_squared();

    let rank = kept + 1;
    let residual_dof = n.saturating_sub(rank);
    let sigma2 = (residual_dof > 0).then(|| rss / residual_dof as f64);
    let t_dist = if residual_dof > 0 {
        StudentsT::new(0.0, 1.0, residual_dof as f64).ok()
    } else {
        None
    };

    let mut coefficients = vec![0.0; k];
    let mut std_errors = vec![None; k];
    let mut p_values = vec![None; k];
    for (a, (j, scale, _)) in active.iter().enumerate() {
        let coefficient = beta_scaled[a] / scale;
        coefficients[*j] = coefficient;

        let variance = gram_inv[(a, a)];
        let Some(sigma2) = sigma2 else {
            continue;
        };
        if variance <= 0.0 {
            continue;
        }
        let se = (sigma2 * variance).sqrt() / scale;
        std_errors[*j] = Some(se);
        if se > 0.0 {
            if let Some(dist) = &t_dist {
                let t = (coefficient / se).abs();
                p_values[*j] = Some((2.0 * (1.0 - dist.cdf(t))).clamp(0.0, 1.0));
            }
        }
    }

    OlsFit {
        coefficients,
        std_errors,
        p_values,
        rank,
        residual_dof,
        n_obs: n,
    }
}

/// `(ZᵀZ)⁺` and its numerical rank.
fn gram_pseudo_inverse(gram: DMatrix<f64>) -> (DMatrix<f64>, usize) {
    let p = gram.nrows();
    if p == 0 {
        return (gram, 0);
    }
    let svd = gram.svd(true, true);
    let cutoff = RCOND * svd.singular_values.max();
    let rank = svd.rank(cutoff);
    match svd.pseudo_inverse(cutoff) {
        Ok(inverse) => (inverse, rank),
        Err(reason) => {
            tracing::warn!(reason, "pseudo-inverse unavailable, coefficients set to zero");
            (DMatrix::zeros(p, p), 0)
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn norm(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum::<f64>().sqrt()
}

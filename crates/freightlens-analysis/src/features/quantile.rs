//! Order-frequency counts and the linear-interpolation quantile.

use std::collections::HashMap;
use std::hash::Hash;

/// Number of occurrences of each distinct key.
pub fn item_counts<'a, K, I>(keys: I) -> HashMap<&'a K, usize>
where
    K: Eq + Hash + ?Sized + 'a,
    I: IntoIterator<Item = &'a K>,
{
    let mut counts = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Quantile `q` (0.0..=1.0) of `values` using linear interpolation between
/// the closest ranks. Returns 0.0 for an empty input.
pub fn quantile_linear(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    if upper >= sorted.len() {
        sorted[sorted.len() - 1]
    } else {
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

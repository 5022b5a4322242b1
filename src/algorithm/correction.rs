//! Benjamini–Hochberg multiple-testing correction
//!
//! Adjusts the full set of raw p-values for the false discovery rate and
//! attaches the adjusted value to each association result. Results map
//! back to their adjusted p-values by position, so input order is never
//! reordered here.

use crate::models::association::AssociationResult;
use log::info;

/// Benjamini–Hochberg FDR adjustment
///
/// For rank `k` (1-indexed, ascending p) of `m` values, the adjusted
/// p-value is `p * m / k`, made monotone by a running minimum from the
/// largest rank down and clamped to 1. The returned vector is in the
/// same order as the input.
#[must_use]
pub fn benjamini_hochberg(p_values: &[f64]) -> Vec<f64> {
    let m = p_values.len();
    if m == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_unstable_by(|&left, &right| {
        p_values[left]
            .partial_cmp(&p_values[right])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut adjusted = vec![0.0; m];
    let mut running_min = f64::INFINITY;
    for rank in (0..m).rev() {
        let original = order[rank];
        let scaled = p_values[original] * m as f64 / (rank + 1) as f64;
        running_min = running_min.min(scaled).min(1.0);
        adjusted[original] = running_min;
    }

    adjusted
}

/// Attach adjusted p-values to association results by position
pub fn attach_adjusted(results: &mut [AssociationResult]) {
    if results.is_empty() {
        return;
    }

    let p_values: Vec<f64> = results.iter().map(|result| result.p_value).collect();
    let adjusted = benjamini_hochberg(&p_values);
    for (result, p_adj) in results.iter_mut().zip(adjusted) {
        result.p_value_adj = p_adj;
    }

    info!("Adjusted {} p-values (Benjamini-Hochberg)", results.len());
}

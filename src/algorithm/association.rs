//! Pairwise association testing
//!
//! For every qualifying diagnosis pair, builds the 2×2 contingency table,
//! applies the Haldane–Anscombe +0.5 continuity correction, and computes
//! the Pearson chi-square statistic (no additional Yates correction), its
//! p-value from the chi-square(1) distribution, the odds ratio with its
//! 95% log-odds confidence interval, and the joint and conditional
//! probabilities. Pairs are independent, so testing fans out across
//! threads; a failure in one pair is logged and skipped, never fatal to
//! the batch.

use crate::algorithm::cooccurrence::PairCount;
use crate::algorithm::matrix::IncidenceMatrix;
use crate::error::{Error, Result};
use crate::models::association::{AssociationResult, ContingencyTable};
use crate::models::catalog::DiagnosisCatalog;
use crate::utils::progress;
use indicatif::ParallelProgressIterator;
use log::{info, warn};
use rayon::prelude::*;
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

/// Association tester for 2×2 contingency tables
#[derive(Debug, Clone)]
pub struct AssociationTester {
    chi_squared: ChiSquared,
    /// Two-sided 97.5th percentile of the standard normal
    z_critical: f64,
}

impl AssociationTester {
    /// Create a tester with the chi-square(1) reference distribution
    pub fn new() -> Result<Self> {
        let chi_squared =
            ChiSquared::new(1.0).map_err(|e| Error::Statistics(e.to_string()))?;
        let standard_normal =
            Normal::new(0.0, 1.0).map_err(|e| Error::Statistics(e.to_string()))?;

        Ok(Self {
            chi_squared,
            z_critical: standard_normal.inverse_cdf(0.975),
        })
    }

    /// Test every qualifying pair in parallel
    ///
    /// Output order matches input pair order. A pair whose counts are
    /// inconsistent is logged at warn level and dropped; adjusted
    /// p-values are attached later by the corrector.
    #[must_use]
    pub fn test_all(
        &self,
        pairs: &[PairCount],
        matrix: &IncidenceMatrix,
        catalog: &DiagnosisCatalog,
    ) -> Vec<AssociationResult> {
        if pairs.is_empty() {
            return Vec::new();
        }

        let pb = progress::create_progress_bar(pairs.len() as u64, "Testing diagnosis pairs");
        let results: Vec<AssociationResult> = pairs
            .par_iter()
            .progress_with(pb.clone())
            .filter_map(|pair| match self.test_pair(pair, matrix, catalog) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!(
                        "Skipping pair ({}, {}): {e}",
                        matrix.code(pair.i),
                        matrix.code(pair.j)
                    );
                    None
                }
            })
            .collect();
        progress::finish_progress_bar(&pb, "Pair testing complete");

        info!("Tested {} diagnosis pairs", results.len());

        results
    }

    /// Test a single diagnosis pair
    ///
    /// # Errors
    /// Returns an error if the pair count exceeds a column total or the
    /// cells exceed the patient count.
    pub fn test_pair(
        &self,
        pair: &PairCount,
        matrix: &IncidenceMatrix,
        catalog: &DiagnosisCatalog,
    ) -> Result<AssociationResult> {
        let n = matrix.patient_count() as u64;
        let count_i = matrix.column_count(pair.i);
        let count_j = matrix.column_count(pair.j);

        let table = ContingencyTable::from_counts(pair.count, count_i, count_j, n)
            .ok_or_else(|| {
                Error::Statistics(format!(
                    "inconsistent contingency counts: a={}, count_i={count_i}, \
                     count_j={count_j}, n={n}",
                    pair.count
                ))
            })?;

        let (a, b, c, d) = table.corrected();
        let total = a + b + c + d;

        // Pearson chi-square on the corrected cells; every margin is
        // positive once the correction is applied.
        let chi2 = total * (a * d - b * c).powi(2)
            / ((a + b) * (c + d) * (a + c) * (b + d));
        let p_value = 1.0 - self.chi_squared.cdf(chi2);

        let odds_ratio = (a * d) / (b * c);
        let se_log_or = (1.0 / a + 1.0 / b + 1.0 / c + 1.0 / d).sqrt();
        let log_or = odds_ratio.ln();
        let ci_lower = (log_or - self.z_critical * se_log_or).exp();
        let ci_upper = (log_or + self.z_critical * se_log_or).exp();

        let p_joint = pair.count as f64 / n as f64;
        let p_b_given_a = conditional_probability(pair.count, count_i);
        let p_a_given_b = conditional_probability(pair.count, count_j);

        let dx1 = matrix.code(pair.i).to_string();
        let dx2 = matrix.code(pair.j).to_string();
        let desc1 = catalog.describe3(&dx1).to_string();
        let desc2 = catalog.describe3(&dx2).to_string();

        Ok(AssociationResult {
            dx1,
            desc1,
            dx2,
            desc2,
            chi2,
            p_value,
            odds_ratio,
            ci_lower,
            ci_upper,
            count_dx1: count_i,
            count_dx2: count_j,
            count_cooccurrence: pair.count,
            p_joint,
            p_b_given_a,
            p_a_given_b,
            p_value_adj: f64::NAN,
        })
    }
}

/// Conditional probability with a zero-denominator guard
fn conditional_probability(joint: u64, marginal: u64) -> f64 {
    if marginal == 0 {
        0.0
    } else {
        joint as f64 / marginal as f64
    }
}

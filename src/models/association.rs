//! Contingency tables and association results
//!
//! The 2×2 contingency table counts patients by presence of two
//! diagnoses; an `AssociationResult` carries every statistic reported for
//! one tested pair. Statistics are stored at full precision; cosmetic
//! rounding happens only at export.

use serde::Serialize;

/// 2×2 contingency table for a diagnosis pair over all patients
///
/// For diagnoses i and j: `a` = patients with both, `b` = patients with i
/// only, `c` = patients with j only, `d` = patients with neither.
/// Invariant: `a + b + c + d` equals the total patient count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContingencyTable {
    /// Patients with both diagnoses
    pub a: u64,
    /// Patients with the first diagnosis only
    pub b: u64,
    /// Patients with the second diagnosis only
    pub c: u64,
    /// Patients with neither diagnosis
    pub d: u64,
}

impl ContingencyTable {
    /// Derive the table from the pair count, the two column totals and
    /// the patient count
    ///
    /// Returns `None` if the counts are inconsistent (`a` exceeding a
    /// column total, or the cells exceeding `n`).
    #[must_use]
    pub fn from_counts(a: u64, count_i: u64, count_j: u64, n: u64) -> Option<Self> {
        let b = count_i.checked_sub(a)?;
        let c = count_j.checked_sub(a)?;
        let d = n.checked_sub(a + b + c)?;
        Some(Self { a, b, c, d })
    }

    /// Total number of patients covered by the table
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.a + self.b + self.c + self.d
    }

    /// The four cells with the Haldane–Anscombe +0.5 continuity
    /// correction applied, in `(a, b, c, d)` order
    ///
    /// The correction stabilizes the chi-square and odds-ratio estimates
    /// when cells are small and removes every zero-division case. It
    /// applies to the tested cells only; `total()` is unaffected.
    #[must_use]
    pub fn corrected(&self) -> (f64, f64, f64, f64) {
        (
            self.a as f64 + 0.5,
            self.b as f64 + 0.5,
            self.c as f64 + 0.5,
            self.d as f64 + 0.5,
        )
    }
}

/// All statistics reported for one tested diagnosis pair
///
/// Created by the association tester; the corrector attaches
/// `p_value_adj` once, after which the record is immutable.
#[derive(Debug, Clone, Serialize)]
pub struct AssociationResult {
    /// First diagnosis code (lower vocabulary index)
    pub dx1: String,
    /// Catalog description of the first diagnosis
    pub desc1: String,
    /// Second diagnosis code (higher vocabulary index)
    pub dx2: String,
    /// Catalog description of the second diagnosis
    pub desc2: String,
    /// Pearson chi-square statistic on the corrected table
    pub chi2: f64,
    /// Uncorrected p-value from the chi-square(1) distribution
    pub p_value: f64,
    /// Odds ratio from the corrected cells
    pub odds_ratio: f64,
    /// Lower bound of the 95% confidence interval for the odds ratio
    pub ci_lower: f64,
    /// Upper bound of the 95% confidence interval for the odds ratio
    pub ci_upper: f64,
    /// Patients with the first diagnosis
    pub count_dx1: u64,
    /// Patients with the second diagnosis
    pub count_dx2: u64,
    /// Patients with both diagnoses
    pub count_cooccurrence: u64,
    /// Joint probability `a / n`
    pub p_joint: f64,
    /// Conditional probability of the second diagnosis given the first
    pub p_b_given_a: f64,
    /// Conditional probability of the first diagnosis given the second
    pub p_a_given_b: f64,
    /// Benjamini–Hochberg adjusted p-value
    pub p_value_adj: f64,
}

//! Sparse pairwise co-occurrence counting
//!
//! The strict upper triangle of the Gram product of the incidence matrix
//! with itself: for every unordered diagnosis pair `(i, j)` with `i < j`,
//! the number of patients carrying both. Pairs that never co-occur are
//! simply absent, not stored as zeros.

use crate::algorithm::matrix::IncidenceMatrix;
use itertools::Itertools;
use log::info;
use rustc_hash::FxHashMap;

/// Co-occurrence count for one diagnosis pair
///
/// `i < j` always holds under the fixed vocabulary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairCount {
    /// Column index of the first diagnosis
    pub i: u32,
    /// Column index of the second diagnosis
    pub j: u32,
    /// Patients carrying both diagnoses
    pub count: u64,
}

/// Count co-occurring diagnosis pairs across all patients
///
/// Each patient row contributes one increment per unordered index pair in
/// its sorted diagnosis list. The result is sorted by `(i, j)` so output
/// order is identical across runs.
#[must_use]
pub fn count_pairs(matrix: &IncidenceMatrix) -> Vec<PairCount> {
    let mut counts: FxHashMap<(u32, u32), u64> = FxHashMap::default();

    for row in matrix.rows() {
        // Row indices are sorted ascending, so i < j for every pair.
        for (&i, &j) in row.iter().tuple_combinations() {
            *counts.entry((i, j)).or_insert(0) += 1;
        }
    }

    let mut pairs: Vec<PairCount> = counts
        .into_iter()
        .map(|((i, j), count)| PairCount { i, j, count })
        .collect();
    pairs.sort_unstable_by_key(|pair| (pair.i, pair.j));

    info!("Counted {} co-occurring diagnosis pairs", pairs.len());

    pairs
}

/// Drop pairs below the minimum co-occurrence count
///
/// Pairs under the threshold produce degenerate small-sample chi-square
/// results and are excluded from testing.
#[must_use]
pub fn qualifying_pairs(pairs: Vec<PairCount>, min_cooccurrence: u32) -> Vec<PairCount> {
    let before = pairs.len();
    let qualifying: Vec<PairCount> = pairs
        .into_iter()
        .filter(|pair| pair.count >= u64::from(min_cooccurrence))
        .collect();

    info!(
        "{} of {before} pairs qualify for testing (co-occurrence >= {min_cooccurrence})",
        qualifying.len()
    );

    qualifying
}

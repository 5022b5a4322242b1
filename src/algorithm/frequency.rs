//! 4-character diagnosis frequency summary
//!
//! Per 4-character code: the total number of raw mentions across all
//! rows and fields, the number of distinct patients carrying it, and the
//! catalog descriptions at both granularities.

use crate::models::catalog::DiagnosisCatalog;
use crate::models::patient::ConsolidatedDiagnoses;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Frequency summary entry for one 4-character diagnosis
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisFrequency {
    /// 4-character diagnosis code
    pub code: String,
    /// Raw mentions across all rows and fields
    pub mentions: u64,
    /// Distinct patients carrying the code
    pub patients: u64,
    /// Catalog description of the 4-character code
    pub description4: String,
    /// Catalog description of the 3-character category
    pub description3: String,
}

/// Summarize 4-character diagnosis frequencies
///
/// Sorted by mention count descending, ties broken by code, so the
/// summary is identical across runs.
#[must_use]
pub fn diagnosis_frequencies(
    consolidated: &ConsolidatedDiagnoses,
    catalog: &DiagnosisCatalog,
) -> Vec<DiagnosisFrequency> {
    let mut patient_counts: FxHashMap<&str, u64> = FxHashMap::default();
    for patient in &consolidated.patients {
        for code in &patient.codes4 {
            *patient_counts.entry(code.as_str()).or_insert(0) += 1;
        }
    }

    let mut frequencies: Vec<DiagnosisFrequency> = consolidated
        .mentions4
        .iter()
        .map(|(code, &mentions)| {
            let category: String = code.chars().take(3).collect();
            DiagnosisFrequency {
                code: code.clone(),
                mentions,
                patients: patient_counts.get(code.as_str()).copied().unwrap_or(0),
                description4: catalog.describe4(code).to_string(),
                description3: catalog.describe3(&category).to_string(),
            }
        })
        .collect();

    frequencies.sort_unstable_by(|left, right| {
        right
            .mentions
            .cmp(&left.mentions)
            .then_with(|| left.code.cmp(&right.code))
    });

    frequencies
}

//! End-to-end analysis pipeline
//!
//! A strict linear pipeline: consolidate → incidence matrix → pair
//! counts → association tests → multiple-testing correction. Input-shape
//! problems fail fast before any stage runs; an empty intermediate stage
//! (no supported diagnoses, no qualifying pairs) short-circuits into an
//! empty result set instead of erroring.

use crate::algorithm::association::AssociationTester;
use crate::algorithm::consolidate::consolidate_batches;
use crate::algorithm::cooccurrence::{count_pairs, qualifying_pairs};
use crate::algorithm::correction::attach_adjusted;
use crate::algorithm::frequency::{DiagnosisFrequency, diagnosis_frequencies};
use crate::algorithm::matrix::IncidenceMatrix;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::association::AssociationResult;
use crate::models::catalog::DiagnosisCatalog;
use crate::models::patient::ConsolidatedDiagnoses;
use arrow::record_batch::RecordBatch;
use log::info;
use std::time::Instant;

/// Everything one analysis run produces
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    /// Per-patient consolidated diagnosis sets
    pub consolidated: ConsolidatedDiagnoses,
    /// 4-character diagnosis frequency summary
    pub frequencies: Vec<DiagnosisFrequency>,
    /// All tested pairs with adjusted p-values, unfiltered
    pub associations: Vec<AssociationResult>,
}

/// Run the full analysis over ingested record batches
///
/// # Errors
/// Fails fast on input-shape problems: a missing patient-identifier
/// column or an empty input table.
pub fn run_analysis(
    batches: &[RecordBatch],
    catalog: &DiagnosisCatalog,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput> {
    let start = Instant::now();

    let consolidated = consolidate_batches(batches, config)?;
    let frequencies = diagnosis_frequencies(&consolidated, catalog);
    let associations = analyze_consolidated(&consolidated, catalog, config)?;

    info!("Analysis completed in {:.2?}", start.elapsed());

    Ok(AnalysisOutput {
        consolidated,
        frequencies,
        associations,
    })
}

/// Run the co-occurrence stages over already-consolidated diagnoses
///
/// # Errors
/// Returns an error only if the chi-square reference distribution cannot
/// be constructed; empty stages short-circuit to an empty result set.
pub fn analyze_consolidated(
    consolidated: &ConsolidatedDiagnoses,
    catalog: &DiagnosisCatalog,
    config: &AnalysisConfig,
) -> Result<Vec<AssociationResult>> {
    let matrix = IncidenceMatrix::build(consolidated, config.min_support);
    if matrix.diagnosis_count() == 0 {
        info!("No diagnosis reaches the support threshold; nothing to test");
        return Ok(Vec::new());
    }

    let pairs = qualifying_pairs(count_pairs(&matrix), config.min_cooccurrence);
    if pairs.is_empty() {
        info!("No qualifying diagnosis pairs; nothing to test");
        return Ok(Vec::new());
    }

    let tester = AssociationTester::new()?;
    let mut associations = tester.test_all(&pairs, &matrix, catalog);
    attach_adjusted(&mut associations);

    Ok(associations)
}

//! Per-patient diagnosis consolidation
//!
//! Collapses the raw per-visit diagnosis fields of the discharge table
//! into one deduplicated diagnosis set per patient, at both the
//! 4-character and 3-character granularities. The 3-character sets feed
//! the co-occurrence analysis; the 4-character sets feed the consolidated
//! export and the frequency summary.

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::models::code::NormalizedCode;
use crate::models::patient::{ConsolidatedDiagnoses, ConsolidatedPatient, PatientRecord};
use crate::utils::array_utils::{downcast_array, get_column};
use arrow::array::{Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::{info, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Working state for one patient during the fold
#[derive(Debug, Default)]
struct PatientAccumulator {
    codes4: FxHashSet<String>,
    codes3: FxHashSet<String>,
}

/// Consolidate typed patient rows into per-patient diagnosis sets
///
/// Rows with an empty patient identifier are skipped and counted, never
/// fatal. Repeated mentions of a code within one patient collapse to a
/// single occurrence.
///
/// # Errors
/// Returns `Error::EmptyInput` if no rows are supplied.
pub fn consolidate_records(records: &[PatientRecord]) -> Result<ConsolidatedDiagnoses> {
    if records.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut accumulators: FxHashMap<String, PatientAccumulator> = FxHashMap::default();
    let mut mentions4: FxHashMap<String, u64> = FxHashMap::default();
    let mut skipped_rows = 0usize;

    for record in records {
        if record.patient_id.trim().is_empty() {
            skipped_rows += 1;
            continue;
        }

        let entry = accumulators.entry(record.patient_id.clone()).or_default();
        for raw in record.raw_codes.iter().flatten() {
            accumulate(entry, &mut mentions4, raw);
        }
    }

    finish(accumulators, mentions4, skipped_rows)
}

/// Consolidate record batches from the ingestion collaborator
///
/// The batches must carry the patient-identifier column named by the
/// configuration; diagnosis columns absent from a batch are treated as
/// all-missing. Rows with a null identifier are skipped and counted.
///
/// # Errors
/// Returns `Error::ColumnNotFound` if the identifier column is absent and
/// `Error::EmptyInput` if the batches hold no rows.
pub fn consolidate_batches(
    batches: &[RecordBatch],
    config: &AnalysisConfig,
) -> Result<ConsolidatedDiagnoses> {
    let total_rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
    if total_rows == 0 {
        return Err(Error::EmptyInput);
    }

    let mut accumulators: FxHashMap<String, PatientAccumulator> = FxHashMap::default();
    let mut mentions4: FxHashMap<String, u64> = FxHashMap::default();
    let mut skipped_rows = 0usize;

    for batch in batches {
        let id_array = get_column(batch, &config.id_column, &DataType::Utf8, true)?
            .ok_or_else(|| Error::ColumnNotFound {
                column: config.id_column.clone(),
            })?;
        let ids = downcast_array::<StringArray>(&id_array, &config.id_column, "String")?;

        // Missing diagnosis columns behave like all-null columns.
        let mut dx_arrays: SmallVec<[Option<arrow::array::ArrayRef>; 7]> = SmallVec::new();
        for dx_column in &config.dx_columns {
            dx_arrays.push(get_column(batch, dx_column, &DataType::Utf8, false)?);
        }
        let mut dx_values: SmallVec<[Option<&StringArray>; 7]> = SmallVec::new();
        for (dx_array, dx_column) in dx_arrays.iter().zip(&config.dx_columns) {
            dx_values.push(match dx_array {
                Some(array) => Some(downcast_array::<StringArray>(array, dx_column, "String")?),
                None => None,
            });
        }

        for row in 0..batch.num_rows() {
            if ids.is_null(row) || ids.value(row).trim().is_empty() {
                skipped_rows += 1;
                continue;
            }

            let entry = accumulators.entry(ids.value(row).to_string()).or_default();
            for values in dx_values.iter().flatten() {
                if !values.is_null(row) {
                    accumulate(entry, &mut mentions4, values.value(row));
                }
            }
        }
    }

    finish(accumulators, mentions4, skipped_rows)
}

fn accumulate(
    entry: &mut PatientAccumulator,
    mentions4: &mut FxHashMap<String, u64>,
    raw: &str,
) {
    let Some(code) = NormalizedCode::parse(raw) else {
        return;
    };

    *mentions4.entry(code.code4.clone()).or_insert(0) += 1;
    if !code.is_excluded_chapter() {
        entry.codes3.insert(code.code3.clone());
    }
    entry.codes4.insert(code.code4);
}

fn finish(
    accumulators: FxHashMap<String, PatientAccumulator>,
    mentions4: FxHashMap<String, u64>,
    skipped_rows: usize,
) -> Result<ConsolidatedDiagnoses> {
    if skipped_rows > 0 {
        warn!("Skipped {skipped_rows} rows with a missing patient identifier");
    }
    if accumulators.is_empty() {
        return Err(Error::EmptyInput);
    }

    // Sorted patients and sorted per-patient sets keep every downstream
    // table deterministic across runs.
    let mut patients: Vec<ConsolidatedPatient> = accumulators
        .into_iter()
        .map(|(patient_id, acc)| {
            let mut codes4: Vec<String> = acc.codes4.into_iter().collect();
            let mut codes3: Vec<String> = acc.codes3.into_iter().collect();
            codes4.sort_unstable();
            codes3.sort_unstable();
            ConsolidatedPatient {
                patient_id,
                codes4,
                codes3,
            }
        })
        .collect();
    patients.sort_unstable_by(|left, right| left.patient_id.cmp(&right.patient_id));

    info!("Consolidated diagnoses for {} patients", patients.len());

    Ok(ConsolidatedDiagnoses {
        patients,
        skipped_rows,
        mentions4,
    })
}

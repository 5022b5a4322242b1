//! Result-table export
//!
//! Converts the analysis outputs into flat Arrow record batches for the
//! storage collaborator. Column names are a fixed contract with the
//! downstream warehouse and keep the original Spanish headers. Numeric
//! rounding here is cosmetic only: every statistic is computed and
//! corrected at full precision before reaching this module.

use crate::algorithm::frequency::DiagnosisFrequency;
use crate::error::Result;
use crate::models::association::AssociationResult;
use crate::models::patient::ConsolidatedDiagnoses;
use arrow::array::{ArrayRef, Float64Array, Int64Array, ListBuilder, StringArray, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::info;
use std::sync::Arc;

/// Select the associations below the adjusted-significance cutoff
#[must_use]
pub fn significant_associations(
    results: &[AssociationResult],
    significance: f64,
) -> Vec<AssociationResult> {
    let selected: Vec<AssociationResult> = results
        .iter()
        .filter(|result| result.p_value_adj < significance)
        .cloned()
        .collect();

    info!(
        "{} of {} associations significant at adjusted p < {significance}",
        selected.len(),
        results.len()
    );

    selected
}

/// Schema of the association export table
#[must_use]
pub fn association_schema() -> Schema {
    Schema::new(vec![
        Field::new("Dx1", DataType::Utf8, false),
        Field::new("Desc1", DataType::Utf8, false),
        Field::new("Dx2", DataType::Utf8, false),
        Field::new("Desc2", DataType::Utf8, false),
        Field::new("Chi2", DataType::Float64, false),
        Field::new("p_value", DataType::Float64, false),
        Field::new("OR", DataType::Float64, false),
        Field::new("IC95_Lower", DataType::Float64, false),
        Field::new("IC95_Upper", DataType::Float64, false),
        Field::new("count_dx1", DataType::Int64, false),
        Field::new("count_dx2", DataType::Int64, false),
        Field::new("count_coocurrence", DataType::Int64, false),
        Field::new("P_conjunta", DataType::Float64, false),
        Field::new("P_B_dado_A", DataType::Float64, false),
        Field::new("P_A_dado_B", DataType::Float64, false),
        Field::new("p_value_adj", DataType::Float64, false),
    ])
}

/// Convert association results to the export record batch
///
/// Test statistics are rounded to 3 decimals and probabilities to 5;
/// the raw p-value is exported at full precision.
pub fn associations_to_batch(results: &[AssociationResult]) -> Result<RecordBatch> {
    let columns: Vec<ArrayRef> = vec![
        string_column(results, |r| r.dx1.as_str()),
        string_column(results, |r| r.desc1.as_str()),
        string_column(results, |r| r.dx2.as_str()),
        string_column(results, |r| r.desc2.as_str()),
        float_column(results, |r| round_to(r.chi2, 3)),
        float_column(results, |r| r.p_value),
        float_column(results, |r| round_to(r.odds_ratio, 3)),
        float_column(results, |r| round_to(r.ci_lower, 3)),
        float_column(results, |r| round_to(r.ci_upper, 3)),
        int_column(results, |r| r.count_dx1),
        int_column(results, |r| r.count_dx2),
        int_column(results, |r| r.count_cooccurrence),
        float_column(results, |r| round_to(r.p_joint, 5)),
        float_column(results, |r| round_to(r.p_b_given_a, 5)),
        float_column(results, |r| round_to(r.p_a_given_b, 5)),
        float_column(results, |r| round_to(r.p_value_adj, 5)),
    ];

    Ok(RecordBatch::try_new(Arc::new(association_schema()), columns)?)
}

/// Schema of the per-patient consolidated export table
#[must_use]
pub fn consolidated_schema() -> Schema {
    Schema::new(vec![
        Field::new("ID", DataType::Utf8, false),
        Field::new(
            "diagnosticos_4dig",
            DataType::List(Arc::new(Field::new("item", DataType::Utf8, true))),
            false,
        ),
    ])
}

/// Convert per-patient consolidated 4-character sets to a record batch
pub fn consolidated_to_batch(consolidated: &ConsolidatedDiagnoses) -> Result<RecordBatch> {
    let ids: StringArray = consolidated
        .patients
        .iter()
        .map(|patient| Some(patient.patient_id.as_str()))
        .collect();

    let mut codes = ListBuilder::new(StringBuilder::new());
    for patient in &consolidated.patients {
        for code in &patient.codes4 {
            codes.values().append_value(code);
        }
        codes.append(true);
    }

    Ok(RecordBatch::try_new(
        Arc::new(consolidated_schema()),
        vec![Arc::new(ids), Arc::new(codes.finish())],
    )?)
}

/// Schema of the 4-character frequency summary table
#[must_use]
pub fn frequency_schema() -> Schema {
    Schema::new(vec![
        Field::new("Diagnostico", DataType::Utf8, false),
        Field::new("Frecuencia", DataType::Int64, false),
        Field::new("Pacientes", DataType::Int64, false),
        Field::new("Descripcion_4dig", DataType::Utf8, false),
        Field::new("Descripcion_3dig", DataType::Utf8, false),
    ])
}

/// Convert the frequency summary to a record batch
pub fn frequencies_to_batch(frequencies: &[DiagnosisFrequency]) -> Result<RecordBatch> {
    let columns: Vec<ArrayRef> = vec![
        string_column(frequencies, |f| f.code.as_str()),
        int_column(frequencies, |f| f.mentions),
        int_column(frequencies, |f| f.patients),
        string_column(frequencies, |f| f.description4.as_str()),
        string_column(frequencies, |f| f.description3.as_str()),
    ];

    Ok(RecordBatch::try_new(Arc::new(frequency_schema()), columns)?)
}

/// Round to a number of decimal places for reporting
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn string_column<T>(rows: &[T], value: impl Fn(&T) -> &str) -> ArrayRef {
    Arc::new(rows.iter().map(|row| Some(value(row))).collect::<StringArray>())
}

fn float_column<T>(rows: &[T], value: impl Fn(&T) -> f64) -> ArrayRef {
    Arc::new(rows.iter().map(|row| Some(value(row))).collect::<Float64Array>())
}

fn int_column<T>(rows: &[T], value: impl Fn(&T) -> u64) -> ArrayRef {
    Arc::new(
        rows.iter()
            .map(|row| Some(value(row) as i64))
            .collect::<Int64Array>(),
    )
}

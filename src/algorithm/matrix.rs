//! Patient × diagnosis incidence matrix
//!
//! Sparse binary incidence of 3-character diagnoses across patients,
//! stored in compressed sparse row form: one row of sorted column indices
//! per patient over a lexicographically sorted vocabulary. The vocabulary
//! fixes column indices deterministically, and filtering by minimum
//! support keeps the surviving columns in the same relative order, so the
//! `i < j` pair ordering used downstream is stable across runs.
//!
//! Diagnoses run into the thousands before filtering and patients into
//! the hundreds of thousands; a dense matrix is never materialized.

use crate::models::patient::ConsolidatedDiagnoses;
use crate::utils::progress;
use log::info;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// Sparse binary incidence matrix over the filtered vocabulary
#[derive(Debug, Clone)]
pub struct IncidenceMatrix {
    /// Retained 3-character codes, lexicographically sorted
    vocabulary: Vec<String>,
    /// CSR row offsets, one entry per patient plus the terminal offset
    row_offsets: Vec<usize>,
    /// CSR column indices, sorted ascending within each row
    col_indices: Vec<u32>,
    /// Patients per retained diagnosis (column sums)
    column_counts: Vec<u64>,
}

impl IncidenceMatrix {
    /// Build the matrix from consolidated 3-character diagnosis sets
    ///
    /// Columns are the sorted union of all codes across patients; columns
    /// observed in fewer than `min_support` patients are dropped and the
    /// rest re-indexed in the same relative order.
    #[must_use]
    pub fn build(consolidated: &ConsolidatedDiagnoses, min_support: u32) -> Self {
        // Sorted union fixes the full vocabulary order.
        let full_vocabulary: Vec<&String> = consolidated
            .patients
            .iter()
            .flat_map(|patient| patient.codes3.iter())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut full_counts = vec![0u64; full_vocabulary.len()];
        let full_index: FxHashMap<&str, usize> = full_vocabulary
            .iter()
            .enumerate()
            .map(|(idx, code)| (code.as_str(), idx))
            .collect();

        for patient in &consolidated.patients {
            for code in &patient.codes3 {
                full_counts[full_index[code.as_str()]] += 1;
            }
        }

        // Retain supported columns; the remap preserves relative order,
        // so filtered indices stay sorted wherever full indices were.
        let mut remap: FxHashMap<&str, u32> = FxHashMap::default();
        let mut vocabulary = Vec::new();
        let mut column_counts = Vec::new();
        for (idx, code) in full_vocabulary.iter().enumerate() {
            if full_counts[idx] >= u64::from(min_support) {
                remap.insert(code.as_str(), vocabulary.len() as u32);
                vocabulary.push((*code).clone());
                column_counts.push(full_counts[idx]);
            }
        }

        let pb = progress::create_progress_bar(
            consolidated.patients.len() as u64,
            "Building incidence matrix",
        );
        let mut row_offsets = Vec::with_capacity(consolidated.patients.len() + 1);
        let mut col_indices = Vec::new();
        row_offsets.push(0);
        for patient in &consolidated.patients {
            // codes3 is sorted, so the mapped indices arrive sorted too.
            col_indices.extend(
                patient
                    .codes3
                    .iter()
                    .filter_map(|code| remap.get(code.as_str()).copied()),
            );
            row_offsets.push(col_indices.len());
            pb.inc(1);
        }
        progress::finish_progress_bar(&pb, "Incidence matrix ready");

        info!(
            "Incidence matrix: {} patients x {} diagnoses (support >= {min_support}, {} dropped)",
            consolidated.patients.len(),
            vocabulary.len(),
            full_vocabulary.len() - vocabulary.len(),
        );

        Self {
            vocabulary,
            row_offsets,
            col_indices,
            column_counts,
        }
    }

    /// Number of patients (rows)
    #[must_use]
    pub fn patient_count(&self) -> usize {
        self.row_offsets.len() - 1
    }

    /// Number of retained diagnoses (columns)
    #[must_use]
    pub fn diagnosis_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// The retained vocabulary, in column order
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Code at a column index
    #[must_use]
    pub fn code(&self, column: u32) -> &str {
        &self.vocabulary[column as usize]
    }

    /// Number of patients with the diagnosis at a column index
    #[must_use]
    pub fn column_count(&self, column: u32) -> u64 {
        self.column_counts[column as usize]
    }

    /// Sorted column indices of one patient row
    #[must_use]
    pub fn row(&self, patient: usize) -> &[u32] {
        &self.col_indices[self.row_offsets[patient]..self.row_offsets[patient + 1]]
    }

    /// Iterate over all patient rows
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        (0..self.patient_count()).map(|patient| self.row(patient))
    }
}

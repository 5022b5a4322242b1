//! Patient entity models
//!
//! A `PatientRecord` is one typed row of the ingestion table: a patient
//! identifier plus the raw diagnosis fields of a single discharge episode.
//! Consolidation collapses all rows of one patient into a
//! `ConsolidatedPatient` holding the deduplicated diagnosis sets used by
//! the downstream stages.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// One row of the discharge table, belonging to exactly one patient
///
/// A row carries up to 7 raw diagnosis fields (admission, principal
/// discharge, three related discharge, complication, death), any of which
/// may be missing.
#[derive(Debug, Clone)]
pub struct PatientRecord {
    /// Patient identifier, unique per patient across rows
    pub patient_id: String,
    /// Raw diagnosis field values in clinical-role order
    pub raw_codes: SmallVec<[Option<String>; 7]>,
}

impl PatientRecord {
    /// Create a new record from a patient id and raw diagnosis values
    #[must_use]
    pub fn new<I, S>(patient_id: impl Into<String>, raw_codes: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            patient_id: patient_id.into(),
            raw_codes: raw_codes
                .into_iter()
                .map(|code| code.map(Into::into))
                .collect(),
        }
    }
}

/// The deduplicated diagnosis sets of one patient
///
/// Both sets are sorted lexicographically, so identical input always
/// yields identical output. The 3-character set additionally excludes the
/// `Z` and `R` chapters.
#[derive(Debug, Clone, Default)]
pub struct ConsolidatedPatient {
    /// Patient identifier
    pub patient_id: String,
    /// Unique 4-character codes, sorted
    pub codes4: Vec<String>,
    /// Unique 3-character codes, sorted, excluded chapters removed
    pub codes3: Vec<String>,
}

/// Consolidated diagnosis sets for all patients of one run
#[derive(Debug, Clone, Default)]
pub struct ConsolidatedDiagnoses {
    /// One entry per patient, sorted by patient id
    pub patients: Vec<ConsolidatedPatient>,
    /// Rows dropped because their patient identifier was null or empty
    pub skipped_rows: usize,
    /// Raw mention counts per 4-character code, before per-patient
    /// deduplication (feeds the frequency summary)
    pub mentions4: FxHashMap<String, u64>,
}

impl ConsolidatedDiagnoses {
    /// Number of consolidated patients
    #[must_use]
    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    /// Whether no patient carries any 3-character diagnosis
    #[must_use]
    pub fn is_empty_3dig(&self) -> bool {
        self.patients.iter().all(|p| p.codes3.is_empty())
    }
}

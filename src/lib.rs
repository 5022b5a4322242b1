//! A Rust library for statistical analysis of ICD-10 diagnosis
//! co-occurrences in hospital discharge (RIPS) data: per-patient
//! consolidation, sparse incidence matrices, pairwise contingency
//! statistics and Benjamini-Hochberg correction.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use models::{
    AssociationResult, ConsolidatedDiagnoses, ContingencyTable, DiagnosisCatalog, NormalizedCode,
    PatientRecord,
};

// Pipeline entry points
pub use algorithm::pipeline::{AnalysisOutput, analyze_consolidated, run_analysis};

// Arrow types
pub use arrow::record_batch::RecordBatch;

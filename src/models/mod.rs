//! Data models for the co-occurrence analysis
//!
//! Typed records passed between the pipeline stages: normalized codes,
//! patient rows and consolidated diagnosis sets, contingency tables and
//! association results, and the description catalog.

pub mod association;
pub mod catalog;
pub mod code;
pub mod patient;

pub use association::{AssociationResult, ContingencyTable};
pub use catalog::{DiagnosisCatalog, MISSING_DESCRIPTION};
pub use code::NormalizedCode;
pub use patient::{ConsolidatedDiagnoses, ConsolidatedPatient, PatientRecord};

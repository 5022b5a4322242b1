//! Algorithm stages of the co-occurrence analysis
//!
//! The stages form a strict linear pipeline over immutable inputs:
//! consolidation, incidence matrix construction, pair counting,
//! association testing, and multiple-testing correction.

pub mod association;
pub mod consolidate;
pub mod cooccurrence;
pub mod correction;
pub mod frequency;
pub mod matrix;
pub mod pipeline;

pub use association::AssociationTester;
pub use consolidate::{consolidate_batches, consolidate_records};
pub use cooccurrence::{PairCount, count_pairs, qualifying_pairs};
pub use correction::{attach_adjusted, benjamini_hochberg};
pub use frequency::{DiagnosisFrequency, diagnosis_frequencies};
pub use matrix::IncidenceMatrix;
pub use pipeline::{AnalysisOutput, analyze_consolidated, run_analysis};

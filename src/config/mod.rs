//! Configuration for the co-occurrence analysis.

use serde::{Deserialize, Serialize};

/// Default patient-identifier column in RIPS discharge tables
pub const DEFAULT_ID_COLUMN: &str = "ID";

/// Raw diagnosis columns of a RIPS discharge row, in clinical-role order
pub const DEFAULT_DX_COLUMNS: [&str; 7] = [
    "DIAGNOSTICO INGRESO",
    "Cod_Dx_Ppal_Egreso",
    "DIAG EGRESO REL 1",
    "DIAG EGRESO REL 2",
    "DIAG EGRESO REL 3",
    "DIAG COMPLICACION",
    "DIAG MUERTE",
];

/// Configuration for the co-occurrence analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum number of patients a diagnosis needs to stay in the analysis
    pub min_support: u32,
    /// Minimum number of shared patients for a pair to be tested
    pub min_cooccurrence: u32,
    /// Adjusted p-value cutoff for the significant-pairs export
    pub significance: f64,
    /// Name of the patient-identifier column in the input table
    pub id_column: String,
    /// Names of the raw diagnosis columns, in clinical-role order
    pub dx_columns: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_support: 30,
            min_cooccurrence: 5,
            significance: 0.05,
            id_column: DEFAULT_ID_COLUMN.to_string(),
            dx_columns: DEFAULT_DX_COLUMNS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum diagnosis support threshold
    #[must_use]
    pub const fn with_min_support(mut self, min_support: u32) -> Self {
        self.min_support = min_support;
        self
    }

    /// Set the minimum co-occurrence count for a pair to be tested
    #[must_use]
    pub const fn with_min_cooccurrence(mut self, min_cooccurrence: u32) -> Self {
        self.min_cooccurrence = min_cooccurrence;
        self
    }

    /// Set the significance cutoff applied to adjusted p-values
    #[must_use]
    pub const fn with_significance(mut self, significance: f64) -> Self {
        self.significance = significance;
        self
    }

    /// Set the patient-identifier column name
    #[must_use]
    pub fn with_id_column(mut self, id_column: impl Into<String>) -> Self {
        self.id_column = id_column.into();
        self
    }

    /// Replace the raw diagnosis column list
    #[must_use]
    pub fn with_dx_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dx_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

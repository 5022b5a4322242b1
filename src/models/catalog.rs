//! ICD-10 code description catalog
//!
//! Read-only lookup from diagnosis codes to human-readable descriptions,
//! at both the 3-character and 4-character granularities. The catalog is
//! supplied by an external collaborator; a code missing from it resolves
//! to a placeholder label, never an error.

use crate::error::Result;
use crate::utils::array_utils::{downcast_array, get_column};
use arrow::array::{Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use std::collections::HashMap;

/// Label reported for codes absent from the catalog
pub const MISSING_DESCRIPTION: &str = "No encontrado";

/// Expected catalog columns: 3-character code and description
pub const CATALOG_COLUMNS_3DIG: (&str, &str) = ("Codigo_3dig", "Descripcion_3dig");
/// Expected catalog columns: 4-character code and description
pub const CATALOG_COLUMNS_4DIG: (&str, &str) = ("Codigo_4dig", "Descripcion_4dig");

/// Read-only ICD-10 code → description lookup
#[derive(Debug, Clone, Default)]
pub struct DiagnosisCatalog {
    descriptions3: HashMap<String, String>,
    descriptions4: HashMap<String, String>,
}

impl DiagnosisCatalog {
    /// Create an empty catalog; every lookup resolves to the placeholder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from pre-assembled description maps
    #[must_use]
    pub fn from_maps(
        descriptions3: HashMap<String, String>,
        descriptions4: HashMap<String, String>,
    ) -> Self {
        Self {
            descriptions3,
            descriptions4,
        }
    }

    /// Load the catalog from record batches carrying the code and
    /// description columns at both granularities
    ///
    /// Rows with a null code or description are skipped; the first
    /// description seen for a code wins.
    pub fn from_record_batches(batches: &[RecordBatch]) -> Result<Self> {
        let mut catalog = Self::new();

        for batch in batches {
            catalog.load_granularity(batch, CATALOG_COLUMNS_3DIG, true)?;
            catalog.load_granularity(batch, CATALOG_COLUMNS_4DIG, false)?;
        }

        Ok(catalog)
    }

    fn load_granularity(
        &mut self,
        batch: &RecordBatch,
        (code_column, desc_column): (&str, &str),
        three_digit: bool,
    ) -> Result<()> {
        let code_opt = get_column(batch, code_column, &DataType::Utf8, false)?;
        let desc_opt = get_column(batch, desc_column, &DataType::Utf8, false)?;

        let (Some(code_array), Some(desc_array)) = (code_opt, desc_opt) else {
            return Ok(());
        };

        let codes = downcast_array::<StringArray>(&code_array, code_column, "String")?;
        let descriptions = downcast_array::<StringArray>(&desc_array, desc_column, "String")?;

        let target = if three_digit {
            &mut self.descriptions3
        } else {
            &mut self.descriptions4
        };

        for row in 0..codes.len() {
            if codes.is_null(row) || descriptions.is_null(row) {
                continue;
            }
            let code = codes.value(row).trim().to_uppercase();
            if code.is_empty() {
                continue;
            }
            target
                .entry(code)
                .or_insert_with(|| descriptions.value(row).trim().to_string());
        }

        Ok(())
    }

    /// Description of a 3-character code, or the placeholder
    #[must_use]
    pub fn describe3(&self, code: &str) -> &str {
        self.descriptions3
            .get(code)
            .map_or(MISSING_DESCRIPTION, String::as_str)
    }

    /// Description of a 4-character code, or the placeholder
    #[must_use]
    pub fn describe4(&self, code: &str) -> &str {
        self.descriptions4
            .get(code)
            .map_or(MISSING_DESCRIPTION, String::as_str)
    }

    /// Number of catalog entries across both granularities
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptions3.len() + self.descriptions4.len()
    }

    /// Whether the catalog holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptions3.is_empty() && self.descriptions4.is_empty()
    }
}

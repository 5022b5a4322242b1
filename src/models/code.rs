//! Diagnosis code normalization
//!
//! Raw RIPS diagnosis fields carry ICD-10 codes in inconsistent shapes:
//! mixed case, stray whitespace, an optional decimal separator
//! (`E11.9` vs `E119`), and textual missing-value markers. This module
//! canonicalizes one raw value into the two granularities used by the
//! analysis: the 4-character sub-category and the 3-character category.

/// A diagnosis code canonicalized at both analysis granularities
///
/// Invariant: `code3` is always a prefix of `code4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedCode {
    /// Sub-category code, up to 4 characters
    pub code4: String,
    /// Category code, first 3 characters
    pub code3: String,
}

impl NormalizedCode {
    /// Normalize a raw diagnosis field value
    ///
    /// Trims, uppercases and strips the decimal separator, then truncates
    /// to 4 and 3 characters. Returns `None` for empty values, values
    /// shorter than 3 characters after cleaning, and textual
    /// missing-value markers.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '.')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if cleaned.len() < 3 || is_missing_marker(&cleaned) {
            return None;
        }

        let code4: String = cleaned.chars().take(4).collect();
        let code3: String = code4.chars().take(3).collect();

        Some(Self { code4, code3 })
    }

    /// Whether the category code belongs to a chapter excluded from the
    /// 3-character analysis
    ///
    /// `Z` codes (factors influencing health status) and `R` codes
    /// (symptoms and signs) carry no diagnostic information for
    /// co-occurrence purposes.
    #[must_use]
    pub fn is_excluded_chapter(&self) -> bool {
        matches!(self.code3.chars().next(), Some('Z' | 'R'))
    }
}

/// Check whether a cleaned value is a textual missing-value marker
fn is_missing_marker(cleaned: &str) -> bool {
    matches!(cleaned, "NONE" | "NAN" | "NULL")
}

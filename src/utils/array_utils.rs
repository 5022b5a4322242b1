//! Utilities for working with Arrow arrays.
//!
//! Safe extraction of columns from record batches, with a cast fallback
//! for inputs that arrive dictionary-encoded or as large strings.

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::warn;

use crate::error::{Error, Result};

/// Get a column from a record batch, ensuring it has the expected type
///
/// If the column holds a different type, a cast is attempted. Returns
/// `Ok(None)` when the column is absent and `required` is false.
///
/// # Errors
/// Returns an error if the column is missing and `required` is true, or
/// if the column cannot be cast to the expected type.
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
    required: bool,
) -> Result<Option<ArrayRef>> {
    let Ok(idx) = batch.schema().index_of(column_name) else {
        if required {
            return Err(Error::ColumnNotFound {
                column: column_name.to_string(),
            });
        }
        return Ok(None);
    };

    let column = batch.column(idx);
    if column.data_type() == expected_type {
        return Ok(Some(column.clone()));
    }

    warn!(
        "Casting column '{column_name}' from {:?} to {expected_type:?}",
        column.data_type()
    );
    let converted = arrow::compute::kernels::cast::cast(column, expected_type).map_err(|_| {
        Error::InvalidDataType {
            column: column_name.to_string(),
            expected: format!("{expected_type:?}"),
        }
    })?;

    Ok(Some(converted))
}

/// Downcast a column to a specific array type with a clear error message
///
/// # Errors
/// Returns an error if the array is not of the requested type.
pub fn downcast_array<'a, T: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    type_name: &str,
) -> Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::InvalidDataType {
            column: column_name.to_string(),
            expected: type_name.to_string(),
        })
}

//! Parquet file operations
//!
//! Reading input tables into Arrow record batches and writing result
//! tables back out. Only the CLI boundary touches the filesystem; the
//! analysis core operates on in-memory batches.

use std::fs::File;
use std::path::Path;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::{Error, Result};

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Read a Parquet file into a vector of record batches
///
/// # Errors
/// Returns an error if the file cannot be opened or is not valid Parquet.
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>> {
    if !path.is_file() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File does not exist: {}", path.display()),
        )));
    }

    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build()?;

    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }

    Ok(batches)
}

/// Write a record batch to a Parquet file, overwriting if present
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

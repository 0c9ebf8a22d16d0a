use std::path::PathBuf;

use thiserror::Error;

/// Errors that can arise while importing into or reading from the catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (directory creation, source reads, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A row in a delimited source could not be read or did not match the record shape.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Returned when fetching a record that is not present.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Returned when deserializing a record with an unexpected schema version.
    #[error("schema mismatch for {entity}: expected {expected}, got {found}")]
    SchemaMismatch {
        entity: &'static str,
        expected: u8,
        found: u8,
    },

    /// The source header is missing one or more required columns.
    #[error("malformed source {}: missing columns {missing:?}", .path.display())]
    MalformedSource { path: PathBuf, missing: Vec<String> },

    /// A data row has a blank key cell.
    #[error("malformed source {}: row {row} has a blank {column}", .path.display())]
    MissingKey {
        path: PathBuf,
        row: usize,
        column: &'static str,
    },

    /// Configured delimiter is not a single ASCII character.
    #[error("invalid delimiter: {0:?}")]
    InvalidDelimiter(String),
}

impl CatalogError {
    /// True for the lookup-miss case, which callers surface as a not-found page.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

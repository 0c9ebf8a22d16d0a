//! Catalog data model, sled-backed persistence and the bulk importer.
//!
//! Records are flat sets of text fields keyed by name. They are created only by the
//! [`Importer`] and never updated or deleted afterwards; the query side is read-only.

pub mod errors;
pub mod import;
pub mod storage;
pub mod types;

pub use errors::CatalogError;
pub use import::{
    ImportSources, ImportSummary, Importer, RowOutcome, RowReport, SourceReport, SourceStatus,
};
pub use storage::{CatalogStore, CatalogStoreBuilder};
pub use types::*;

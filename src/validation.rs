//! Source shape checks applied before rows are reconciled against the store.
//!
//! The only hard requirements are that the header carries every expected column and that
//! each row has a non-blank key. Field lengths are advisory and only reported.

use std::collections::HashSet;

use crate::catalog::types::{CatalogEntity, FieldSpec};

/// Outcome of comparing a source header against the expected columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderCheck {
    /// Expected columns absent from the header.
    pub missing: Vec<String>,
    /// Header columns that no field maps to; these are ignored on import.
    pub extra: Vec<String>,
}

impl HeaderCheck {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Compare `headers` to `expected` by exact, case-sensitive name.
pub fn check_headers<'a, I>(headers: I, expected: &[FieldSpec]) -> HeaderCheck
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().collect();
    let present_set: HashSet<&str> = present.iter().copied().collect();
    let expected_set: HashSet<&str> = expected.iter().map(|f| f.column).collect();

    let missing = expected
        .iter()
        .filter(|f| !present_set.contains(f.column))
        .map(|f| f.column.to_string())
        .collect();
    let extra = present
        .iter()
        .filter(|h| !expected_set.contains(*h))
        .map(|h| h.to_string())
        .collect();

    HeaderCheck { missing, extra }
}

/// A key consisting only of whitespace counts as blank.
pub fn is_blank_key(key: &str) -> bool {
    key.trim().is_empty()
}

/// Fields whose value is longer (in characters) than the column's advisory maximum.
pub fn oversized_fields<E: CatalogEntity>(record: &E) -> Vec<(&'static FieldSpec, usize)> {
    record
        .fields()
        .into_iter()
        .filter_map(|(spec, value)| {
            let len = value.chars().count();
            (len > spec.max_len).then_some((spec, len))
        })
        .collect()
}

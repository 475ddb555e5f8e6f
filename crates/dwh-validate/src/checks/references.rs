//! Foreign keys that must resolve in another table.

use std::collections::HashSet;

use dwh_model::TableRef;

use crate::issue::Issue;

/// The referenced side of a foreign key.
#[derive(Debug, Clone)]
pub struct KeySet<'a> {
    pub table: TableRef,
    pub column: &'a str,
    pub keys: HashSet<String>,
}

impl<'a> KeySet<'a> {
    pub fn new(
        table: TableRef,
        column: &'a str,
        keys: impl IntoIterator<Item = Option<String>>,
    ) -> Self {
        Self {
            table,
            column,
            keys: keys.into_iter().flatten().collect(),
        }
    }
}

/// Non-null `column` values with no match in `target`.
///
/// Missing required references are errors; optional ones are warnings.
pub fn orphans(
    column: &str,
    values: impl IntoIterator<Item = Option<String>>,
    target: &KeySet<'_>,
    required: bool,
    max_samples: usize,
) -> Option<Issue> {
    let mut count = 0u64;
    let mut samples: Vec<String> = Vec::new();
    for value in values.into_iter().flatten() {
        if target.keys.contains(&value) {
            continue;
        }
        count += 1;
        if samples.len() < max_samples && !samples.contains(&value) {
            samples.push(value);
        }
    }
    if count == 0 {
        return None;
    }
    Some(Issue::OrphanReference {
        column: column.to_string(),
        target: target.table,
        target_column: target.column.to_string(),
        count,
        samples,
        required,
    })
}

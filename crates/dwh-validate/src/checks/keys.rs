//! Null and duplicate natural keys.

use std::collections::BTreeMap;

use crate::issue::Issue;

use super::Samples;

/// Rows whose key is null.
pub fn null_keys(column: &str, nulls: impl IntoIterator<Item = bool>) -> Option<Issue> {
    let count = nulls.into_iter().filter(|is_null| *is_null).count() as u64;
    (count > 0).then(|| Issue::NullKey {
        column: column.to_string(),
        count,
    })
}

/// Non-null keys that appear more than once.
pub fn duplicate_keys(
    column: &str,
    keys: impl IntoIterator<Item = Option<String>>,
    max_samples: usize,
) -> Option<Issue> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    for key in keys.into_iter().flatten() {
        *seen.entry(key).or_default() += 1;
    }
    let mut samples = Samples::new(max_samples);
    for (key, occurrences) in seen {
        if occurrences > 1 {
            samples.push(|| format!("{key} (x{occurrences})"));
        }
    }
    let (count, samples) = samples.finish()?;
    Some(Issue::DuplicateKey {
        column: column.to_string(),
        count,
        samples,
    })
}

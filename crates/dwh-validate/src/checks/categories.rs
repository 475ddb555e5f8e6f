//! Values outside a standardized set.

use std::collections::BTreeSet;

use dwh_model::NOT_AVAILABLE;

use crate::issue::Issue;

/// Raw country codes that should have been expanded.
const COUNTRY_CODES: [&str; 3] = ["DE", "US", "USA"];

/// Values not in `allowed` (exact match).
pub fn unexpected_values<'a>(
    column: &str,
    values: impl IntoIterator<Item = &'a str>,
    allowed: &[&str],
    extensible: bool,
) -> Option<Issue> {
    flag_values(column, values, extensible, |value| !allowed.contains(&value))
}

/// Country names that are blank or still a raw code.
pub fn countries<'a>(column: &str, values: impl IntoIterator<Item = &'a str>) -> Option<Issue> {
    flag_values(column, values, false, |value| {
        value.trim().is_empty()
            || COUNTRY_CODES
                .iter()
                .any(|code| code.eq_ignore_ascii_case(value.trim()))
    })
}

fn flag_values<'a>(
    column: &str,
    values: impl IntoIterator<Item = &'a str>,
    extensible: bool,
    is_invalid: impl Fn(&str) -> bool,
) -> Option<Issue> {
    let mut count = 0u64;
    let mut distinct = BTreeSet::new();
    for value in values {
        if is_invalid(value) {
            count += 1;
            distinct.insert(value.to_string());
        }
    }
    (count > 0).then(|| Issue::UnexpectedCategory {
        column: column.to_string(),
        count,
        values: distinct.into_iter().collect(),
        extensible,
    })
}

/// Allowed values of the category table's maintenance flag.
pub const MAINTENANCE_VALUES: [&str; 3] = ["Yes", "No", NOT_AVAILABLE];

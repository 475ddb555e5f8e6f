//! Date pairs that must not be out of order.

use chrono::NaiveDate;

use crate::issue::Issue;

use super::Samples;

/// Rows where `earlier` falls after `later`. Rows missing either date pass.
pub fn date_order(
    earlier: &str,
    later: &str,
    rows: impl IntoIterator<Item = (String, Option<NaiveDate>, Option<NaiveDate>)>,
    max_samples: usize,
) -> Option<Issue> {
    let mut samples = Samples::new(max_samples);
    for (key, first, second) in rows {
        if let (Some(first), Some(second)) = (first, second)
            && first > second
        {
            samples.push(|| format!("{key}: {first} > {second}"));
        }
    }
    let (count, samples) = samples.finish()?;
    Some(Issue::InvalidDateOrder {
        earlier: earlier.to_string(),
        later: later.to_string(),
        count,
        samples,
    })
}

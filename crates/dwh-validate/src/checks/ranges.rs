//! Plausibility ranges.

use chrono::NaiveDate;

use crate::issue::Issue;

use super::Samples;

/// Birth dates before `min` or after `max`.
pub fn birth_dates(
    column: &str,
    rows: impl IntoIterator<Item = (String, Option<NaiveDate>)>,
    min: NaiveDate,
    max: NaiveDate,
    max_samples: usize,
) -> Option<Issue> {
    let mut samples = Samples::new(max_samples);
    for (key, date) in rows {
        if let Some(date) = date
            && (date < min || date > max)
        {
            samples.push(|| format!("{key}: {date}"));
        }
    }
    let (count, samples) = samples.finish()?;
    Some(Issue::BirthDateOutOfRange {
        column: column.to_string(),
        count,
        samples,
    })
}

//! Surrounding whitespace in text columns.

use crate::issue::Issue;

use super::Samples;

pub fn untrimmed<'a>(
    column: &str,
    values: impl IntoIterator<Item = Option<&'a str>>,
    max_samples: usize,
) -> Option<Issue> {
    let mut samples = Samples::new(max_samples);
    for value in values.into_iter().flatten() {
        if value.trim() != value {
            samples.push(|| format!("{value:?}"));
        }
    }
    let (count, samples) = samples.finish()?;
    Some(Issue::UntrimmedText {
        column: column.to_string(),
        count,
        samples,
    })
}

//! Integer-encoded calendar dates.

use chrono::NaiveDate;

/// Convert a `YYYYMMDD` integer to a date.
///
/// Only values with exactly eight decimal digits that name a real calendar
/// day convert; everything else (zero, negatives, short or long codes,
/// `20240230`) is `None`.
pub fn date_from_code(code: i64) -> Option<NaiveDate> {
    if !(10_000_000..=99_999_999).contains(&code) {
        return None;
    }
    let year = i32::try_from(code / 10_000).ok()?;
    let month = u32::try_from((code / 100) % 100).ok()?;
    let day = u32::try_from(code % 100).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

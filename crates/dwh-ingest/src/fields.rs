//! Lenient positional field parsing.
//!
//! A cell is `None` when it is empty or does not parse as the column type.
//! Parse failures are counted so the load log can report them; they never
//! abort the row or the batch.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Walks the cells of one row in column order.
#[derive(Debug)]
pub struct FieldCursor<'a> {
    fields: &'a [String],
    position: usize,
    coerced: Vec<usize>,
}

impl<'a> FieldCursor<'a> {
    pub fn new(fields: &'a [String]) -> Self {
        Self {
            fields,
            position: 0,
            coerced: Vec::new(),
        }
    }

    /// Column indexes whose value was discarded because it did not parse.
    pub fn coerced(&self) -> &[usize] {
        &self.coerced
    }

    fn next_raw(&mut self) -> Option<&'a str> {
        let value = self.fields.get(self.position).map(String::as_str);
        self.position += 1;
        value.filter(|v| !v.is_empty())
    }

    fn coerce<T>(&mut self, raw: &str, parsed: Option<T>) -> Option<T> {
        if parsed.is_none() && !raw.trim().is_empty() {
            self.coerced.push(self.position - 1);
        }
        parsed
    }

    /// Text cell, kept exactly as read.
    pub fn text(&mut self) -> Option<String> {
        self.next_raw().map(str::to_string)
    }

    pub fn int(&mut self) -> Option<i64> {
        let raw = self.next_raw()?;
        let parsed = parse_int(raw);
        self.coerce(raw, parsed)
    }

    pub fn date(&mut self) -> Option<NaiveDate> {
        let raw = self.next_raw()?;
        let parsed = parse_date(raw);
        self.coerce(raw, parsed)
    }

    pub fn datetime(&mut self) -> Option<NaiveDateTime> {
        let raw = self.next_raw()?;
        let parsed = parse_datetime(raw);
        self.coerce(raw, parsed)
    }
}

pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// `YYYY-MM-DD`, or the date part of a datetime.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .or_else(|| parse_datetime(trimmed).map(|dt| dt.date()))
}

/// A datetime, or a bare date at midnight.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn text_is_not_trimmed() {
        let fields = row(&["  Jon ", ""]);
        let mut cursor = FieldCursor::new(&fields);
        assert_eq!(cursor.text().as_deref(), Some("  Jon "));
        assert_eq!(cursor.text(), None);
        assert_eq!(cursor.text(), None);
    }

    #[test]
    fn malformed_values_become_none_and_are_counted() {
        let fields = row(&["12x", "2025-02-30", "", " 42 "]);
        let mut cursor = FieldCursor::new(&fields);
        assert_eq!(cursor.int(), None);
        assert_eq!(cursor.date(), None);
        assert_eq!(cursor.int(), None);
        assert_eq!(cursor.int(), Some(42));
        assert_eq!(cursor.coerced(), &[0, 1]);
    }

    #[test]
    fn datetime_accepts_bare_dates() {
        let expected = NaiveDate::from_ymd_opt(2011, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_datetime("2011-07-01"), Some(expected));
        assert_eq!(parse_datetime("2011-07-01 00:00:00"), Some(expected));
        assert_eq!(parse_datetime("2011-07-01T00:00:00.000"), Some(expected));
    }

    #[test]
    fn date_accepts_datetime_input() {
        assert_eq!(
            parse_date("2020-01-05 13:45:00"),
            NaiveDate::from_ymd_opt(2020, 1, 5)
        );
    }
}

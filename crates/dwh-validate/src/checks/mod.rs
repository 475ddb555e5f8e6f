//! Validation check modules.
//!
//! Each module performs one kind of check and returns `Option<Issue>`, with
//! `None` meaning the check passed.

pub mod amounts;
pub mod categories;
pub mod chronology;
pub mod keys;
pub mod ranges;
pub mod references;
pub mod text;

/// Counts violations and keeps the first few as samples.
#[derive(Debug, Clone)]
pub(crate) struct Samples {
    count: u64,
    samples: Vec<String>,
    max: usize,
}

impl Samples {
    pub(crate) fn new(max: usize) -> Self {
        Self {
            count: 0,
            samples: Vec::new(),
            max,
        }
    }

    pub(crate) fn push(&mut self, sample: impl FnOnce() -> String) {
        self.count += 1;
        if self.samples.len() < self.max {
            self.samples.push(sample());
        }
    }

    /// `(count, samples)` if anything was recorded.
    pub(crate) fn finish(self) -> Option<(u64, Vec<String>)> {
        (self.count > 0).then_some((self.count, self.samples))
    }
}

/// Render an optional value for a sample, `NULL` when missing.
pub(crate) fn display_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "NULL".to_string(), |v| v.to_string())
}

//! Quality issue types.
//!
//! Each variant carries only the data it needs; rule ids, categories,
//! severities and messages are derived from the variant.

use std::fmt;

use dwh_model::TableRef;
use serde::{Deserialize, Serialize};

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Invariant of the silver layer is broken.
    Error,
    /// Worth reviewing; the data may still be usable.
    Warning,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Key,
    Format,
    Terminology,
    Chronology,
    Consistency,
    Range,
    Reference,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::Key => "Key",
            Self::Format => "Format",
            Self::Terminology => "Terminology",
            Self::Chronology => "Chronology",
            Self::Consistency => "Consistency",
            Self::Range => "Range",
            Self::Reference => "Reference",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One quality finding; `samples` hold a few offending keys or values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    // Key checks
    /// Natural key is null.
    NullKey { column: String, count: u64 },
    /// Natural key appears more than once.
    DuplicateKey {
        column: String,
        count: u64,
        samples: Vec<String>,
    },

    // Format checks
    /// Text has leading or trailing whitespace.
    UntrimmedText {
        column: String,
        count: u64,
        samples: Vec<String>,
    },

    // Terminology checks
    /// Categorical value outside its standardized set.
    UnexpectedCategory {
        column: String,
        count: u64,
        values: Vec<String>,
        extensible: bool,
    },

    // Chronology checks
    /// A date that should not follow another does.
    InvalidDateOrder {
        earlier: String,
        later: String,
        count: u64,
        samples: Vec<String>,
    },

    // Consistency checks
    /// Sales amount missing, not positive, or not quantity times price.
    SalesInconsistent { count: u64, samples: Vec<String> },
    /// Quantity or price missing or not positive.
    NonPositiveAmount {
        column: String,
        count: u64,
        samples: Vec<String>,
    },
    /// Product cost below zero.
    NegativeCost { count: u64, samples: Vec<String> },

    // Range checks
    /// Birth date before the plausible minimum or after the reference date.
    BirthDateOutOfRange {
        column: String,
        count: u64,
        samples: Vec<String>,
    },

    // Reference checks
    /// Foreign key with no match in the referenced table.
    OrphanReference {
        column: String,
        target: TableRef,
        target_column: String,
        count: u64,
        samples: Vec<String>,
        required: bool,
    },
}

impl Issue {
    pub fn rule_id(&self) -> &'static str {
        match self {
            Issue::NullKey { .. } => "DQ001",
            Issue::DuplicateKey { .. } => "DQ002",
            Issue::UntrimmedText { .. } => "DQ010",
            Issue::UnexpectedCategory {
                extensible: false, ..
            } => "DQ020",
            Issue::UnexpectedCategory {
                extensible: true, ..
            } => "DQ021",
            Issue::InvalidDateOrder { .. } => "DQ030",
            Issue::SalesInconsistent { .. } => "DQ040",
            Issue::NonPositiveAmount { .. } => "DQ041",
            Issue::NegativeCost { .. } => "DQ042",
            Issue::BirthDateOutOfRange { .. } => "DQ050",
            Issue::OrphanReference { required: true, .. } => "DQ060",
            Issue::OrphanReference {
                required: false, ..
            } => "DQ061",
        }
    }

    /// Column the issue was found in.
    pub fn column(&self) -> String {
        match self {
            Issue::NullKey { column, .. }
            | Issue::DuplicateKey { column, .. }
            | Issue::UntrimmedText { column, .. }
            | Issue::UnexpectedCategory { column, .. }
            | Issue::NonPositiveAmount { column, .. }
            | Issue::BirthDateOutOfRange { column, .. }
            | Issue::OrphanReference { column, .. } => column.clone(),
            Issue::InvalidDateOrder { earlier, later, .. } => format!("{earlier}/{later}"),
            Issue::SalesInconsistent { .. } => "sls_sales".to_string(),
            Issue::NegativeCost { .. } => "prd_cost".to_string(),
        }
    }

    pub fn count(&self) -> u64 {
        match self {
            Issue::NullKey { count, .. }
            | Issue::DuplicateKey { count, .. }
            | Issue::UntrimmedText { count, .. }
            | Issue::UnexpectedCategory { count, .. }
            | Issue::InvalidDateOrder { count, .. }
            | Issue::SalesInconsistent { count, .. }
            | Issue::NonPositiveAmount { count, .. }
            | Issue::NegativeCost { count, .. }
            | Issue::BirthDateOutOfRange { count, .. }
            | Issue::OrphanReference { count, .. } => *count,
        }
    }

    pub fn samples(&self) -> &[String] {
        match self {
            Issue::NullKey { .. } => &[],
            Issue::UnexpectedCategory { values, .. } => values,
            Issue::DuplicateKey { samples, .. }
            | Issue::UntrimmedText { samples, .. }
            | Issue::InvalidDateOrder { samples, .. }
            | Issue::SalesInconsistent { samples, .. }
            | Issue::NonPositiveAmount { samples, .. }
            | Issue::NegativeCost { samples, .. }
            | Issue::BirthDateOutOfRange { samples, .. }
            | Issue::OrphanReference { samples, .. } => samples,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Issue::NullKey { .. } | Issue::DuplicateKey { .. } => Category::Key,
            Issue::UntrimmedText { .. } => Category::Format,
            Issue::UnexpectedCategory { .. } => Category::Terminology,
            Issue::InvalidDateOrder { .. } => Category::Chronology,
            Issue::SalesInconsistent { .. }
            | Issue::NonPositiveAmount { .. }
            | Issue::NegativeCost { .. } => Category::Consistency,
            Issue::BirthDateOutOfRange { .. } => Category::Range,
            Issue::OrphanReference { .. } => Category::Reference,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Issue::UnexpectedCategory {
                extensible: true, ..
            }
            | Issue::NonPositiveAmount { .. }
            | Issue::BirthDateOutOfRange { .. }
            | Issue::OrphanReference {
                required: false, ..
            } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Issue::NullKey { column, count } => {
                format!("{count} row(s) have a null {column}")
            }
            Issue::DuplicateKey { column, count, .. } => {
                format!("{count} {column} value(s) occur more than once")
            }
            Issue::UntrimmedText { column, count, .. } => {
                format!("{count} {column} value(s) have surrounding whitespace")
            }
            Issue::UnexpectedCategory { column, count, .. } => {
                format!("{count} row(s) have a non-standard {column}")
            }
            Issue::InvalidDateOrder {
                earlier,
                later,
                count,
                ..
            } => format!("{count} row(s) have {earlier} after {later}"),
            Issue::SalesInconsistent { count, .. } => format!(
                "{count} row(s) have sales missing, not positive, or not quantity × price"
            ),
            Issue::NonPositiveAmount { column, count, .. } => {
                format!("{count} row(s) have {column} missing or not positive")
            }
            Issue::NegativeCost { count, .. } => {
                format!("{count} product(s) have a negative cost")
            }
            Issue::BirthDateOutOfRange { column, count, .. } => {
                format!("{count} row(s) have an implausible {column}")
            }
            Issue::OrphanReference {
                column,
                target,
                target_column,
                count,
                ..
            } => format!("{count} {column} value(s) have no match in {target}.{target_column}"),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule_id(), self.message())
    }
}

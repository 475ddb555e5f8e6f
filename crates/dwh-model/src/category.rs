//! Standardized categorical values carried by silver records.
//!
//! Every enumeration has a `NotAvailable` member rendered as `n/a`, which is
//! where unmapped or blank source codes land.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Literal used for unknown or blank categorical values.
pub const NOT_AVAILABLE: &str = "n/a";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaritalStatus {
    Married,
    Single,
    #[default]
    #[serde(rename = "n/a")]
    NotAvailable,
}

impl MaritalStatus {
    pub const ALL: [Self; 3] = [Self::Married, Self::Single, Self::NotAvailable];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Married => "Married",
            Self::Single => "Single",
            Self::NotAvailable => NOT_AVAILABLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[default]
    #[serde(rename = "n/a")]
    NotAvailable,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::NotAvailable];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::NotAvailable => NOT_AVAILABLE,
        }
    }
}

/// Product line, expanded from the single-letter CRM code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProductLine {
    Mountain,
    Road,
    #[serde(rename = "Other Sales")]
    OtherSales,
    Touring,
    #[default]
    #[serde(rename = "n/a")]
    NotAvailable,
}

impl ProductLine {
    pub const ALL: [Self; 5] = [
        Self::Mountain,
        Self::Road,
        Self::OtherSales,
        Self::Touring,
        Self::NotAvailable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mountain => "Mountain",
            Self::Road => "Road",
            Self::OtherSales => "Other Sales",
            Self::Touring => "Touring",
            Self::NotAvailable => NOT_AVAILABLE,
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display!(MaritalStatus, Gender, ProductLine);

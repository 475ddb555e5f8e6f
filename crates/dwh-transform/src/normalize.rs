//! Field normalization: trimming and categorical code tables.

use dwh_model::{Gender, MaritalStatus, NOT_AVAILABLE, ProductLine};

/// Explicit mapping from source codes to a standardized value.
///
/// Codes match case-insensitively after trimming. Anything unmapped,
/// blank or missing resolves to the table's default.
#[derive(Debug, Clone, Copy)]
pub struct CodeTable<T: Copy + 'static> {
    entries: &'static [(&'static str, T)],
    default: T,
}

impl<T: Copy + 'static> CodeTable<T> {
    pub const fn new(entries: &'static [(&'static str, T)], default: T) -> Self {
        Self { entries, default }
    }

    /// Mapped value, if the code is present in the table.
    pub fn find(&self, raw: Option<&str>) -> Option<T> {
        let code = raw.map(str::trim).filter(|code| !code.is_empty())?;
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(code))
            .map(|(_, value)| *value)
    }

    pub fn lookup(&self, raw: Option<&str>) -> T {
        self.find(raw).unwrap_or(self.default)
    }
}

pub const MARITAL_STATUS: CodeTable<MaritalStatus> = CodeTable::new(
    &[("S", MaritalStatus::Single), ("M", MaritalStatus::Married)],
    MaritalStatus::NotAvailable,
);

/// CRM gender codes.
pub const CUSTOMER_GENDER: CodeTable<Gender> = CodeTable::new(
    &[("F", Gender::Female), ("M", Gender::Male)],
    Gender::NotAvailable,
);

/// ERP gender codes, which also spell the value out.
pub const DEMOGRAPHIC_GENDER: CodeTable<Gender> = CodeTable::new(
    &[
        ("F", Gender::Female),
        ("FEMALE", Gender::Female),
        ("M", Gender::Male),
        ("MALE", Gender::Male),
    ],
    Gender::NotAvailable,
);

pub const PRODUCT_LINE: CodeTable<ProductLine> = CodeTable::new(
    &[
        ("M", ProductLine::Mountain),
        ("R", ProductLine::Road),
        ("S", ProductLine::OtherSales),
        ("T", ProductLine::Touring),
    ],
    ProductLine::NotAvailable,
);

pub const COUNTRY_CODES: CodeTable<&'static str> = CodeTable::new(
    &[
        ("DE", "Germany"),
        ("US", "United States"),
        ("USA", "United States"),
    ],
    NOT_AVAILABLE,
);

/// Trim surrounding whitespace; blank text becomes `None`.
pub fn trim_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Expand a country code to its full name.
///
/// Known codes expand, blank or missing values become `n/a`, and any other
/// value is kept trimmed.
pub fn country_name(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    match COUNTRY_CODES.find(Some(trimmed)) {
        Some(name) => name.to_string(),
        None => trimmed.to_string(),
    }
}

/// Strip a leading prefix, ignoring ASCII case.
pub fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> &'a str {
    match value.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &value[prefix.len()..],
        _ => value,
    }
}

/// Category id and sales key carved out of a composite CRM product key.
///
/// `CO-RF-FR-R92B-58` yields `CO_RF` and `FR-R92B-58`.
pub fn split_product_key(raw: &str) -> (Option<String>, Option<String>) {
    let category: String = raw
        .chars()
        .take(5)
        .map(|ch| if ch == '-' { '_' } else { ch })
        .collect();
    let sales_key: String = raw.chars().skip(6).collect();
    (
        Some(category).filter(|v| !v.is_empty()),
        Some(sales_key).filter(|v| !v.is_empty()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_trimmed() {
        assert_eq!(MARITAL_STATUS.lookup(Some(" m ")), MaritalStatus::Married);
        assert_eq!(DEMOGRAPHIC_GENDER.lookup(Some("female")), Gender::Female);
        assert_eq!(PRODUCT_LINE.lookup(Some("s")), ProductLine::OtherSales);
    }

    #[test]
    fn unmapped_values_degrade_to_default() {
        assert_eq!(MARITAL_STATUS.lookup(Some("D")), MaritalStatus::NotAvailable);
        assert_eq!(CUSTOMER_GENDER.lookup(Some("")), Gender::NotAvailable);
        assert_eq!(CUSTOMER_GENDER.lookup(None), Gender::NotAvailable);
        assert_eq!(CUSTOMER_GENDER.lookup(Some("FEMALE")), Gender::NotAvailable);
    }

    #[test]
    fn countries() {
        assert_eq!(country_name(Some("US")), "United States");
        assert_eq!(country_name(Some("usa ")), "United States");
        assert_eq!(country_name(Some("DE")), "Germany");
        assert_eq!(country_name(Some("")), "n/a");
        assert_eq!(country_name(Some("   ")), "n/a");
        assert_eq!(country_name(None), "n/a");
        assert_eq!(country_name(Some(" Australia ")), "Australia");
    }

    #[test]
    fn trim_text_blank_is_none() {
        assert_eq!(trim_text(Some("  Bob ")).as_deref(), Some("Bob"));
        assert_eq!(trim_text(Some("   ")), None);
        assert_eq!(trim_text(None), None);
    }

    #[test]
    fn prefix_strip() {
        assert_eq!(strip_prefix_ignore_case("NASAW00011000", "NAS"), "AW00011000");
        assert_eq!(strip_prefix_ignore_case("nasAW1", "NAS"), "AW1");
        assert_eq!(strip_prefix_ignore_case("AW00011000", "NAS"), "AW00011000");
        assert_eq!(strip_prefix_ignore_case("NA", "NAS"), "NA");
    }

    #[test]
    fn product_key_split() {
        let (category, sales_key) = split_product_key("CO-RF-FR-R92B-58");
        assert_eq!(category.as_deref(), Some("CO_RF"));
        assert_eq!(sales_key.as_deref(), Some("FR-R92B-58"));

        let (category, sales_key) = split_product_key("AC-HE");
        assert_eq!(category.as_deref(), Some("AC_HE"));
        assert_eq!(sales_key, None);
    }
}

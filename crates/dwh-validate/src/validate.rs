//! Run every check against a silver snapshot.

use chrono::NaiveDate;
use dwh_model::{
    Record, SilverCategory, SilverCustomer, SilverCustomerDemographic, SilverLocation,
    SilverProduct, SilverSalesDetail,
};
use tracing::{debug, info_span};

use crate::checks::categories::{MAINTENANCE_VALUES, countries, unexpected_values};
use crate::checks::references::{KeySet, orphans};
use crate::checks::{amounts, chronology, display_opt, keys, ranges, text};
use crate::report::QualityReport;
use crate::snapshot::SilverSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Birth dates after this day are implausible.
    pub reference_date: NaiveDate,
    /// Birth dates before this day are implausible.
    pub min_birth_date: NaiveDate,
    /// Offending values kept per issue.
    pub max_samples: usize,
}

impl ValidationOptions {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            min_birth_date: NaiveDate::from_ymd_opt(1924, 1, 1).unwrap_or(NaiveDate::MIN),
            max_samples: 5,
        }
    }

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }
}

/// One report per silver table, in load order.
pub fn validate_silver(snapshot: &SilverSnapshot, options: &ValidationOptions) -> Vec<QualityReport> {
    let _span = info_span!("validate_silver").entered();
    let reports = vec![
        check_customers(snapshot, options),
        check_products(snapshot, options),
        check_sales(snapshot, options),
        check_demographics(snapshot, options),
        check_locations(snapshot, options),
        check_categories(snapshot, options),
    ];
    for report in &reports {
        debug!(
            table = %report.table,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "checked table"
        );
    }
    reports
}

fn check_customers(snapshot: &SilverSnapshot, options: &ValidationOptions) -> QualityReport {
    let rows = &snapshot.customers;
    let max = options.max_samples;
    let mut report = QualityReport::new(SilverCustomer::TABLE);
    report.extend(keys::duplicate_keys(
        "cst_id",
        rows.iter().map(|r| Some(r.cst_id.to_string())),
        max,
    ));
    report.extend(keys::null_keys("cst_key", rows.iter().map(|r| r.cst_key.is_none())));
    report.extend(text::untrimmed("cst_key", rows.iter().map(|r| r.cst_key.as_deref()), max));
    report.extend(text::untrimmed(
        "cst_firstname",
        rows.iter().map(|r| r.cst_firstname.as_deref()),
        max,
    ));
    report.extend(text::untrimmed(
        "cst_lastname",
        rows.iter().map(|r| r.cst_lastname.as_deref()),
        max,
    ));

    let demographics = KeySet::new(
        SilverCustomerDemographic::TABLE,
        "cid",
        snapshot.demographics.iter().map(|r| r.cid.clone()),
    );
    report.extend(orphans(
        "cst_key",
        rows.iter().map(|r| r.cst_key.clone()),
        &demographics,
        false,
        max,
    ));
    let locations = KeySet::new(
        SilverLocation::TABLE,
        "cid",
        snapshot.locations.iter().map(|r| r.cid.clone()),
    );
    report.extend(orphans(
        "cst_key",
        rows.iter().map(|r| r.cst_key.clone()),
        &locations,
        false,
        max,
    ));
    report
}

fn check_products(snapshot: &SilverSnapshot, options: &ValidationOptions) -> QualityReport {
    let rows = &snapshot.products;
    let max = options.max_samples;
    let mut report = QualityReport::new(SilverProduct::TABLE);
    report.extend(keys::null_keys("prd_id", rows.iter().map(|r| r.prd_id.is_none())));
    report.extend(keys::duplicate_keys(
        "prd_id",
        rows.iter().map(|r| r.prd_id.map(|id| id.to_string())),
        max,
    ));
    report.extend(text::untrimmed("prd_key", rows.iter().map(|r| r.prd_key.as_deref()), max));
    report.extend(text::untrimmed("prd_nm", rows.iter().map(|r| r.prd_nm.as_deref()), max));
    report.extend(amounts::negative_cost(rows, max));
    report.extend(chronology::date_order(
        "prd_start_dt",
        "prd_end_dt",
        rows.iter().map(|r| (display_opt(r.prd_id), r.prd_start_dt, r.prd_end_dt)),
        max,
    ));

    let categories = KeySet::new(
        SilverCategory::TABLE,
        "id",
        snapshot.categories.iter().map(|r| r.id.clone()),
    );
    report.extend(orphans(
        "cat_id",
        rows.iter().map(|r| r.cat_id.clone()),
        &categories,
        false,
        max,
    ));
    report
}

fn check_sales(snapshot: &SilverSnapshot, options: &ValidationOptions) -> QualityReport {
    let rows = &snapshot.sales;
    let max = options.max_samples;
    let mut report = QualityReport::new(SilverSalesDetail::TABLE);
    report.extend(keys::null_keys(
        "sls_ord_num",
        rows.iter().map(|r| r.sls_ord_num.is_none()),
    ));
    report.extend(keys::duplicate_keys(
        "sls_ord_num/sls_prd_key/sls_cust_id",
        rows.iter().map(|r| {
            Some(format!(
                "{}/{}/{}",
                display_opt(r.sls_ord_num.as_deref()),
                display_opt(r.sls_prd_key.as_deref()),
                display_opt(r.sls_cust_id)
            ))
        }),
        max,
    ));
    report.extend(text::untrimmed(
        "sls_ord_num",
        rows.iter().map(|r| r.sls_ord_num.as_deref()),
        max,
    ));
    report.extend(text::untrimmed(
        "sls_prd_key",
        rows.iter().map(|r| r.sls_prd_key.as_deref()),
        max,
    ));

    let label = |r: &SilverSalesDetail| display_opt(r.sls_ord_num.as_deref());
    report.extend(chronology::date_order(
        "sls_order_dt",
        "sls_ship_dt",
        rows.iter().map(|r| (label(r), r.sls_order_dt, r.sls_ship_dt)),
        max,
    ));
    report.extend(chronology::date_order(
        "sls_order_dt",
        "sls_due_dt",
        rows.iter().map(|r| (label(r), r.sls_order_dt, r.sls_due_dt)),
        max,
    ));
    report.extend(chronology::date_order(
        "sls_ship_dt",
        "sls_due_dt",
        rows.iter().map(|r| (label(r), r.sls_ship_dt, r.sls_due_dt)),
        max,
    ));

    report.extend(amounts::sales_consistency(rows, max));
    report.extend(amounts::non_positive("sls_quantity", rows, |r| r.sls_quantity, max));
    report.extend(amounts::non_positive("sls_price", rows, |r| r.sls_price, max));

    let products = KeySet::new(
        SilverProduct::TABLE,
        "prd_key",
        snapshot.products.iter().map(|r| r.prd_key.clone()),
    );
    report.extend(orphans(
        "sls_prd_key",
        rows.iter().map(|r| r.sls_prd_key.clone()),
        &products,
        true,
        max,
    ));
    let customers = KeySet::new(
        SilverCustomer::TABLE,
        "cst_id",
        snapshot.customers.iter().map(|r| Some(r.cst_id.to_string())),
    );
    report.extend(orphans(
        "sls_cust_id",
        rows.iter().map(|r| r.sls_cust_id.map(|id| id.to_string())),
        &customers,
        true,
        max,
    ));
    report
}

fn check_demographics(snapshot: &SilverSnapshot, options: &ValidationOptions) -> QualityReport {
    let rows = &snapshot.demographics;
    let max = options.max_samples;
    let mut report = QualityReport::new(SilverCustomerDemographic::TABLE);
    report.extend(keys::null_keys("cid", rows.iter().map(|r| r.cid.is_none())));
    report.extend(keys::duplicate_keys("cid", rows.iter().map(|r| r.cid.clone()), max));
    report.extend(text::untrimmed("cid", rows.iter().map(|r| r.cid.as_deref()), max));
    report.extend(ranges::birth_dates(
        "bdate",
        rows.iter().map(|r| (display_opt(r.cid.as_deref()), r.bdate)),
        options.min_birth_date,
        options.reference_date,
        max,
    ));
    report
}

fn check_locations(snapshot: &SilverSnapshot, options: &ValidationOptions) -> QualityReport {
    let rows = &snapshot.locations;
    let max = options.max_samples;
    let mut report = QualityReport::new(SilverLocation::TABLE);
    report.extend(keys::null_keys("cid", rows.iter().map(|r| r.cid.is_none())));
    report.extend(keys::duplicate_keys("cid", rows.iter().map(|r| r.cid.clone()), max));
    report.extend(text::untrimmed("cid", rows.iter().map(|r| r.cid.as_deref()), max));
    report.extend(text::untrimmed("cntry", rows.iter().map(|r| Some(r.cntry.as_str())), max));
    report.extend(countries("cntry", rows.iter().map(|r| r.cntry.as_str())));
    report
}

fn check_categories(snapshot: &SilverSnapshot, options: &ValidationOptions) -> QualityReport {
    let rows = &snapshot.categories;
    let max = options.max_samples;
    let mut report = QualityReport::new(SilverCategory::TABLE);
    report.extend(keys::null_keys("id", rows.iter().map(|r| r.id.is_none())));
    report.extend(keys::duplicate_keys("id", rows.iter().map(|r| r.id.clone()), max));
    report.extend(text::untrimmed("id", rows.iter().map(|r| r.id.as_deref()), max));
    report.extend(text::untrimmed("cat", rows.iter().map(|r| r.cat.as_deref()), max));
    report.extend(text::untrimmed("subcat", rows.iter().map(|r| r.subcat.as_deref()), max));
    report.extend(text::untrimmed(
        "maintenance",
        rows.iter().map(|r| r.maintenance.as_deref()),
        max,
    ));
    report.extend(unexpected_values(
        "maintenance",
        rows.iter().filter_map(|r| r.maintenance.as_deref()),
        &MAINTENANCE_VALUES,
        true,
    ));
    report
}

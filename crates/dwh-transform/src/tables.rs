//! One transform per silver table.

use chrono::NaiveDate;
use dwh_model::{
    BronzeCategory, BronzeCustomer, BronzeCustomerDemographic, BronzeLocation, BronzeProduct,
    BronzeSalesDetail, Record, SilverCategory, SilverCustomer, SilverCustomerDemographic,
    SilverLocation, SilverProduct, SilverSalesDetail, TableId,
};
use tracing::debug;

use crate::dates::date_from_code;
use crate::dedupe::latest_per_key;
use crate::derive::{SalesAmounts, derive_end_dates, reconcile_sales};
use crate::normalize::{
    CUSTOMER_GENDER, DEMOGRAPHIC_GENDER, MARITAL_STATUS, PRODUCT_LINE, country_name,
    split_product_key, strip_prefix_ignore_case, trim_text,
};

/// Values shared by every transform of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformContext {
    /// Dates after this day are treated as being in the future.
    pub reference_date: NaiveDate,
}

impl TransformContext {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }
}

/// Turns the full bronze contents of a table into its silver contents.
pub trait TableTransform {
    type Input: Record;
    type Output: Record;

    fn table(&self) -> TableId {
        <Self::Output as Record>::TABLE.table
    }

    fn transform(&self, rows: Vec<Self::Input>, ctx: &TransformContext) -> Vec<Self::Output>;
}

/// Customers: trimmed names, expanded codes, latest record per id.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerTransform;

impl TableTransform for CustomerTransform {
    type Input = BronzeCustomer;
    type Output = SilverCustomer;

    fn transform(&self, rows: Vec<BronzeCustomer>, _ctx: &TransformContext) -> Vec<SilverCustomer> {
        let outcome = latest_per_key(rows, |row| row.cst_id, |row| row.cst_create_date);
        debug!(
            null_keys = outcome.null_keys,
            superseded = outcome.superseded,
            "deduplicated customers"
        );
        outcome
            .rows
            .into_iter()
            .filter_map(|row| {
                Some(SilverCustomer {
                    cst_id: row.cst_id?,
                    cst_key: trim_text(row.cst_key.as_deref()),
                    cst_firstname: trim_text(row.cst_firstname.as_deref()),
                    cst_lastname: trim_text(row.cst_lastname.as_deref()),
                    cst_marital_status: MARITAL_STATUS.lookup(row.cst_marital_status.as_deref()),
                    cst_gndr: CUSTOMER_GENDER.lookup(row.cst_gndr.as_deref()),
                    cst_create_date: row.cst_create_date,
                })
            })
            .collect()
    }
}

/// Products: split composite key, default cost, expand line, derive end dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductTransform;

impl TableTransform for ProductTransform {
    type Input = BronzeProduct;
    type Output = SilverProduct;

    fn transform(&self, rows: Vec<BronzeProduct>, _ctx: &TransformContext) -> Vec<SilverProduct> {
        let products = rows
            .into_iter()
            .map(|row| {
                let raw_key = row.prd_key.as_deref().map(str::trim).unwrap_or_default();
                let (cat_id, prd_key) = split_product_key(raw_key);
                let prd_cost = match row.prd_cost {
                    Some(cost) if cost >= 0 => cost,
                    Some(cost) => {
                        debug!(prd_id = ?row.prd_id, cost, "negative product cost set to 0");
                        0
                    }
                    None => 0,
                };
                SilverProduct {
                    prd_id: row.prd_id,
                    cat_id,
                    prd_key,
                    prd_nm: trim_text(row.prd_nm.as_deref()),
                    prd_cost,
                    prd_line: PRODUCT_LINE.lookup(row.prd_line.as_deref()),
                    prd_start_dt: row.prd_start_dt.map(|start| start.date()),
                    prd_end_dt: None,
                }
            })
            .collect();
        derive_end_dates(
            products,
            |product| product.prd_key.clone(),
            |product| product.prd_start_dt,
            |product, end| product.prd_end_dt = end,
        )
    }
}

/// Sales details: decode date codes and reconcile amounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalesTransform;

impl TableTransform for SalesTransform {
    type Input = BronzeSalesDetail;
    type Output = SilverSalesDetail;

    fn transform(
        &self,
        rows: Vec<BronzeSalesDetail>,
        _ctx: &TransformContext,
    ) -> Vec<SilverSalesDetail> {
        rows.into_iter()
            .map(|row| {
                let amounts = reconcile_sales(SalesAmounts::new(
                    row.sls_sales,
                    row.sls_quantity,
                    row.sls_price,
                ));
                SilverSalesDetail {
                    sls_ord_num: trim_text(row.sls_ord_num.as_deref()),
                    sls_prd_key: trim_text(row.sls_prd_key.as_deref()),
                    sls_cust_id: row.sls_cust_id,
                    sls_order_dt: row.sls_order_dt.and_then(date_from_code),
                    sls_ship_dt: row.sls_ship_dt.and_then(date_from_code),
                    sls_due_dt: row.sls_due_dt.and_then(date_from_code),
                    sls_sales: amounts.sales,
                    sls_quantity: amounts.quantity,
                    sls_price: amounts.price,
                }
            })
            .collect()
    }
}

/// ERP demographics: strip the `NAS` key prefix, null future birth dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemographicTransform;

impl TableTransform for DemographicTransform {
    type Input = BronzeCustomerDemographic;
    type Output = SilverCustomerDemographic;

    fn transform(
        &self,
        rows: Vec<BronzeCustomerDemographic>,
        ctx: &TransformContext,
    ) -> Vec<SilverCustomerDemographic> {
        rows.into_iter()
            .map(|row| SilverCustomerDemographic {
                cid: row
                    .cid
                    .as_deref()
                    .and_then(|cid| trim_text(Some(strip_prefix_ignore_case(cid.trim(), "NAS")))),
                bdate: row.bdate.filter(|bdate| *bdate <= ctx.reference_date),
                r#gen: DEMOGRAPHIC_GENDER.lookup(row.r#gen.as_deref()),
            })
            .collect()
    }
}

/// ERP locations: hyphen-free keys, full country names.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationTransform;

impl TableTransform for LocationTransform {
    type Input = BronzeLocation;
    type Output = SilverLocation;

    fn transform(&self, rows: Vec<BronzeLocation>, _ctx: &TransformContext) -> Vec<SilverLocation> {
        rows.into_iter()
            .map(|row| SilverLocation {
                cid: trim_text(row.cid.map(|cid| cid.replace('-', "")).as_deref()),
                cntry: country_name(row.cntry.as_deref()),
            })
            .collect()
    }
}

/// ERP product categories are copied unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryTransform;

impl TableTransform for CategoryTransform {
    type Input = BronzeCategory;
    type Output = SilverCategory;

    fn transform(&self, rows: Vec<BronzeCategory>, _ctx: &TransformContext) -> Vec<SilverCategory> {
        rows.into_iter()
            .map(|row| SilverCategory {
                id: row.id,
                cat: row.cat,
                subcat: row.subcat,
                maintenance: row.maintenance,
            })
            .collect()
    }
}

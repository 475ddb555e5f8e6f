//! Cleaned, standardized records of the silver layer.
//!
//! Field names match the bronze column names (plus the derived `cat_id`)
//! because reporting views join on them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::{Gender, MaritalStatus, ProductLine};
use crate::record::Record;
use crate::table::{TableId, TableRef};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilverCustomer {
    pub cst_id: i64,
    pub cst_key: Option<String>,
    pub cst_firstname: Option<String>,
    pub cst_lastname: Option<String>,
    pub cst_marital_status: MaritalStatus,
    pub cst_gndr: Gender,
    pub cst_create_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilverProduct {
    pub prd_id: Option<i64>,
    /// Category id, the first five characters of the raw key with `-` as `_`.
    pub cat_id: Option<String>,
    /// Sales key, the raw key from its seventh character on.
    pub prd_key: Option<String>,
    pub prd_nm: Option<String>,
    pub prd_cost: i64,
    pub prd_line: ProductLine,
    pub prd_start_dt: Option<NaiveDate>,
    pub prd_end_dt: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilverSalesDetail {
    pub sls_ord_num: Option<String>,
    pub sls_prd_key: Option<String>,
    pub sls_cust_id: Option<i64>,
    pub sls_order_dt: Option<NaiveDate>,
    pub sls_ship_dt: Option<NaiveDate>,
    pub sls_due_dt: Option<NaiveDate>,
    pub sls_sales: Option<i64>,
    pub sls_quantity: Option<i64>,
    pub sls_price: Option<i64>,
}

/// Natural key of a sales line.
pub type SalesKey = (Option<String>, Option<String>, Option<i64>);

impl SilverSalesDetail {
    pub fn natural_key(&self) -> SalesKey {
        (
            self.sls_ord_num.clone(),
            self.sls_prd_key.clone(),
            self.sls_cust_id,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilverCustomerDemographic {
    pub cid: Option<String>,
    pub bdate: Option<NaiveDate>,
    pub r#gen: Gender,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilverLocation {
    pub cid: Option<String>,
    /// Full country name, or `n/a`.
    pub cntry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilverCategory {
    pub id: Option<String>,
    pub cat: Option<String>,
    pub subcat: Option<String>,
    pub maintenance: Option<String>,
}

impl Record for SilverCustomer {
    const TABLE: TableRef = TableRef::silver(TableId::CrmCustInfo);
    const COLUMNS: &'static [&'static str] = &[
        "cst_id",
        "cst_key",
        "cst_firstname",
        "cst_lastname",
        "cst_marital_status",
        "cst_gndr",
        "cst_create_date",
    ];
}

impl Record for SilverProduct {
    const TABLE: TableRef = TableRef::silver(TableId::CrmPrdInfo);
    const COLUMNS: &'static [&'static str] = &[
        "prd_id",
        "cat_id",
        "prd_key",
        "prd_nm",
        "prd_cost",
        "prd_line",
        "prd_start_dt",
        "prd_end_dt",
    ];
}

impl Record for SilverSalesDetail {
    const TABLE: TableRef = TableRef::silver(TableId::CrmSalesDetails);
    const COLUMNS: &'static [&'static str] = &[
        "sls_ord_num",
        "sls_prd_key",
        "sls_cust_id",
        "sls_order_dt",
        "sls_ship_dt",
        "sls_due_dt",
        "sls_sales",
        "sls_quantity",
        "sls_price",
    ];
}

impl Record for SilverCustomerDemographic {
    const TABLE: TableRef = TableRef::silver(TableId::ErpCustAz12);
    const COLUMNS: &'static [&'static str] = &["cid", "bdate", "gen"];
}

impl Record for SilverLocation {
    const TABLE: TableRef = TableRef::silver(TableId::ErpLocA101);
    const COLUMNS: &'static [&'static str] = &["cid", "cntry"];
}

impl Record for SilverCategory {
    const TABLE: TableRef = TableRef::silver(TableId::ErpPxCatG1v2);
    const COLUMNS: &'static [&'static str] = &["id", "cat", "subcat", "maintenance"];
}

//! Raw records as staged from the source files.
//!
//! Every field is optional: empty cells and cells that do not parse as the
//! column type are stored as `None`. Text is kept exactly as read.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::table::{TableId, TableRef};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BronzeCustomer {
    pub cst_id: Option<i64>,
    pub cst_key: Option<String>,
    pub cst_firstname: Option<String>,
    pub cst_lastname: Option<String>,
    pub cst_marital_status: Option<String>,
    pub cst_gndr: Option<String>,
    pub cst_create_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BronzeProduct {
    pub prd_id: Option<i64>,
    pub prd_key: Option<String>,
    pub prd_nm: Option<String>,
    pub prd_cost: Option<i64>,
    pub prd_line: Option<String>,
    pub prd_start_dt: Option<NaiveDateTime>,
    pub prd_end_dt: Option<NaiveDateTime>,
}

/// Order, ship and due dates arrive as `YYYYMMDD` integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BronzeSalesDetail {
    pub sls_ord_num: Option<String>,
    pub sls_prd_key: Option<String>,
    pub sls_cust_id: Option<i64>,
    pub sls_order_dt: Option<i64>,
    pub sls_ship_dt: Option<i64>,
    pub sls_due_dt: Option<i64>,
    pub sls_sales: Option<i64>,
    pub sls_quantity: Option<i64>,
    pub sls_price: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BronzeCustomerDemographic {
    pub cid: Option<String>,
    pub bdate: Option<NaiveDate>,
    pub r#gen: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BronzeLocation {
    pub cid: Option<String>,
    pub cntry: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BronzeCategory {
    pub id: Option<String>,
    pub cat: Option<String>,
    pub subcat: Option<String>,
    pub maintenance: Option<String>,
}

impl Record for BronzeCustomer {
    const TABLE: TableRef = TableRef::bronze(TableId::CrmCustInfo);
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

impl Record for BronzeProduct {
    const TABLE: TableRef = TableRef::bronze(TableId::CrmPrdInfo);
    const COLUMNS: &'static [&'static str] = &[
        "prd_id",
        "prd_key",
        "prd_nm",
        "prd_cost",
        "prd_line",
        "prd_start_dt",
        "prd_end_dt",
    ];
}

impl Record for BronzeSalesDetail {
    const TABLE: TableRef = TableRef::bronze(TableId::CrmSalesDetails);
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

impl Record for BronzeCustomerDemographic {
    const TABLE: TableRef = TableRef::bronze(TableId::ErpCustAz12);
    const COLUMNS: &'static [&'static str] = &["cid", "bdate", "gen"];
}

impl Record for BronzeLocation {
    const TABLE: TableRef = TableRef::bronze(TableId::ErpLocA101);
    const COLUMNS: &'static [&'static str] = &["cid", "cntry"];
}

impl Record for BronzeCategory {
    const TABLE: TableRef = TableRef::bronze(TableId::ErpPxCatG1v2);
    const COLUMNS: &'static [&'static str] = &["id", "cat", "subcat", "maintenance"];
}

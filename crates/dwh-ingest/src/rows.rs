//! Positional mapping of source rows onto bronze records.

use std::path::Path;

use dwh_model::{
    BronzeCategory, BronzeCustomer, BronzeCustomerDemographic, BronzeLocation, BronzeProduct,
    BronzeSalesDetail, Record, SourceBatch,
};
use tracing::debug;

use crate::error::Result;
use crate::fields::FieldCursor;
use crate::reader::{CsvOptions, SourceTable, read_source};

/// Builds a bronze record from one row, reading cells in column order.
pub trait FromSourceRow: Record {
    fn from_row(cursor: &mut FieldCursor<'_>) -> Self;
}

/// Records parsed from one staged file.
#[derive(Debug, Clone)]
pub struct ParsedBatch<R> {
    pub records: Vec<R>,
    pub batch: SourceBatch,
    /// Cells discarded because they did not parse as their column type.
    pub coerced_fields: usize,
}

/// Map every row of `table` onto `R`.
pub fn parse_rows<R: FromSourceRow>(table: &SourceTable) -> ParsedBatch<R> {
    let mut coerced_fields = 0usize;
    let records = table
        .rows
        .iter()
        .map(|row| {
            let mut cursor = FieldCursor::new(&row.fields);
            let record = R::from_row(&mut cursor);
            let undecodable = row
                .undecodable
                .iter()
                .filter(|&&index| index < R::COLUMNS.len());
            for &index in cursor.coerced().iter().chain(undecodable) {
                coerced_fields += 1;
                debug!(
                    table = %R::TABLE,
                    line = row.line,
                    column = R::COLUMNS.get(index).copied().unwrap_or("?"),
                    "unparseable value stored as NULL"
                );
            }
            record
        })
        .collect::<Vec<R>>();

    ParsedBatch {
        batch: SourceBatch {
            path: table.path.clone(),
            sha256: table.sha256.clone(),
            rows_read: records.len(),
            rows_skipped: table.rows_skipped,
        },
        records,
        coerced_fields,
    }
}

/// Read a staged file and map it onto `R`.
pub fn read_records<R: FromSourceRow>(path: &Path, options: &CsvOptions) -> Result<ParsedBatch<R>> {
    let table = read_source(path, options)?;
    Ok(parse_rows(&table))
}

impl FromSourceRow for BronzeCustomer {
    fn from_row(cursor: &mut FieldCursor<'_>) -> Self {
        Self {
            cst_id: cursor.int(),
            cst_key: cursor.text(),
            cst_firstname: cursor.text(),
            cst_lastname: cursor.text(),
            cst_marital_status: cursor.text(),
            cst_gndr: cursor.text(),
            cst_create_date: cursor.date(),
        }
    }
}

impl FromSourceRow for BronzeProduct {
    fn from_row(cursor: &mut FieldCursor<'_>) -> Self {
        Self {
            prd_id: cursor.int(),
            prd_key: cursor.text(),
            prd_nm: cursor.text(),
            prd_cost: cursor.int(),
            prd_line: cursor.text(),
            prd_start_dt: cursor.datetime(),
            prd_end_dt: cursor.datetime(),
        }
    }
}

impl FromSourceRow for BronzeSalesDetail {
    fn from_row(cursor: &mut FieldCursor<'_>) -> Self {
        Self {
            sls_ord_num: cursor.text(),
            sls_prd_key: cursor.text(),
            sls_cust_id: cursor.int(),
            sls_order_dt: cursor.int(),
            sls_ship_dt: cursor.int(),
            sls_due_dt: cursor.int(),
            sls_sales: cursor.int(),
            sls_quantity: cursor.int(),
            sls_price: cursor.int(),
        }
    }
}

impl FromSourceRow for BronzeCustomerDemographic {
    fn from_row(cursor: &mut FieldCursor<'_>) -> Self {
        Self {
            cid: cursor.text(),
            bdate: cursor.date(),
            r#gen: cursor.text(),
        }
    }
}

impl FromSourceRow for BronzeLocation {
    fn from_row(cursor: &mut FieldCursor<'_>) -> Self {
        Self {
            cid: cursor.text(),
            cntry: cursor.text(),
        }
    }
}

impl FromSourceRow for BronzeCategory {
    fn from_row(cursor: &mut FieldCursor<'_>) -> Self {
        Self {
            id: cursor.text(),
            cat: cursor.text(),
            subcat: cursor.text(),
            maintenance: cursor.text(),
        }
    }
}

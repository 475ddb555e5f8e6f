//! Sales amounts, quantities, prices and costs.

use dwh_model::{SilverProduct, SilverSalesDetail};

use crate::issue::Issue;

use super::{Samples, display_opt};

fn sales_label(row: &SilverSalesDetail) -> String {
    format!(
        "{}/{}",
        display_opt(row.sls_ord_num.as_deref()),
        display_opt(row.sls_prd_key.as_deref())
    )
}

/// Sales must be positive and equal `quantity × price`.
pub fn sales_consistency(rows: &[SilverSalesDetail], max_samples: usize) -> Option<Issue> {
    let mut samples = Samples::new(max_samples);
    for row in rows {
        let expected = match (row.sls_quantity, row.sls_price) {
            (Some(quantity), Some(price)) => quantity.checked_mul(price),
            _ => None,
        };
        let consistent = matches!(
            (row.sls_sales, expected),
            (Some(sales), Some(expected)) if sales > 0 && sales == expected
        );
        if !consistent {
            samples.push(|| {
                format!(
                    "{}: sales={} quantity={} price={}",
                    sales_label(row),
                    display_opt(row.sls_sales),
                    display_opt(row.sls_quantity),
                    display_opt(row.sls_price)
                )
            });
        }
    }
    let (count, samples) = samples.finish()?;
    Some(Issue::SalesInconsistent { count, samples })
}

/// Quantity or price values that are missing or not positive.
pub fn non_positive(
    column: &str,
    rows: &[SilverSalesDetail],
    value: impl Fn(&SilverSalesDetail) -> Option<i64>,
    max_samples: usize,
) -> Option<Issue> {
    let mut samples = Samples::new(max_samples);
    for row in rows {
        let amount = value(row);
        if amount.is_none_or(|v| v <= 0) {
            samples.push(|| format!("{}: {}", sales_label(row), display_opt(amount)));
        }
    }
    let (count, samples) = samples.finish()?;
    Some(Issue::NonPositiveAmount {
        column: column.to_string(),
        count,
        samples,
    })
}

pub fn negative_cost(rows: &[SilverProduct], max_samples: usize) -> Option<Issue> {
    let mut samples = Samples::new(max_samples);
    for row in rows.iter().filter(|row| row.prd_cost < 0) {
        samples.push(|| format!("{}: {}", display_opt(row.prd_id), row.prd_cost));
    }
    let (count, samples) = samples.finish()?;
    Some(Issue::NegativeCost { count, samples })
}

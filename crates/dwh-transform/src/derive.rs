//! Fields computed rather than copied from the source.

use std::collections::BTreeMap;
use std::fmt;
use std::iter::Peekable;

use chrono::NaiveDate;

/// Iterator adapter yielding each item paired with the one after it.
pub struct Lookahead<I: Iterator> {
    inner: Peekable<I>,
}

impl<I> Clone for Lookahead<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<I> fmt::Debug for Lookahead<I>
where
    I: Iterator + fmt::Debug,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookahead").field("inner", &self.inner).finish()
    }
}

impl<I> Iterator for Lookahead<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = (I::Item, Option<I::Item>);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.inner.next()?;
        let next = self.inner.peek().cloned();
        Some((current, next))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Pair every item with its successor; the last item gets `None`.
pub fn with_next<I>(iter: I) -> Lookahead<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Clone,
{
    Lookahead {
        inner: iter.into_iter().peekable(),
    }
}

/// Fill in validity end dates from the next record of the same group.
///
/// Rows are grouped by `key` and stable-sorted by start date ascending
/// (rows without a start date first). Each row ends the day before the next
/// row's start; the last row of a group, or one followed by an undated row,
/// gets `None`. Output is ordered by key, then start date.
pub fn derive_end_dates<R, K>(
    rows: Vec<R>,
    key: impl Fn(&R) -> K,
    start: impl Fn(&R) -> Option<NaiveDate>,
    mut set_end: impl FnMut(&mut R, Option<NaiveDate>),
) -> Vec<R>
where
    K: Ord,
{
    let total = rows.len();
    let mut groups: BTreeMap<K, Vec<R>> = BTreeMap::new();
    for row in rows {
        groups.entry(key(&row)).or_default().push(row);
    }

    let mut out = Vec::with_capacity(total);
    for (_, mut group) in groups {
        group.sort_by_key(&start);
        let starts: Vec<Option<NaiveDate>> = group.iter().map(&start).collect();
        for (mut row, (_, next)) in group.into_iter().zip(with_next(starts)) {
            let end = next.flatten().and_then(|date| date.pred_opt());
            set_end(&mut row, end);
            out.push(row);
        }
    }
    out
}

/// Sales amount, quantity and unit price of one order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SalesAmounts {
    pub sales: Option<i64>,
    pub quantity: Option<i64>,
    pub price: Option<i64>,
}

impl SalesAmounts {
    pub fn new(sales: Option<i64>, quantity: Option<i64>, price: Option<i64>) -> Self {
        Self {
            sales,
            quantity,
            price,
        }
    }

    /// `|quantity × price|`, or `None` when either is missing or it overflows.
    pub fn expected_sales(&self) -> Option<i64> {
        let quantity = self.quantity?;
        let price = self.price?;
        quantity.checked_mul(price).and_then(i64::checked_abs)
    }
}

/// Reconcile an order line's amounts.
///
/// All three corrections read the original values, never each other's
/// output:
///
/// - sales is replaced by `|quantity × price|` when it is missing, not
///   positive, or differs from it; a positive sales value is kept when
///   `quantity × price` cannot be computed
/// - quantity becomes its absolute value
/// - a missing or non-positive price becomes `|sales / quantity|` (integer
///   division), or `None` when either is missing or quantity is zero
pub fn reconcile_sales(input: SalesAmounts) -> SalesAmounts {
    let expected = input.expected_sales();
    let sales = match input.sales {
        Some(sales) if sales > 0 && expected.is_none_or(|e| e == sales) => Some(sales),
        _ => expected,
    };

    let quantity = input.quantity.map(i64::saturating_abs);

    let price = match input.price {
        Some(price) if price > 0 => Some(price),
        _ => match (input.sales, input.quantity) {
            (Some(sales), Some(quantity)) if quantity != 0 => {
                sales.checked_div(quantity).map(i64::saturating_abs)
            }
            _ => None,
        },
    };

    SalesAmounts {
        sales,
        quantity,
        price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn lookahead_pairs() {
        let pairs: Vec<_> = with_next([1, 2, 3]).collect();
        assert_eq!(pairs, vec![(1, Some(2)), (2, Some(3)), (3, None)]);
        assert_eq!(with_next(Vec::<u8>::new()).count(), 0);
    }

    #[test]
    fn lookahead_clone_resumes_independently() {
        let mut pairs = with_next(vec!["a", "b", "c"]);
        assert_eq!(pairs.next(), Some(("a", Some("b"))));
        let rest: Vec<_> = pairs.clone().collect();
        assert_eq!(rest, vec![("b", Some("c")), ("c", None)]);
        assert_eq!(pairs.count(), 2);
        assert!(format!("{:?}", with_next([1, 2])).starts_with("Lookahead"));
    }

    #[test]
    fn end_dates_per_group() {
        let rows = vec![
            ("A", Some(date(2012, 7, 1)), None),
            ("B", Some(date(2011, 1, 1)), None),
            ("A", Some(date(2011, 7, 1)), None),
        ];
        let out = derive_end_dates(rows, |r| r.0, |r| r.1, |r, end| r.2 = end);
        assert_eq!(
            out,
            vec![
                ("A", Some(date(2011, 7, 1)), Some(date(2012, 6, 30))),
                ("A", Some(date(2012, 7, 1)), None),
                ("B", Some(date(2011, 1, 1)), None),
            ]
        );
    }

    #[test]
    fn duplicate_starts_use_input_order() {
        let rows = vec![
            ("A", Some(date(2013, 1, 1)), None, 1),
            ("A", Some(date(2013, 1, 1)), None, 2),
        ];
        let out = derive_end_dates(rows, |r| r.0, |r| r.1, |r, end| r.2 = end);
        assert_eq!(out[0].3, 1);
        assert_eq!(out[0].2, Some(date(2012, 12, 31)));
        assert_eq!(out[1].2, None);
    }

    #[test]
    fn null_sales_recomputed() {
        let out = reconcile_sales(SalesAmounts::new(None, Some(3), Some(10)));
        assert_eq!(out, SalesAmounts::new(Some(30), Some(3), Some(10)));
    }

    #[test]
    fn inconsistent_sales_recomputed() {
        let out = reconcile_sales(SalesAmounts::new(Some(50), Some(2), Some(10)));
        assert_eq!(out.sales, Some(20));
        let out = reconcile_sales(SalesAmounts::new(Some(-20), Some(2), Some(10)));
        assert_eq!(out.sales, Some(20));
    }

    #[test]
    fn consistent_sales_kept() {
        let input = SalesAmounts::new(Some(40), Some(4), Some(10));
        assert_eq!(reconcile_sales(input), input);
    }

    #[test]
    fn price_from_original_sales() {
        let out = reconcile_sales(SalesAmounts::new(Some(100), Some(3), None));
        assert_eq!(out.price, Some(33));
        assert_eq!(out.sales, Some(100));

        let out = reconcile_sales(SalesAmounts::new(Some(-60), Some(3), Some(-20)));
        assert_eq!(out.price, Some(20));
        assert_eq!(out.sales, Some(60));
    }

    #[test]
    fn zero_quantity_price_is_null() {
        let out = reconcile_sales(SalesAmounts::new(Some(10), Some(0), None));
        assert_eq!(out.price, None);
        assert_eq!(out.quantity, Some(0));
    }

    #[test]
    fn negative_quantity_uses_original_for_siblings() {
        let out = reconcile_sales(SalesAmounts::new(None, Some(-2), Some(5)));
        assert_eq!(out, SalesAmounts::new(Some(10), Some(2), Some(5)));
    }
}

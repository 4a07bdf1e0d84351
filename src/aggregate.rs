use std::{collections::HashMap, fmt::Display};

use crate::{error::Error, record::Record, usd::Usd};

/// The product with the most units sold, and how many.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BestSeller {
    pub product: String,
    pub quantity: u64,
}

impl Display for BestSeller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} with a quantity of {}", self.product, self.quantity)
    }
}

/// Returns the total revenue of `records`, rounded to whole cents.
///
/// The exact sum of `quantity * unit_price` is rounded once, half to even.
///
/// ```
/// # use sales_ledger::{total_revenue, Usd};
/// assert_eq!(total_revenue(&[]), Usd::ZERO);
/// assert_eq!(total_revenue(&[]).to_string(), "0.00");
/// ```
#[must_use]
pub fn total_revenue(records: &[Record]) -> Usd {
    let mut total = Usd::ZERO;
    for record in records {
        total += record.revenue();
    }
    total.round_cents()
}

/// Returns the product with the largest total quantity sold.
///
/// Quantities are summed per product name, compared case-sensitively. When
/// several products share the largest total, the one that appears first in
/// `records` wins.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if `records` is empty.
pub fn best_selling_product(records: &[Record]) -> Result<BestSeller, Error> {
    let mut totals: Vec<(&str, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let i = *index.entry(record.product.as_str()).or_insert_with(|| {
            totals.push((record.product.as_str(), 0));
            totals.len() - 1
        });
        totals[i].1 += u64::from(record.quantity);
    }
    totals
        .into_iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
        .map(|(product, quantity)| BestSeller {
            product: product.to_string(),
            quantity,
        })
        .ok_or(Error::EmptyInput)
}

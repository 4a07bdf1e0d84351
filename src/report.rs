use std::fmt::Display;

use crate::{aggregate::BestSeller, record::Record, usd::Usd};

const PRODUCT: &str = "Product";
const QTY: &str = "Qty";
const PRICE: &str = "Price";
const SALE_DATE: &str = "Sale Date";
const DATE_WIDTH: usize = 10;

#[must_use]
pub fn revenue_message(total: Usd) -> String {
    format!("The total revenue is ${total}")
}

#[must_use]
pub fn best_seller_message(best: &BestSeller) -> String {
    format!("The best-selling product is {best}")
}

/// A printable table of sales, one row per record, in the order given.
///
/// Each column is as wide as its longest value. Quantities and prices are
/// right-aligned.
pub struct SalesTable<'a>(pub &'a [Record]);

impl Display for SalesTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let product_w = self
            .0
            .iter()
            .map(|r| r.product.chars().count())
            .fold(PRODUCT.len(), usize::max);
        let qty_w = self
            .0
            .iter()
            .map(|r| r.quantity.to_string().len())
            .fold(QTY.len(), usize::max);
        let price_w = self
            .0
            .iter()
            .map(|r| r.unit_price.to_string().len())
            .fold(PRICE.len(), usize::max);
        writeln!(
            f,
            "| {PRODUCT:product_w$} | {QTY:>qty_w$} | {PRICE:>price_w$} | {SALE_DATE:DATE_WIDTH$} |"
        )?;
        writeln!(
            f,
            "|{:-<a$}|{:-<b$}|{:-<c$}|{:-<d$}|",
            "",
            "",
            "",
            "",
            a = product_w + 2,
            b = qty_w + 2,
            c = price_w + 2,
            d = DATE_WIDTH + 2,
        )?;
        for r in self.0 {
            writeln!(
                f,
                "| {:product_w$} | {:>qty_w$} | {:>price_w$} | {:DATE_WIDTH$} |",
                r.product,
                r.quantity,
                r.unit_price,
                r.sale_date.format("%Y-%m-%d").to_string(),
            )?;
        }
        Ok(())
    }
}

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{error::ValidationError, usd::Usd};

/// Defines the CSV format for sales data.
///
/// The field order here is the column order of the sales file, and the serde
/// names are its header row.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Record {
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Quantity Sold")]
    pub quantity: u32,
    #[serde(rename = "Unit Price")]
    pub unit_price: Usd,
    #[serde(rename = "Sale Date")]
    pub sale_date: NaiveDate,
}

impl Record {
    /// Validates the raw values for a new sale, dated today.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking the product name,
    /// then the quantity, then the unit price.
    pub fn from_input(
        product: &str,
        quantity: &str,
        unit_price: &str,
    ) -> Result<Self, ValidationError> {
        Self::from_input_on(product, quantity, unit_price, today())
    }

    pub(crate) fn from_input_on(
        product: &str,
        quantity: &str,
        unit_price: &str,
        sale_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            product: parse_product(product)?,
            quantity: parse_quantity(quantity)?,
            unit_price: parse_unit_price(unit_price)?,
            sale_date,
        })
    }

    /// Applies the same business rules as [`Record::from_input`] to a record
    /// that was read back from the sales file.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a blank product, a zero quantity, or
    /// a price that is not positive.
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.product.trim().is_empty() {
            return Err(ValidationError::EmptyProduct);
        }
        if self.quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        check_price(self.unit_price)
    }

    #[must_use]
    pub fn revenue(&self) -> Usd {
        self.unit_price * self.quantity
    }
}

/// Returns the local calendar date, used to stamp new sales.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Checks a product name, returning it without surrounding whitespace.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyProduct`] if the name is empty or blank.
pub fn parse_product(raw: &str) -> Result<String, ValidationError> {
    let product = raw.trim();
    if product.is_empty() {
        return Err(ValidationError::EmptyProduct);
    }
    Ok(product.to_string())
}

/// Parses a quantity sold, which must be a positive whole number.
///
/// # Errors
///
/// Returns a [`ValidationError`] if `raw` is not an integer, or is zero,
/// negative, or too large.
pub fn parse_quantity(raw: &str) -> Result<u32, ValidationError> {
    let qty: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidQuantity(raw.to_string()))?;
    match qty {
        0 => Err(ValidationError::ZeroQuantity),
        n if n < 0 => Err(ValidationError::NegativeQuantity(n)),
        n => u32::try_from(n).map_err(|_| ValidationError::QuantityTooLarge(n)),
    }
}

/// Parses a unit price, which must be a positive decimal amount.
///
/// # Errors
///
/// Returns a [`ValidationError`] if `raw` is not a decimal number, or is zero
/// or negative.
pub fn parse_unit_price(raw: &str) -> Result<Usd, ValidationError> {
    let price: Usd = raw
        .parse()
        .map_err(|_| ValidationError::InvalidPrice(raw.to_string()))?;
    check_price(price)?;
    Ok(price)
}

fn check_price(price: Usd) -> Result<(), ValidationError> {
    if price.is_zero() {
        Err(ValidationError::ZeroPrice)
    } else if price.is_negative() {
        Err(ValidationError::NegativePrice(price))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn from_input_on_builds_record_from_valid_values() {
        let record = Record::from_input_on("Widget", "10", "2.50", date()).unwrap();
        assert_eq!(
            record,
            Record {
                product: "Widget".into(),
                quantity: 10,
                unit_price: Usd::from_str("2.50").unwrap(),
                sale_date: date(),
            }
        );
    }

    #[test]
    fn from_input_dates_sale_today() {
        let record = Record::from_input("Widget", "1", "1").unwrap();
        assert_eq!(record.sale_date, today());
    }

    #[test]
    fn parse_product_rejects_empty_and_blank_names() {
        assert_eq!(parse_product(""), Err(ValidationError::EmptyProduct));
        assert_eq!(parse_product("   "), Err(ValidationError::EmptyProduct));
        assert_eq!(parse_product("  Gadget "), Ok("Gadget".to_string()));
    }

    #[test]
    fn parse_product_keeps_case() {
        assert_eq!(parse_product("wIdGeT"), Ok("wIdGeT".to_string()));
    }

    #[test]
    fn parse_quantity_rejects_non_integers() {
        assert_eq!(
            parse_quantity("ten"),
            Err(ValidationError::InvalidQuantity("ten".into()))
        );
        assert_eq!(
            parse_quantity("2.5"),
            Err(ValidationError::InvalidQuantity("2.5".into()))
        );
    }

    #[test]
    fn parse_quantity_rejects_zero_negative_and_oversized_values() {
        assert_eq!(parse_quantity("0"), Err(ValidationError::ZeroQuantity));
        assert_eq!(
            parse_quantity("-3"),
            Err(ValidationError::NegativeQuantity(-3))
        );
        assert_eq!(
            parse_quantity("5000000000"),
            Err(ValidationError::QuantityTooLarge(5_000_000_000))
        );
        assert_eq!(parse_quantity(" 7 "), Ok(7));
    }

    #[test]
    fn parse_unit_price_rejects_bad_zero_and_negative_prices() {
        assert_eq!(
            parse_unit_price("cheap"),
            Err(ValidationError::InvalidPrice("cheap".into()))
        );
        assert_eq!(
            parse_unit_price("1_0"),
            Err(ValidationError::InvalidPrice("1_0".into()))
        );
        let tiny = "0.0000000000000000000000000000001";
        assert_eq!(
            parse_unit_price(tiny),
            Err(ValidationError::InvalidPrice(tiny.into()))
        );
        let long = "1.999999999999999999999999999999";
        assert_eq!(
            parse_unit_price(long),
            Err(ValidationError::InvalidPrice(long.into()))
        );
        assert_eq!(parse_unit_price("0"), Err(ValidationError::ZeroPrice));
        assert_eq!(parse_unit_price("0.00"), Err(ValidationError::ZeroPrice));
        assert_eq!(
            parse_unit_price("-1.25"),
            Err(ValidationError::NegativePrice(Usd::from_str("-1.25").unwrap()))
        );
    }

    #[test]
    fn from_input_on_reports_first_failing_field() {
        assert_eq!(
            Record::from_input_on("", "abc", "0", date()),
            Err(ValidationError::EmptyProduct)
        );
        assert_eq!(
            Record::from_input_on("Widget", "0", "abc", date()),
            Err(ValidationError::ZeroQuantity)
        );
    }

    #[test]
    fn check_rejects_loaded_rows_that_break_business_rules() {
        let mut record = Record::from_input_on("Widget", "1", "1", date()).unwrap();
        assert_eq!(record.check(), Ok(()));
        record.quantity = 0;
        assert_eq!(record.check(), Err(ValidationError::ZeroQuantity));
        record.quantity = 1;
        record.unit_price = Usd::from_str("-2").unwrap();
        assert_eq!(
            record.check(),
            Err(ValidationError::NegativePrice(Usd::from_str("-2").unwrap()))
        );
    }

    #[test]
    fn revenue_is_quantity_times_price() {
        let record = Record::from_input_on("Widget", "3", "0.333", date()).unwrap();
        assert_eq!(record.revenue(), Usd::from_str("0.999").unwrap());
    }
}

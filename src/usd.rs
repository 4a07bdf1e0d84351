use anyhow::bail;
use rust_decimal::{Decimal, RoundingStrategy::MidpointNearestEven};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use std::{
    fmt::{Debug, Display},
    ops::{AddAssign, Mul},
    str::FromStr,
};

/// Represents an amount of money in USD currency.
///
/// The amount is stored as an exact decimal, so unit prices such as `0.333`
/// keep their full precision until a total is rounded with
/// [`Usd::round_cents`]. The [`Display`] implementation always shows at least
/// two decimal places.
#[derive(
    Clone, Copy, Default, DeserializeFromStr, SerializeDisplay, Eq, PartialEq, Ord, PartialOrd,
)]
pub struct Usd(Decimal);

impl Usd {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }

    /// Rounds to whole cents, with midpoints going to the even neighbour.
    ///
    /// ```
    /// # use std::str::FromStr;
    /// # use sales_ledger::Usd;
    /// assert_eq!(Usd::from_str("0.125").unwrap().round_cents().to_string(), "0.12");
    /// assert_eq!(Usd::from_str("0.135").unwrap().round_cents().to_string(), "0.14");
    /// ```
    #[must_use]
    pub fn round_cents(self) -> Self {
        Self(self.0.round_dp_with_strategy(2, MidpointNearestEven))
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl Debug for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut amount = self.0;
        if amount.scale() < 2 {
            amount.rescale(2);
        }
        f.pad(&amount.to_string())
    }
}

impl FromStr for Usd {
    type Err = anyhow::Error;

    /// Parses plain or scientific decimal text.
    ///
    /// Digit separators are refused, as is any amount with more decimal
    /// places than a [`Decimal`] can hold exactly.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains('_') {
            bail!("invalid amount {s:?}: digit separators not allowed");
        }
        if s.contains(['e', 'E']) {
            return Ok(Self(Decimal::from_scientific(s)?));
        }
        let amount = Decimal::from_str(s)?;
        let places = s.split_once('.').map_or(0, |(_, frac)| frac.len());
        if usize::try_from(amount.scale())? < places {
            bail!("invalid amount {s:?}: too many decimal places");
        }
        Ok(Self(amount))
    }
}

impl AddAssign for Usd {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Mul<u32> for Usd {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0.saturating_mul(Decimal::from(rhs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_accepts_plain_and_scientific_decimals() {
        assert_eq!(
            Usd::from_str("2.50").unwrap(),
            Usd::new(Decimal::new(250, 2))
        );
        assert_eq!(Usd::from_str(" 10 ").unwrap(), Usd::new(Decimal::from(10)));
        assert_eq!(Usd::from_str("2.5e1").unwrap(), Usd::new(Decimal::from(25)));
    }

    #[test]
    fn from_str_rejects_non_numeric_text() {
        assert!(Usd::from_str("abc").is_err());
        assert!(Usd::from_str("$2.50").is_err());
        assert!(Usd::from_str("").is_err());
        assert!(Usd::from_str("1_0").is_err());
    }

    #[test]
    fn from_str_rejects_amounts_that_would_lose_decimal_places() {
        assert!(Usd::from_str("1.999999999999999999999999999999").is_err());
        assert!(Usd::from_str("0.0000000000000000000000000000001").is_err());
        let smallest = "0.0000000000000000000000000001";
        assert_eq!(Usd::from_str(smallest).unwrap().to_string(), smallest);
    }

    #[test]
    fn display_pads_to_two_decimal_places() {
        assert_eq!(Usd::from_str("2.5").unwrap().to_string(), "2.50");
        assert_eq!(Usd::from_str("7").unwrap().to_string(), "7.00");
        assert_eq!(Usd::from_str("0.333").unwrap().to_string(), "0.333");
        assert_eq!(format!("{:>8}", Usd::from_str("2.5").unwrap()), "    2.50");
    }

    #[test]
    fn mul_and_add_assign_accumulate_exactly() {
        let mut total = Usd::ZERO;
        total += Usd::from_str("0.1").unwrap() * 3;
        total += Usd::from_str("0.2").unwrap() * 1;
        assert_eq!(total, Usd::from_str("0.5").unwrap());
    }

    #[test]
    fn sign_checks_distinguish_zero_and_negative() {
        assert!(Usd::from_str("0.00").unwrap().is_zero());
        assert!(Usd::from_str("-1.5").unwrap().is_negative());
        assert!(!Usd::from_str("1.5").unwrap().is_negative());
    }
}

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::usd::Usd;

/// Errors returned by the ledger's store and aggregate operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot access sales file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no sales recorded yet")]
    EmptyInput,
}

/// A business rule broken by the values given for a new sale.
///
/// The messages are written to be shown to the person entering the sale.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Product name cannot be empty.")]
    EmptyProduct,
    #[error("Quantity must be a whole number, got {0:?}.")]
    InvalidQuantity(String),
    #[error("Quantity cannot be zero.")]
    ZeroQuantity,
    #[error("Quantity cannot be negative, got {0}.")]
    NegativeQuantity(i64),
    #[error("Quantity {0} is too large.")]
    QuantityTooLarge(i64),
    #[error("Price must be a decimal number, got {0:?}.")]
    InvalidPrice(String),
    #[error("Price cannot be zero.")]
    ZeroPrice,
    #[error("Price cannot be negative, got {0}.")]
    NegativePrice(Usd),
}

/// A row of the sales file that could not be turned into a
/// [`Record`](crate::Record).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct RowParseError {
    pub line: u64,
    pub reason: String,
}

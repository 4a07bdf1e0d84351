#![doc = include_str!("../README.md")]
mod aggregate;
mod error;
pub mod menu;
mod record;
mod report;
mod store;
mod usd;

pub use aggregate::{best_selling_product, total_revenue, BestSeller};
pub use error::{Error, RowParseError, ValidationError};
pub use record::{parse_product, parse_quantity, parse_unit_price, today, Record};
pub use report::{best_seller_message, revenue_message, SalesTable};
pub use store::{Sales, Store};
pub use usd::Usd;

//! Core value types.

pub mod page;
pub mod price;

pub use page::{Page, UnknownPage};
pub use price::{CurrencyStyle, Price};

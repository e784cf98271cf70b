//! Whole-unit prices and the style used to display them.
//!
//! The storefront sells in a currency without a minor unit, so a [`Price`] is
//! a plain non-negative integer. Formatting follows the configured
//! [`CurrencyStyle`]: symbol, a space, then the amount grouped in thousands
//! with no fraction digits.
//!
//! ```
//! use bella_mode_core::{CurrencyStyle, Price};
//!
//! let style = CurrencyStyle::default();
//! assert_eq!(style.format(Price::new(300_000)), "Rp 300.000");
//! ```

use core::fmt;
use std::iter::Sum;

use num_format::{CustomFormat, Grouping, ToFormattedString};
use serde::Serialize;

/// A currency amount in whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole-unit amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Price of `qty` units, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, qty: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(qty)))
    }

    /// Sum of two prices, saturating at `u64::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

/// Display style for prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyStyle {
    /// Symbol printed before the amount (e.g., "Rp").
    pub symbol: String,
    /// Separator between groups of three digits.
    pub thousands_separator: char,
}

impl CurrencyStyle {
    /// Create a currency style.
    #[must_use]
    pub fn new(symbol: impl Into<String>, thousands_separator: char) -> Self {
        Self {
            symbol: symbol.into(),
            thousands_separator,
        }
    }

    /// Indonesian rupiah: `Rp 150.000`.
    #[must_use]
    pub fn rupiah() -> Self {
        Self::new("Rp", '.')
    }

    /// Format a price for display.
    #[must_use]
    pub fn format(&self, price: Price) -> String {
        let grouped = match self.grouping() {
            Ok(format) => price.amount().to_formatted_string(&format),
            Err(e) => {
                tracing::warn!(error = %e, "unusable thousands separator");
                price.amount().to_string()
            }
        };

        if self.symbol.is_empty() {
            grouped
        } else {
            format!("{} {grouped}", self.symbol)
        }
    }

    fn grouping(&self) -> Result<CustomFormat, num_format::Error> {
        CustomFormat::builder()
            .grouping(Grouping::Standard)
            .separator(self.thousands_separator.to_string())
            .build()
    }
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self::rupiah()
    }
}

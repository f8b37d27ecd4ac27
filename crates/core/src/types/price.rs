//! Type-safe price representation in minor currency units.
//!
//! Prices are whole numbers of the currency's minor unit (kobo for the naira),
//! which keeps cart arithmetic exact and rules out negative amounts at the type
//! level. Formatting mirrors the storefront's presentation:
//!
//! - unit prices drop a zero fractional part: `₦12,500`, `₦12,500.50`
//! - totals always carry two decimals: `₦37,500.00`

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

use crate::types::quantity::Quantity;

/// A non-negative amount in the minor unit of [`CurrencyCode::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a price from an amount in minor units.
    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    ///
    /// Saturates instead of overflowing.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity.get())))
    }

    /// Format for display, omitting a zero fractional part (e.g. `₦12,500`).
    #[must_use]
    pub fn display(self) -> String {
        let code = CurrencyCode::default();
        let (major, minor) = self.split(code);
        if minor == 0 {
            format!("{}{}", code.symbol(), group_thousands(major))
        } else {
            format!("{}{}.{minor:02}", code.symbol(), group_thousands(major))
        }
    }

    /// Format for display with exactly two decimals (e.g. `₦12,500.00`).
    #[must_use]
    pub fn display_fixed(self) -> String {
        let code = CurrencyCode::default();
        let (major, minor) = self.split(code);
        format!("{}{}.{minor:02}", code.symbol(), group_thousands(major))
    }

    const fn split(self, code: CurrencyCode) -> (u64, u64) {
        let scale = code.minor_per_major();
        (self.0 / scale, self.0 % scale)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, price| Self(acc.0.saturating_add(price.0)))
    }
}

impl From<u64> for Price {
    fn from(minor: u64) -> Self {
        Self(minor)
    }
}

/// ISO 4217 currency codes supported by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Nigerian naira.
    #[default]
    NGN,
}

impl CurrencyCode {
    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::NGN => "₦",
        }
    }

    /// Number of minor units in one major unit.
    #[must_use]
    pub const fn minor_per_major(self) -> u64 {
        match self {
            Self::NGN => 100,
        }
    }
}

/// Insert `,` separators every three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_drops_zero_fraction() {
        assert_eq!(Price::from_minor(1_250_000).display(), "₦12,500");
        assert_eq!(Price::from_minor(1_250_050).display(), "₦12,500.50");
        assert_eq!(Price::ZERO.display(), "₦0");
    }

    #[test]
    fn test_display_fixed_always_two_decimals() {
        assert_eq!(Price::from_minor(300_000).display_fixed(), "₦3,000.00");
        assert_eq!(Price::from_minor(5).display_fixed(), "₦0.05");
        assert_eq!(Price::ZERO.display_fixed(), "₦0.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_times_and_sum() {
        let qty = Quantity::new(3).unwrap();
        assert_eq!(Price::from_minor(1000).times(qty), Price::from_minor(3000));

        let total: Price = [Price::from_minor(100), Price::from_minor(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_minor(350));
    }

    #[test]
    fn test_times_saturates() {
        let qty = Quantity::new(2).unwrap();
        assert_eq!(Price::from_minor(u64::MAX).times(qty), Price::from_minor(u64::MAX));
    }

    #[test]
    fn test_rejects_negative_and_fractional_json() {
        assert!(serde_json::from_str::<Price>("-1").is_err());
        assert!(serde_json::from_str::<Price>("10.5").is_err());
        assert_eq!(serde_json::from_str::<Price>("2500").unwrap(), Price::from_minor(2500));
    }
}

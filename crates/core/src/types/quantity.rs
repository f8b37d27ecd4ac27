//! Line item quantities.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Quantities start at one.
    #[error("quantity must be at least 1")]
    Zero,
    /// The input was not a whole, positive number.
    #[error("invalid quantity: {0}")]
    Invalid(String),
}

/// A quantity of at least one.
///
/// Every cart line holds a `Quantity`, so a line with zero units cannot be
/// represented; decrementing past one removes the line instead.
///
/// ## Examples
///
/// ```
/// use black_royalty_core::Quantity;
///
/// assert_eq!(Quantity::new(2).map(Quantity::get), Ok(2));
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::parse("-3").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] for `0`.
    pub const fn new(value: u32) -> Result<Self, QuantityError> {
        if value == 0 {
            Err(QuantityError::Zero)
        } else {
            Ok(Self(value))
        }
    }

    /// Parse a quantity from user input (e.g. a form field).
    ///
    /// # Errors
    ///
    /// Returns an error unless the trimmed input is a positive integer.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|_| QuantityError::Invalid(s.to_string()))?;
        Self::new(value)
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Add another quantity, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Apply a signed delta.
    ///
    /// Returns `None` when the result would drop to zero or below.
    #[must_use]
    pub fn checked_offset(self, delta: i64) -> Option<Self> {
        let next = i64::from(self.0).saturating_add(delta);
        if next <= 0 {
            return None;
        }
        Some(Self(u32::try_from(next).unwrap_or(u32::MAX)))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert_eq!(Quantity::new(0), Err(QuantityError::Zero));
        assert_eq!(Quantity::new(1), Ok(Quantity::ONE));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Quantity::parse(" 4 ").unwrap().get(), 4);
        assert!(matches!(Quantity::parse("0"), Err(QuantityError::Zero)));
        assert!(matches!(Quantity::parse("-1"), Err(QuantityError::Invalid(_))));
        assert!(matches!(Quantity::parse("two"), Err(QuantityError::Invalid(_))));
        assert!(matches!(Quantity::parse("1.5"), Err(QuantityError::Invalid(_))));
    }

    #[test]
    fn test_checked_offset() {
        let three = Quantity::new(3).unwrap();
        assert_eq!(three.checked_offset(1).map(Quantity::get), Some(4));
        assert_eq!(three.checked_offset(-2).map(Quantity::get), Some(1));
        assert_eq!(three.checked_offset(-3), None);
        assert_eq!(three.checked_offset(-10), None);
        assert_eq!(three.checked_offset(i64::MAX).map(Quantity::get), Some(u32::MAX));
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("2").unwrap().get(), 2);
    }
}

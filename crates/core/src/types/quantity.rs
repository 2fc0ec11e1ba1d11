//! Cart quantity type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// Quantities are strictly positive; zero is expressed by the absence
    /// of the cart record, never by a zero-quantity entry.
    #[error("quantity must be at least 1")]
    Zero,
}

/// A cart-item quantity.
///
/// Always at least one: a cart record with quantity zero cannot exist, and
/// removal is a separate explicit operation. `decrement` therefore refuses
/// to go below one rather than deleting.
///
/// ## Examples
///
/// ```
/// use cartwheel_core::Quantity;
///
/// let one = Quantity::ONE;
/// let two = one.increment();
/// assert_eq!(two.get(), 2);
/// assert_eq!(two.decrement(), Some(one));
/// assert_eq!(one.decrement(), None); // never drops to zero
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest valid quantity.
    pub const ONE: Self = Self(1);

    /// Create a quantity from a raw count.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] for a zero count.
    pub const fn new(count: u32) -> Result<Self, QuantityError> {
        if count == 0 {
            Err(QuantityError::Zero)
        } else {
            Ok(Self(count))
        }
    }

    /// Get the raw count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// One more of this item. Saturates at `u32::MAX`.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One fewer of this item, or `None` at one.
    #[must_use]
    pub const fn decrement(self) -> Option<Self> {
        if self.0 > 1 { Some(Self(self.0 - 1)) } else { None }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert_eq!(Quantity::new(0), Err(QuantityError::Zero));
        assert_eq!(Quantity::new(1).unwrap().get(), 1);
    }

    #[test]
    fn test_increment_decrement_roundtrip() {
        let q = Quantity::new(3).unwrap();
        assert_eq!(q.increment().decrement(), Some(q));
    }

    #[test]
    fn test_decrement_stops_at_one() {
        assert_eq!(Quantity::ONE.decrement(), None);
        assert_eq!(Quantity::new(2).unwrap().decrement(), Some(Quantity::ONE));
    }

    #[test]
    fn test_serde_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        let q: Quantity = serde_json::from_str("4").unwrap();
        assert_eq!(q.get(), 4);
        assert_eq!(serde_json::to_string(&q).unwrap(), "4");
    }
}

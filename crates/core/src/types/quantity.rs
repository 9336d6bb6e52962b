//! Line item quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A line item quantity, always at least one.
///
/// Values below one are clamped rather than rejected: a cart line never
/// reaches zero through a quantity change, it is removed explicitly.
///
/// ```
/// use astro_store_core::Quantity;
///
/// assert_eq!(Quantity::new(0).get(), 1);
/// assert_eq!(Quantity::new(3).get(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest quantity.
    pub const ONE: Self = Self(1);

    /// Create a quantity, clamping values below one up to one.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 { Self::ONE } else { Self(value) }
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Add another quantity, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
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

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

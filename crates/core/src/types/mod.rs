//! Core types for Astro Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod quantity;
pub mod variant;

pub use id::{IdError, ProductId};
pub use price::{Price, PriceError, saturating_sum};
pub use quantity::Quantity;
pub use variant::Variant;

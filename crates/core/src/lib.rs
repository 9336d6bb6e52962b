//! Astro Store Core - Shared types library.
//!
//! This crate provides the validated domain types used by the storefront
//! state containers:
//! - `storefront` - Cart and wishlist stores, storage slots, app state
//! - `integration-tests` - Cross-module scenarios
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, quantities and variants

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

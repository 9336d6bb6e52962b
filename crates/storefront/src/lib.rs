//! Astro Store Storefront library.
//!
//! Client-side state for the storefront: the cart and the wishlist, the
//! durable slots they persist into, and the subscribe/read/mutate interface
//! views use.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use astro_store_core::{Price, ProductId};
//! use astro_store_storefront::cart::CartItemInput;
//! use astro_store_storefront::config::StoreConfig;
//! use astro_store_storefront::filters::format_price;
//! use astro_store_storefront::state::AppState;
//! use astro_store_storefront::storage::MemoryStorage;
//!
//! let state = AppState::with_storage(StoreConfig::default(), Rc::new(MemoryStorage::new()));
//!
//! let id = ProductId::parse("a").unwrap();
//! state.cart().add_item(CartItemInput::new(id.clone(), "A", "", Price::from_cents(1000)));
//! state.cart().add_item(CartItemInput::new(id, "A", "", Price::from_cents(1000)));
//!
//! assert_eq!(state.cart().total_item_count(), 2);
//! assert_eq!(format_price(state.cart().total_price()), "$20.00");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod filters;
mod persist;
pub mod state;
pub mod storage;
pub mod subscription;
pub mod view;
pub mod wishlist;

pub use cart::{CartItem, CartItemInput, CartStore};
pub use error::{AppError, Result};
pub use state::AppState;
pub use wishlist::{WishlistItem, WishlistItemInput, WishlistStore};

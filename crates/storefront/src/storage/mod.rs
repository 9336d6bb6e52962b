//! Durable key-value slots backing the stores.
//!
//! A slot maps a short string key to a string value and survives reloads.
//! Stores write their full collection as JSON after every mutation and read
//! it back once when opened.
//!
//! # Implementations
//!
//! - [`MemoryStorage`] - in-process map, for tests and ephemeral sessions
//! - [`FileStorage`] - one `<key>.json` file per key under a directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Default slot keys.
pub mod keys {
    /// Key the cart collection is persisted under.
    pub const CART: &str = "cart";

    /// Key the wishlist collection is persisted under.
    pub const WISHLIST: &str = "wishlist";
}

/// Maximum key length accepted by [`validate_key`].
pub const MAX_KEY_LENGTH: usize = 64;

/// Errors raised by a storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key is empty, too long, or contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Storage directory could not be created.
    #[error("cannot create storage directory {}: {source}", path.display())]
    CreateDir {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Underlying filesystem operation failed.
    #[error("storage I/O error for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// A string-keyed, string-valued durable slot.
///
/// Calls are synchronous: a successful `set` is visible to the next `get`,
/// including one made after a reload.
pub trait StorageSlot {
    /// Read the value stored under `key`, or `None` if nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the read fails.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the key is invalid or the write fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Check that `key` is usable by every slot implementation.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] for empty keys, keys longer than
/// [`MAX_KEY_LENGTH`], or keys containing anything but ASCII alphanumerics,
/// `-` and `_`.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LENGTH
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

//! Typed key-value persistence for storefront state.
//!
//! Values are stored as JSON documents under string keys, either in
//! memory or as one file per key in a directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::Cache;
//!
//! let cache = Cache::open(".storefront")?;
//!
//! // Store a value
//! cache.set("storefront:cart", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = cache.get("storefront:cart")?;
//!
//! // Delete a value
//! cache.delete("storefront:cart")?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}

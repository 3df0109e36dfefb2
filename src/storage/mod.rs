//! Storage Module
//!
//! The in-memory key-value store shared by every client connection, plus the
//! TTL units `SET` understands.
//!
//! ## Features
//!
//! - **Single shared map**: one `Mutex<HashMap>`, one instance per server
//! - **TTL Support**: keys can carry an absolute deadline
//! - **Lazy Expiry**: expired keys are removed when read, never swept
//!
//! ## Example
//!
//! ```
//! use tinykv::storage::{ExpiryUnit, Store};
//! use std::sync::Arc;
//!
//! let store = Arc::new(Store::new());
//!
//! store.set("name", "jane");
//! assert_eq!(store.get("name"), Some("jane".to_string()));
//!
//! store.set_with_expiry("session", "token123", ExpiryUnit::Milliseconds, 3_600_000);
//! assert_eq!(store.entry("session").map(|e| e.expires_at.is_some()), Some(true));
//! ```

pub mod engine;
pub mod expiry;

pub use engine::{Entry, Store, StoreStats};
pub use expiry::ExpiryUnit;

//! Thread-Safe Store with Lazy Expiry
//!
//! This module implements the single key-value store a server shares across
//! all of its client connections.
//!
//! ## Design Decisions
//!
//! 1. **One Mutex over the whole map**: every `get`/`set` holds the lock for
//!    its full duration, so each call is atomic with respect to all others.
//! 2. **Lazy Expiry**: deadlines are checked when a key is read. An expired
//!    key is removed inside the same critical section that observed it.
//! 3. **No sweeper**: a key that expires and is never read again stays in
//!    memory until it is overwritten.
//!
//! ```text
//! ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//! │ connection 1 │  │ connection 2 │  │ connection N │
//! └──────┬───────┘  └──────┬───────┘  └──────┬───────┘
//!        │   Arc<Store>    │                 │
//!        └─────────────────┼─────────────────┘
//!                          ▼
//!              ┌───────────────────────┐
//!              │ Mutex<HashMap<..>>    │
//!              └───────────────────────┘
//! ```

use crate::storage::expiry::ExpiryUnit;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::trace;

/// A stored value with an optional absolute deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The actual value stored
    pub value: String,
    /// When this entry expires (None = never expires)
    pub expires_at: Option<Instant>,
}

impl Entry {
    /// Creates a new entry without expiry.
    pub fn new(value: String) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    /// Creates a new entry expiring `ttl` from now.
    ///
    /// A deadline too far out to represent is treated as no deadline.
    pub fn with_ttl(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now().checked_add(ttl),
        }
    }

    /// Checks if this entry has expired.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    #[inline]
    fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.map(|exp| now >= exp).unwrap_or(false)
    }
}

/// Snapshot of store counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Keys currently held, including expired ones not yet read
    pub keys: usize,
    pub gets: u64,
    pub sets: u64,
    /// Keys removed by lazy expiry
    pub expired: u64,
}

/// The key-value store.
///
/// Meant to be created once, wrapped in an `Arc` and handed to every
/// connection task.
///
/// # Example
///
/// ```
/// use tinykv::storage::{ExpiryUnit, Store};
///
/// let store = Store::new();
///
/// store.set("name", "jane");
/// assert_eq!(store.get("name"), Some("jane".to_string()));
///
/// store.set_with_expiry("session", "abc123", ExpiryUnit::Seconds, 60);
/// assert!(store.get("session").is_some());
/// ```
#[derive(Debug, Default)]
pub struct Store {
    entries: Mutex<HashMap<String, Entry>>,
    get_count: AtomicU64,
    set_count: AtomicU64,
    expired_count: AtomicU64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the map. A poisoned lock is taken over: entries are independent,
    /// so a panicked holder cannot leave the map half-updated.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn insert(&self, key: String, entry: Entry) {
        self.set_count.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(key, entry);
    }

    /// Inserts or overwrites `key` with no expiry.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key.into(), Entry::new(value.into()));
    }

    /// Inserts or overwrites `key`, expiring `amount` units from now.
    pub fn set_with_expiry(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
        unit: ExpiryUnit,
        amount: u64,
    ) {
        self.insert(key.into(), Entry::with_ttl(value.into(), unit.duration(amount)));
    }

    /// Gets the value for a key.
    ///
    /// Returns `None` if the key doesn't exist or has expired. An expired key
    /// is removed before the lock is released.
    pub fn get(&self, key: &str) -> Option<String> {
        self.get_count.fetch_add(1, Ordering::Relaxed);

        let mut entries = self.lock();
        match entries.get(key) {
            None => return None,
            Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
            Some(_) => {}
        }

        entries.remove(key);
        self.expired_count.fetch_add(1, Ordering::Relaxed);
        trace!(key, "Lazily expired key");
        None
    }

    /// Returns the raw entry for a key without enforcing or removing expiry.
    pub fn entry(&self, key: &str) -> Option<Entry> {
        self.lock().get(key).cloned()
    }

    /// Number of keys held, expired-but-unread ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            keys: self.len(),
            gets: self.get_count.load(Ordering::Relaxed),
            sets: self.set_count.load(Ordering::Relaxed),
            expired: self.expired_count.load(Ordering::Relaxed),
        }
    }
}

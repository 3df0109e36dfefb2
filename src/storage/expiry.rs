//! Relative Expiry Units
//!
//! `SET` takes its TTL as an option word followed by an amount:
//!
//! - `PX <n>`: `n` milliseconds
//! - `EX <n>`: `n` seconds
//!
//! The store turns the pair into an absolute deadline at set time. There is
//! no background sweep: a deadline is only enforced when the key is read
//! (see [`Store::get`](crate::storage::Store::get)).

use std::time::Duration;

/// The unit a relative TTL is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryUnit {
    /// `PX`
    Milliseconds,
    /// `EX`
    Seconds,
}

impl ExpiryUnit {
    /// Parses the `SET` option word, case-insensitively.
    ///
    /// ```
    /// use tinykv::storage::ExpiryUnit;
    ///
    /// assert_eq!(ExpiryUnit::from_option("px"), Some(ExpiryUnit::Milliseconds));
    /// assert_eq!(ExpiryUnit::from_option("EX"), Some(ExpiryUnit::Seconds));
    /// assert_eq!(ExpiryUnit::from_option("NX"), None);
    /// ```
    pub fn from_option(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("PX") {
            Some(ExpiryUnit::Milliseconds)
        } else if word.eq_ignore_ascii_case("EX") {
            Some(ExpiryUnit::Seconds)
        } else {
            None
        }
    }

    /// Returns `amount` of this unit as a `Duration`.
    pub fn duration(self, amount: u64) -> Duration {
        match self {
            ExpiryUnit::Milliseconds => Duration::from_millis(amount),
            ExpiryUnit::Seconds => Duration::from_secs(amount),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExpiryUnit::Milliseconds => "PX",
            ExpiryUnit::Seconds => "EX",
        }
    }
}

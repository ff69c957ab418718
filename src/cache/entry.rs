//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored JSON document together with its expiry deadline.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized JSON value
    pub value: String,
    /// Moment the entry was written
    pub created_at: Instant,
    /// Moment the entry stops being served
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that lives for `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        let now = Instant::now();

        Self {
            value,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches the deadline, so a
    /// zero TTL entry is never served.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a caller-supplied clock.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("{\"count\":1302}".to_string(), Duration::from_secs(60));

        assert_eq!(entry.value, "{\"count\":1302}");
        assert!(!entry.is_expired());
        assert!(entry.expires_at > entry.created_at);
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("1".to_string(), Duration::from_millis(50));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("1".to_string(), Duration::from_secs(10));

        let remaining = entry.ttl_remaining();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("1".to_string(), Duration::ZERO);
        assert!(entry.is_expired_at(entry.expires_at));
        assert!(!entry.is_expired_at(entry.created_at - Duration::from_millis(1)));
    }
}

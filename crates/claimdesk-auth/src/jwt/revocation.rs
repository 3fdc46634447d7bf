//! In-process list of revoked token ids.

use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache;
use uuid::Uuid;

/// Each entry lives for the duration stored as its value.
struct RemainingLifetime;

impl Expiry<Uuid, Duration> for RemainingLifetime {
    fn expire_after_create(&self, _key: &Uuid, value: &Duration, _created_at: Instant) -> Option<Duration> {
        Some(*value)
    }
}

/// Revoked `jti`s, each remembered until its token would have expired anyway.
///
/// The list has no size bound. Entries only leave through their own TTL, so
/// a revoked token can never be evicted back into validity.
#[derive(Clone)]
pub struct RevocationList {
    cache: Cache<Uuid, Duration>,
}

impl std::fmt::Debug for RevocationList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevocationList")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl RevocationList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().expire_after(RemainingLifetime).build(),
        }
    }

    /// Revoke `jti` for `ttl`. A zero TTL is a no-op.
    pub async fn revoke(&self, jti: Uuid, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }
        self.cache.insert(jti, ttl).await;
    }

    /// Whether `jti` is currently revoked.
    pub fn is_revoked(&self, jti: &Uuid) -> bool {
        self.cache.contains_key(jti)
    }
}

impl Default for RevocationList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_revoke_and_lookup() {
        let list = RevocationList::new();
        let jti = Uuid::new_v4();
        assert!(!list.is_revoked(&jti));
        list.revoke(jti, Duration::from_secs(60)).await;
        assert!(list.is_revoked(&jti));
        assert!(!list.is_revoked(&Uuid::new_v4()));
    }

    #[tokio::test]
    async fn test_zero_ttl_is_ignored() {
        let list = RevocationList::new();
        let jti = Uuid::new_v4();
        list.revoke(jti, Duration::ZERO).await;
        assert!(!list.is_revoked(&jti));
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let list = RevocationList::new();
        let jti = Uuid::new_v4();
        list.revoke(jti, Duration::from_millis(50)).await;
        assert!(list.is_revoked(&jti));
        std::thread::sleep(Duration::from_millis(200));
        assert!(!list.is_revoked(&jti));
    }

    #[tokio::test]
    async fn test_bulk_revocations_are_all_kept() {
        let list = RevocationList::new();
        let ids: Vec<Uuid> = (0..20_000).map(|_| Uuid::new_v4()).collect();
        for jti in &ids {
            list.revoke(*jti, Duration::from_secs(3600)).await;
        }
        list.cache.run_pending_tasks().await;

        let kept = ids.iter().filter(|jti| list.is_revoked(jti)).count();
        assert_eq!(kept, ids.len());
        assert_eq!(list.cache.entry_count(), ids.len() as u64);
    }
}

/**
 * Short-lived cache of verified principals, so a burst of requests from the
 * same subject costs one remote probe. Entries are keyed by a SHA-256
 * digest of the credentials; cleartext passwords are never stored.
 */
use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use super::{Credentials, Principal};

// Expired entries are only swept once the map grows past this size.
const SWEEP_THRESHOLD: usize = 1024;

struct CacheEntry {
    principal: Principal,
    /// `None` when the TTL is too large to represent; such entries never expire.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| expires_at > now)
    }
}

pub struct PrincipalCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl PrincipalCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn key(credentials: &Credentials) -> String {
        let mut hasher = Sha256::new();
        hasher.update((credentials.username().len() as u64).to_be_bytes());
        hasher.update(credentials.username().as_bytes());
        hasher.update(credentials.password().as_bytes());
        hex::encode(hasher.finalize())
    }

    /**
     * Returns the cached principal for these exact credentials, if it has not expired.
     */
    pub fn get(&self, credentials: &Credentials) -> Option<Principal> {
        let key = Self::key(credentials);
        let mut entries = self.entries.lock();
        match entries.get(&key) {
            Some(entry) if entry.is_live(Instant::now()) => Some(entry.principal.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, credentials: &Credentials, principal: Principal) {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        if entries.len() >= SWEEP_THRESHOLD {
            entries.retain(|_, entry| entry.is_live(now));
        }
        entries.insert(
            Self::key(credentials),
            CacheEntry {
                principal,
                expires_at: now.checked_add(self.ttl),
            },
        );
    }

    pub fn invalidate(&self, credentials: &Credentials) {
        self.entries.lock().remove(&Self::key(credentials));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_after_insert() {
        let cache = PrincipalCache::new(Duration::from_secs(60));
        let credentials = Credentials::new("popeye", "spinach");
        assert!(cache.get(&credentials).is_none());

        cache.insert(&credentials, Principal::new("popeye", "url"));
        assert_eq!(cache.get(&credentials), Some(Principal::new("popeye", "url")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_different_password_misses() {
        let cache = PrincipalCache::new(Duration::from_secs(60));
        cache.insert(&Credentials::new("popeye", "spinach"), Principal::new("popeye", "url"));
        assert!(cache.get(&Credentials::new("popeye", "cake")).is_none());
    }

    #[test]
    fn test_username_password_boundary_is_unambiguous() {
        let cache = PrincipalCache::new(Duration::from_secs(60));
        cache.insert(&Credentials::new("ab", "c"), Principal::new("ab", "url"));
        assert!(cache.get(&Credentials::new("a", "bc")).is_none());
    }

    #[test]
    fn test_entries_expire() {
        let cache = PrincipalCache::new(Duration::from_millis(20));
        let credentials = Credentials::new("popeye", "spinach");
        cache.insert(&credentials, Principal::new("popeye", "url"));
        std::thread::sleep(Duration::from_millis(40));
        assert!(cache.get(&credentials).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let cache = PrincipalCache::new(Duration::from_secs(u64::MAX));
        let credentials = Credentials::new("popeye", "spinach");
        cache.insert(&credentials, Principal::new("popeye", "url"));
        assert_eq!(cache.get(&credentials), Some(Principal::new("popeye", "url")));
    }

    #[test]
    fn test_expired_entries_swept_when_full() {
        let cache = PrincipalCache::new(Duration::from_millis(10));
        for i in 0..SWEEP_THRESHOLD {
            let name = format!("user{i}");
            cache.insert(&Credentials::new(name.as_str(), "pw"), Principal::new(name.as_str(), "url"));
        }
        assert_eq!(cache.len(), SWEEP_THRESHOLD);
        std::thread::sleep(Duration::from_millis(30));

        cache.insert(&Credentials::new("popeye", "spinach"), Principal::new("popeye", "url"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entries_kept_below_threshold() {
        let cache = PrincipalCache::new(Duration::from_millis(10));
        cache.insert(&Credentials::new("olive", "oyl"), Principal::new("olive", "url"));
        std::thread::sleep(Duration::from_millis(30));

        cache.insert(&Credentials::new("popeye", "spinach"), Principal::new("popeye", "url"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_invalidate() {
        let cache = PrincipalCache::new(Duration::from_secs(60));
        let credentials = Credentials::new("popeye", "spinach");
        cache.insert(&credentials, Principal::new("popeye", "url"));
        cache.invalidate(&credentials);
        assert!(cache.get(&credentials).is_none());
    }

    #[test]
    fn test_key_does_not_contain_password() {
        let key = PrincipalCache::key(&Credentials::new("popeye", "spinach"));
        assert_eq!(key.len(), 64);
        assert!(!key.contains("spinach"));
    }
}

use std::sync::Arc;
use std::time::{Duration, Instant};

use credo_crypto::PublicKeyMaterial;
use dashmap::DashMap;

struct CacheEntry {
    key: Arc<PublicKeyMaterial>,
    inserted_at: Instant,
}

/// Concurrent cache of resolved key material, keyed by verification
/// method id. Entries expire on read once the TTL has passed; a `None`
/// TTL caches forever.
pub struct KeyCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Option<Duration>,
}

impl KeyCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, verification_method: &str) -> Option<Arc<PublicKeyMaterial>> {
        let entry = self.entries.get(verification_method)?;
        if let Some(ttl) = self.ttl {
            if entry.inserted_at.elapsed() >= ttl {
                drop(entry);
                self.entries.remove(verification_method);
                return None;
            }
        }
        Some(Arc::clone(&entry.key))
    }

    pub fn insert(&self, verification_method: &str, key: Arc<PublicKeyMaterial>) {
        self.entries.insert(
            verification_method.to_string(),
            CacheEntry {
                key,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop one entry, forcing a fresh fetch on the next lookup. Used
    /// after issuer key rotation.
    pub fn invalidate(&self, verification_method: &str) {
        self.entries.remove(verification_method);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KeyCache {
    fn default() -> Self {
        Self::new(Some(Self::DEFAULT_TTL))
    }
}

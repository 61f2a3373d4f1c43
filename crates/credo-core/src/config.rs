use serde::{Deserialize, Serialize};

/// Configuration for a Credo verifier instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Seconds a resolved key stays cached. `None` disables expiry;
    /// stale keys after signer key-rotation then require an explicit
    /// cache invalidation.
    pub key_cache_ttl_secs: Option<u64>,
    /// Digest algorithm name used over the canonical form.
    pub digest_algorithm: String,
    /// When true, terms without a context definition are dropped during
    /// canonicalization instead of failing.
    pub lenient_context: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            key_cache_ttl_secs: Some(300),
            digest_algorithm: "SHA-256".into(),
            lenient_context: false,
        }
    }
}

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::error::FetchError;

/// Retrieves the verification-method document for a
/// `verificationMethod` id. Implementations hit whatever backend holds
/// issuer keys: a DID resolver, a registry service, a local store.
#[async_trait]
pub trait MethodFetcher: Send + Sync {
    async fn fetch(&self, verification_method: &str) -> Result<Value, FetchError>;
}

/// In-memory fetcher backed by a concurrent map. Used in tests and for
/// deployments that pre-load issuer keys.
#[derive(Default)]
pub struct StaticMethodFetcher {
    methods: DashMap<String, Value>,
}

impl StaticMethodFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, verification_method: impl Into<String>, document: Value) {
        self.methods.insert(verification_method.into(), document);
    }

    pub fn remove(&self, verification_method: &str) {
        self.methods.remove(verification_method);
    }
}

#[async_trait]
impl MethodFetcher for StaticMethodFetcher {
    async fn fetch(&self, verification_method: &str) -> Result<Value, FetchError> {
        self.methods
            .get(verification_method)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| FetchError::NotFound(verification_method.to_string()))
    }
}

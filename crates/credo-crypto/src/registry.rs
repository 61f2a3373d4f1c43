use std::collections::HashMap;
use std::sync::Arc;

use crate::error::CryptoError;
use crate::suites::{
    EcdsaSecp256k1Suite, Ed25519Signature2018Suite, Ed25519Signature2020Suite, SignatureSuite,
};

/// Maps proof `type` strings to signature suites.
///
/// Built once at verifier construction and shared read-only after
/// that, so lookups never take a lock.
pub struct SuiteRegistry {
    suites: HashMap<String, Arc<dyn SignatureSuite>>,
}

impl SuiteRegistry {
    pub fn new() -> Self {
        Self {
            suites: HashMap::new(),
        }
    }

    /// A registry with every built-in suite registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(Ed25519Signature2020Suite));
        registry.register(Arc::new(Ed25519Signature2018Suite));
        registry.register(Arc::new(EcdsaSecp256k1Suite));
        registry
    }

    /// Register a suite under its own `suite_id`. Replaces any suite
    /// previously registered under the same id.
    pub fn register(&mut self, suite: Arc<dyn SignatureSuite>) {
        self.suites.insert(suite.suite_id().to_string(), suite);
    }

    pub fn get(&self, suite_id: &str) -> Option<Arc<dyn SignatureSuite>> {
        self.suites.get(suite_id).cloned()
    }

    /// Like `get`, but an unknown id is an error.
    pub fn resolve(&self, suite_id: &str) -> Result<Arc<dyn SignatureSuite>, CryptoError> {
        self.get(suite_id)
            .ok_or_else(|| CryptoError::UnsupportedSuite(suite_id.to_string()))
    }

    pub fn suite_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.suites.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

impl Default for SuiteRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Where a credential currently sits with its issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    Active,
    Revoked,
    Suspended,
}

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("status service unavailable: {0}")]
    Unavailable(String),

    #[error("unusable credentialStatus entry: {0}")]
    Malformed(String),
}

/// Checks a credential's `credentialStatus` entry against its backing
/// status list. Only consulted when the credential carries one.
#[async_trait]
pub trait StatusChecker: Send + Sync {
    async fn check(&self, credential_status: &Value) -> Result<CredentialStatus, StatusError>;
}

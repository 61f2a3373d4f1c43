use thiserror::Error;

/// Failures while fetching a verification-method document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("verification method not found: {0}")]
    NotFound(String),

    #[error("fetcher unavailable: {0}")]
    Unavailable(String),
}

/// Failures while resolving a verification method to key material.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("verification method not found: {0}")]
    NotFound(String),

    #[error("unusable key material: {0}")]
    KeyFormat(String),

    #[error("resolver collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),
}

impl From<FetchError> for ResolveError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound(id) => ResolveError::NotFound(id),
            FetchError::Unavailable(reason) => ResolveError::CollaboratorUnavailable(reason),
        }
    }
}

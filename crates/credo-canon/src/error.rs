/// Canonicalization errors.
#[derive(Debug, thiserror::Error)]
pub enum CanonError {
    #[error("no context definition for term: {0}")]
    UnresolvableTerm(String),

    #[error("ambiguous claim value: {0}")]
    AmbiguousValue(String),

    #[error("invalid document structure: {0}")]
    InvalidDocument(String),
}

/// Digest engine errors.
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

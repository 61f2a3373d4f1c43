/// Core model errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("unsupported credential format: {0}")]
    UnsupportedFormat(String),
}

use crate::keys::KeyAlgorithm;

/// Cryptographic layer errors.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("malformed signature encoding: {0}")]
    InvalidSignatureEncoding(String),

    #[error("suite {suite} expects a {expected} key, got {actual}")]
    WrongCurveKey {
        suite: &'static str,
        expected: KeyAlgorithm,
        actual: KeyAlgorithm,
    },

    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("no registered suite for proof type: {0}")]
    UnsupportedSuite(String),
}

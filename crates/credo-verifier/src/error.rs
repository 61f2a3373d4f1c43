use credo_canon::{CanonError, DigestError};
use credo_core::codes;
use credo_core::CoreError;
use credo_crypto::CryptoError;
use credo_resolver::ResolveError;
use thiserror::Error;

use crate::status::StatusError;

/// Any failure the verification pipeline can hit. Each variant maps to
/// one stable error code for the reported result.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(transparent)]
    Credential(#[from] CoreError),

    #[error(transparent)]
    Canonicalization(#[from] CanonError),

    #[error(transparent)]
    Digest(#[from] DigestError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Status(#[from] StatusError),

    #[error("deadline exceeded during {stage}")]
    DeadlineExceeded { stage: &'static str },
}

impl VerifyError {
    /// The stable code reported for this failure.
    pub fn error_code(&self) -> &'static str {
        match self {
            VerifyError::Credential(_) => codes::MALFORMED_CREDENTIAL,
            VerifyError::Canonicalization(_) => codes::CANONICALIZATION_ERROR,
            VerifyError::Digest(_) => codes::UNSUPPORTED_ALGORITHM,
            VerifyError::Crypto(err) => match err {
                CryptoError::UnsupportedSuite(_) => codes::UNSUPPORTED_SUITE,
                CryptoError::InvalidKeyMaterial(_) => codes::KEY_FORMAT_ERROR,
                CryptoError::InvalidSignatureEncoding(_) | CryptoError::WrongCurveKey { .. } => {
                    codes::INVALID_SIGNATURE_ENCODING
                }
            },
            VerifyError::Resolve(err) => match err {
                ResolveError::NotFound(_) => codes::KEY_RESOLUTION_ERROR,
                ResolveError::KeyFormat(_) => codes::KEY_FORMAT_ERROR,
                ResolveError::CollaboratorUnavailable(_) => codes::COLLABORATOR_UNAVAILABLE,
            },
            VerifyError::Status(_) => codes::COLLABORATOR_UNAVAILABLE,
            VerifyError::DeadlineExceeded { .. } => codes::TIMEOUT,
        }
    }
}

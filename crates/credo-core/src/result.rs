use serde::{Deserialize, Serialize};

use crate::codes;

/// The outcome of one verification call.
///
/// Write-once: constructed at the end of orchestration and never mutated.
/// The field names in the serialized form (`verificationStatus`,
/// `verificationMessage`, `verificationErrorCode`) are the external
/// contract other components depend on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// Whether the proof verified.
    pub verification_status: bool,
    /// Human-readable detail. Empty on a clean success.
    pub verification_message: String,
    /// Stable machine-readable code from [`crate::codes`]. Empty on a
    /// clean success.
    pub verification_error_code: String,
}

impl VerificationResult {
    /// A clean success: `{true, "", ""}`.
    pub fn success() -> Self {
        Self {
            verification_status: true,
            verification_message: String::new(),
            verification_error_code: String::new(),
        }
    }

    /// A success carrying a non-fatal condition, e.g. an expired
    /// credential whose signature still verifies.
    pub fn success_with(message: impl Into<String>, error_code: &str) -> Self {
        Self {
            verification_status: true,
            verification_message: message.into(),
            verification_error_code: error_code.to_string(),
        }
    }

    /// A failure with a stable code and a human-readable message.
    pub fn failure(error_code: &str, message: impl Into<String>) -> Self {
        Self {
            verification_status: false,
            verification_message: message.into(),
            verification_error_code: error_code.to_string(),
        }
    }

    /// A signature mismatch: the pipeline completed, the signature did
    /// not check out. Distinguished from genuine pipeline errors.
    pub fn mismatch() -> Self {
        Self::failure(codes::SIGNATURE_MISMATCH, "signature mismatch")
    }
}

//! Linked-Data-Proof verification pipeline.
//!
//! [`LdpVerifier`] ties the other crates together: it extracts the
//! embedded proof, canonicalizes the remaining document, digests it,
//! resolves the issuer's key, and checks the signature with the suite
//! the proof names. Outcomes are reported as
//! [`credo_core::VerificationResult`] values; pipeline failures carry a
//! stable error code, a signature that simply does not check out is a
//! mismatch, not an error.

pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod status;
pub mod validator;

pub use error::VerifyError;
pub use extractor::extract_proof;
pub use pipeline::{LdpVerifier, LdpVerifierBuilder, VerifyOptions};
pub use status::{CredentialStatus, StatusChecker, StatusError};
pub use validator::{validate_structure, ValidationOutcome};

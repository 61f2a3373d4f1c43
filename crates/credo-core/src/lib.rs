//! Credo Core — Fundamental types for the Credo verification engine.
//!
//! - Credential document model and proof block
//! - `VerificationResult`, the single externally visible output
//! - Stable machine-readable error codes
//! - Verifier configuration

pub mod codes;
pub mod config;
pub mod document;
pub mod error;
pub mod proof;
pub mod result;

pub use config::VerifierConfig;
pub use document::{CredentialDocument, CredentialFormat};
pub use error::CoreError;
pub use proof::{Proof, ProofPurpose};
pub use result::VerificationResult;

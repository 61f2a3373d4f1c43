//! Credo Crypto — Key material, signature suites, and the suite registry.
//!
//! A suite consumes a verification digest, a proof block, and resolved
//! public key material, and answers with a boolean. Cryptographically
//! invalid signatures are `Ok(false)`, never errors; errors are reserved
//! for malformed input.

pub mod error;
pub mod jws;
pub mod keys;
pub mod registry;
pub mod suites;

pub use error::CryptoError;
pub use jws::DetachedJws;
pub use keys::{EcdsaKeyPair, KeyAlgorithm, KeyPair, PublicKeyMaterial};
pub use registry::SuiteRegistry;
pub use suites::{
    EcdsaSecp256k1Suite, Ed25519Signature2018Suite, Ed25519Signature2020Suite, SignatureSuite,
};

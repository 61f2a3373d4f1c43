//! Verification-method fetching and public key resolution.
//!
//! A [`MethodFetcher`] retrieves the verification-method document for a
//! proof's `verificationMethod` id; [`KeyResolver`] decodes whichever
//! key encoding the document carries into [`credo_crypto::PublicKeyMaterial`]
//! and caches the result.

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod resolver;

pub use cache::KeyCache;
pub use error::{FetchError, ResolveError};
pub use fetcher::{MethodFetcher, StaticMethodFetcher};
pub use resolver::KeyResolver;

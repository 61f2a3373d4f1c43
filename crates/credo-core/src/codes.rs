//! Stable machine-readable error codes.
//!
//! These strings are part of the external contract: callers branch on
//! them and regression tests pin them. Never change an existing value.

/// Missing/duplicate proof block, missing proof fields, or a structural
/// validation failure.
pub const MALFORMED_CREDENTIAL: &str = "MALFORMED_CREDENTIAL";

/// A term in the document has no context definition, or a claim value has
/// an ambiguous type.
pub const CANONICALIZATION_ERROR: &str = "CANONICALIZATION_ERROR";

/// Unknown digest algorithm name.
pub const UNSUPPORTED_ALGORITHM: &str = "UNSUPPORTED_ALGORITHM";

/// The verification method does not exist (definitive answer).
pub const KEY_RESOLUTION_ERROR: &str = "KEY_RESOLUTION_ERROR";

/// The resolved key material is malformed.
pub const KEY_FORMAT_ERROR: &str = "KEY_FORMAT_ERROR";

/// The fetch or status collaborator itself failed; the caller may retry
/// the whole verify call.
pub const COLLABORATOR_UNAVAILABLE: &str = "COLLABORATOR_UNAVAILABLE";

/// The proof type has no registered signature suite.
pub const UNSUPPORTED_SUITE: &str = "UNSUPPORTED_SUITE";

/// The signature container (multibase, base58, JWS) is malformed, or the
/// key is on the wrong curve for the suite.
pub const INVALID_SIGNATURE_ENCODING: &str = "INVALID_SIGNATURE_ENCODING";

/// The caller-supplied deadline fired.
pub const TIMEOUT: &str = "TIMEOUT";

/// The signature check returned false. Not a pipeline error.
pub const SIGNATURE_MISMATCH: &str = "SIGNATURE_MISMATCH";

/// The status collaborator reports the credential revoked or suspended.
pub const REVOKED: &str = "REVOKED";

/// The credential is past its expiration date. Reported on an
/// otherwise-valid result; does not fail verification by itself.
pub const VC_EXPIRED: &str = "VC_EXPIRED";

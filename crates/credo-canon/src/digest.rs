use sha2::{Digest, Sha256, Sha384};

use crate::error::DigestError;

/// Digest algorithms registered with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// SHA-256 (32-byte digest). The default for Linked-Data Proofs.
    Sha256,
    /// SHA-384 (48-byte digest).
    Sha384,
    /// BLAKE3 (32-byte digest).
    Blake3,
}

impl DigestAlgorithm {
    /// Look up an algorithm by name.
    pub fn from_name(name: &str) -> Result<Self, DigestError> {
        match name.to_ascii_uppercase().as_str() {
            "SHA-256" | "SHA256" => Ok(Self::Sha256),
            "SHA-384" | "SHA384" => Ok(Self::Sha384),
            "BLAKE3" => Ok(Self::Blake3),
            _ => Err(DigestError::UnsupportedAlgorithm(name.to_string())),
        }
    }

    /// Canonical algorithm name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Blake3 => "BLAKE3",
        }
    }

    /// Digest size in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha256 | Self::Blake3 => 32,
            Self::Sha384 => 48,
        }
    }

    /// Hash canonical bytes into a verification digest.
    pub fn digest(&self, bytes: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(bytes).to_vec(),
            Self::Sha384 => Sha384::digest(bytes).to_vec(),
            Self::Blake3 => blake3::hash(bytes).as_bytes().to_vec(),
        }
    }

    /// All registered algorithm names.
    pub fn supported() -> &'static [&'static str] {
        &["SHA-256", "SHA-384", "BLAKE3"]
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

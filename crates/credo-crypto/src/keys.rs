use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

/// Curve/algorithm tag of resolved key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    /// Ed25519 (32-byte raw public key).
    Ed25519,
    /// secp256k1 ECDSA (SEC1-encoded point, 33 or 65 bytes).
    EcdsaSecp256k1,
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyAlgorithm::Ed25519 => write!(f, "Ed25519"),
            KeyAlgorithm::EcdsaSecp256k1 => write!(f, "EcdsaSecp256k1"),
        }
    }
}

/// Resolved public key material: raw key bytes plus the algorithm tag.
///
/// Owned by the key resolver; handed to suites by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyMaterial {
    /// The verification method id this key was resolved from.
    pub id: String,
    /// Curve/algorithm tag.
    pub algorithm: KeyAlgorithm,
    /// Raw encoded key bytes.
    pub bytes: Vec<u8>,
}

impl PublicKeyMaterial {
    /// Construct, validating the byte length against the algorithm.
    pub fn new(
        id: impl Into<String>,
        algorithm: KeyAlgorithm,
        bytes: Vec<u8>,
    ) -> Result<Self, CryptoError> {
        let valid = match algorithm {
            KeyAlgorithm::Ed25519 => bytes.len() == 32,
            KeyAlgorithm::EcdsaSecp256k1 => matches!(bytes.len(), 33 | 65),
        };
        if !valid {
            return Err(CryptoError::InvalidKeyMaterial(format!(
                "{algorithm} key has invalid length {}",
                bytes.len()
            )));
        }
        Ok(Self {
            id: id.into(),
            algorithm,
            bytes,
        })
    }
}

/// An Ed25519 keypair. Verification-side code never needs one; tests and
/// embedding issuers do.
pub struct KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

impl KeyPair {
    /// Generate a fresh random keypair.
    pub fn generate() -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministic keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// Sign a message, returning the 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        use ed25519_dalek::Signer;
        self.signing_key.sign(message).to_bytes()
    }

    /// Raw 32-byte public key.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Public key material tagged with a verification method id.
    pub fn public_key_material(&self, id: impl Into<String>) -> PublicKeyMaterial {
        PublicKeyMaterial {
            id: id.into(),
            algorithm: KeyAlgorithm::Ed25519,
            bytes: self.public_key_bytes().to_vec(),
        }
    }
}

/// A secp256k1 ECDSA keypair for the ES256K suite.
pub struct EcdsaKeyPair {
    signing_key: k256::ecdsa::SigningKey,
}

impl EcdsaKeyPair {
    /// Generate a fresh random keypair.
    pub fn generate() -> Self {
        Self {
            signing_key: k256::ecdsa::SigningKey::random(&mut OsRng),
        }
    }

    /// Sign a message (SHA-256 prehash per ES256K), returning r||s.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        use k256::ecdsa::signature::Signer;
        let signature: k256::ecdsa::Signature = self.signing_key.sign(message);
        let mut out = [0u8; 64];
        out.copy_from_slice(&signature.to_bytes());
        out
    }

    /// SEC1 compressed public key (33 bytes).
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.signing_key
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec()
    }

    /// Public key material tagged with a verification method id.
    pub fn public_key_material(&self, id: impl Into<String>) -> PublicKeyMaterial {
        PublicKeyMaterial {
            id: id.into(),
            algorithm: KeyAlgorithm::EcdsaSecp256k1,
            bytes: self.public_key_bytes(),
        }
    }
}

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use credo_core::VerifierConfig;
use credo_crypto::{KeyAlgorithm, PublicKeyMaterial};
use serde_json::Value;
use tracing::debug;

use crate::cache::KeyCache;
use crate::error::ResolveError;
use crate::fetcher::MethodFetcher;

// Multicodec varint prefixes used in publicKeyMultibase.
const MULTICODEC_ED25519: [u8; 2] = [0xed, 0x01];
const MULTICODEC_SECP256K1: [u8; 2] = [0xe7, 0x01];

// SPKI header for an Ed25519 public key (RFC 8410); the raw 32-byte
// point follows it.
const ED25519_SPKI_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

/// Resolves `verificationMethod` ids to public key material, caching
/// results. Decoding covers the key encodings that appear in
/// verification-method documents in the wild: multibase, base58, hex,
/// JWK, and PEM.
pub struct KeyResolver {
    fetcher: Arc<dyn MethodFetcher>,
    cache: KeyCache,
}

impl KeyResolver {
    pub fn new(fetcher: Arc<dyn MethodFetcher>) -> Self {
        Self {
            fetcher,
            cache: KeyCache::default(),
        }
    }

    pub fn with_cache_ttl(fetcher: Arc<dyn MethodFetcher>, ttl: Option<Duration>) -> Self {
        Self {
            fetcher,
            cache: KeyCache::new(ttl),
        }
    }

    /// Build from shared verifier configuration.
    pub fn from_config(fetcher: Arc<dyn MethodFetcher>, config: &VerifierConfig) -> Self {
        Self::with_cache_ttl(fetcher, config.key_cache_ttl_secs.map(Duration::from_secs))
    }

    /// Drop the cached key for one verification method.
    pub fn invalidate(&self, verification_method: &str) {
        self.cache.invalidate(verification_method);
    }

    pub async fn resolve(
        &self,
        verification_method: &str,
    ) -> Result<Arc<PublicKeyMaterial>, ResolveError> {
        if let Some(cached) = self.cache.get(verification_method) {
            debug!(verification_method, "key cache hit");
            return Ok(cached);
        }
        let document = self.fetcher.fetch(verification_method).await?;
        let key = Arc::new(decode_verification_method(verification_method, &document)?);
        self.cache.insert(verification_method, Arc::clone(&key));
        Ok(key)
    }
}

/// Decode whichever key encoding the document carries.
pub fn decode_verification_method(
    id: &str,
    document: &Value,
) -> Result<PublicKeyMaterial, ResolveError> {
    if let Some(multibase) = document.get("publicKeyMultibase").and_then(Value::as_str) {
        return decode_multibase_key(id, multibase);
    }
    if let Some(b58) = document.get("publicKeyBase58").and_then(Value::as_str) {
        let bytes = bs58::decode(b58)
            .into_vec()
            .map_err(|e| ResolveError::KeyFormat(format!("publicKeyBase58: {e}")))?;
        return material_from_raw(id, bytes);
    }
    if let Some(hex_str) = document.get("publicKeyHex").and_then(Value::as_str) {
        let bytes = hex::decode(hex_str)
            .map_err(|e| ResolveError::KeyFormat(format!("publicKeyHex: {e}")))?;
        return material_from_raw(id, bytes);
    }
    if let Some(jwk) = document.get("publicKeyJwk") {
        return decode_jwk(id, jwk);
    }
    if let Some(pem) = document.get("publicKeyPem").and_then(Value::as_str) {
        return decode_pem(id, pem);
    }
    Err(ResolveError::KeyFormat(format!(
        "no usable key encoding in verification method {id}"
    )))
}

fn decode_multibase_key(id: &str, multibase: &str) -> Result<PublicKeyMaterial, ResolveError> {
    let rest = multibase.strip_prefix('z').ok_or_else(|| {
        ResolveError::KeyFormat("publicKeyMultibase must be base58btc ('z' prefix)".into())
    })?;
    let bytes = bs58::decode(rest)
        .into_vec()
        .map_err(|e| ResolveError::KeyFormat(format!("publicKeyMultibase: {e}")))?;
    if let Some(raw) = bytes.strip_prefix(&MULTICODEC_ED25519) {
        return PublicKeyMaterial::new(id, KeyAlgorithm::Ed25519, raw.to_vec())
            .map_err(|e| ResolveError::KeyFormat(e.to_string()));
    }
    if let Some(raw) = bytes.strip_prefix(&MULTICODEC_SECP256K1) {
        return PublicKeyMaterial::new(id, KeyAlgorithm::EcdsaSecp256k1, raw.to_vec())
            .map_err(|e| ResolveError::KeyFormat(e.to_string()));
    }
    Err(ResolveError::KeyFormat(
        "publicKeyMultibase carries an unknown multicodec prefix".into(),
    ))
}

// Base58 and hex encodings carry raw bytes; the curve is inferred from
// the length. 32 bytes is an Ed25519 point, 33 or 65 a SEC1 secp256k1
// point.
fn material_from_raw(id: &str, bytes: Vec<u8>) -> Result<PublicKeyMaterial, ResolveError> {
    let algorithm = match bytes.len() {
        32 => KeyAlgorithm::Ed25519,
        33 | 65 => KeyAlgorithm::EcdsaSecp256k1,
        len => {
            return Err(ResolveError::KeyFormat(format!(
                "cannot infer key algorithm from {len}-byte key"
            )))
        }
    };
    PublicKeyMaterial::new(id, algorithm, bytes).map_err(|e| ResolveError::KeyFormat(e.to_string()))
}

fn decode_jwk(id: &str, jwk: &Value) -> Result<PublicKeyMaterial, ResolveError> {
    let kty = jwk.get("kty").and_then(Value::as_str).unwrap_or_default();
    let crv = jwk.get("crv").and_then(Value::as_str).unwrap_or_default();
    match (kty, crv) {
        ("OKP", "Ed25519") => {
            let x = jwk
                .get("x")
                .and_then(Value::as_str)
                .ok_or_else(|| ResolveError::KeyFormat("OKP jwk missing x".into()))?;
            let bytes = URL_SAFE_NO_PAD
                .decode(x)
                .map_err(|e| ResolveError::KeyFormat(format!("jwk x: {e}")))?;
            PublicKeyMaterial::new(id, KeyAlgorithm::Ed25519, bytes)
                .map_err(|e| ResolveError::KeyFormat(e.to_string()))
        }
        ("EC", "secp256k1") => {
            let x = jwk
                .get("x")
                .and_then(Value::as_str)
                .ok_or_else(|| ResolveError::KeyFormat("EC jwk missing x".into()))?;
            let y = jwk
                .get("y")
                .and_then(Value::as_str)
                .ok_or_else(|| ResolveError::KeyFormat("EC jwk missing y".into()))?;
            let x = URL_SAFE_NO_PAD
                .decode(x)
                .map_err(|e| ResolveError::KeyFormat(format!("jwk x: {e}")))?;
            let y = URL_SAFE_NO_PAD
                .decode(y)
                .map_err(|e| ResolveError::KeyFormat(format!("jwk y: {e}")))?;
            if x.len() != 32 || y.len() != 32 {
                return Err(ResolveError::KeyFormat(
                    "EC jwk coordinates must be 32 bytes".into(),
                ));
            }
            // Uncompressed SEC1 point.
            let mut bytes = Vec::with_capacity(65);
            bytes.push(0x04);
            bytes.extend_from_slice(&x);
            bytes.extend_from_slice(&y);
            PublicKeyMaterial::new(id, KeyAlgorithm::EcdsaSecp256k1, bytes)
                .map_err(|e| ResolveError::KeyFormat(e.to_string()))
        }
        _ => Err(ResolveError::KeyFormat(format!(
            "unsupported jwk kty={kty} crv={crv}"
        ))),
    }
}

fn decode_pem(id: &str, pem: &str) -> Result<PublicKeyMaterial, ResolveError> {
    let body: String = pem
        .lines()
        .filter(|line| !line.starts_with("-----"))
        .collect();
    let der = STANDARD
        .decode(body.trim())
        .map_err(|e| ResolveError::KeyFormat(format!("publicKeyPem: {e}")))?;
    let raw = der.strip_prefix(&ED25519_SPKI_PREFIX).ok_or_else(|| {
        ResolveError::KeyFormat("publicKeyPem is not an Ed25519 SubjectPublicKeyInfo".into())
    })?;
    PublicKeyMaterial::new(id, KeyAlgorithm::Ed25519, raw.to_vec())
        .map_err(|e| ResolveError::KeyFormat(e.to_string()))
}

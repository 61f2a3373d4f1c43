use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::CryptoError;

/// A detached compact JWS (`<protected>..<signature>`), the signature
/// carrier for JOSE-based suites.
///
/// The signing input follows the detached-payload convention: the
/// ASCII protected header, a `.`, then the raw payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedJws {
    protected_b64: String,
    /// The `alg` header value.
    pub algorithm: String,
    /// Decoded signature bytes.
    pub signature: Vec<u8>,
}

impl DetachedJws {
    /// Parse a detached compact serialization.
    pub fn parse(compact: &str) -> Result<Self, CryptoError> {
        let parts: Vec<&str> = compact.split('.').collect();
        if parts.len() != 3 {
            return Err(CryptoError::InvalidSignatureEncoding(
                "jws must have three dot-separated segments".into(),
            ));
        }
        if !parts[1].is_empty() {
            return Err(CryptoError::InvalidSignatureEncoding(
                "jws payload must be detached".into(),
            ));
        }

        let header_bytes = URL_SAFE_NO_PAD.decode(parts[0]).map_err(|e| {
            CryptoError::InvalidSignatureEncoding(format!("jws header base64: {e}"))
        })?;
        let header: serde_json::Value = serde_json::from_slice(&header_bytes).map_err(|e| {
            CryptoError::InvalidSignatureEncoding(format!("jws header json: {e}"))
        })?;
        let algorithm = header
            .get("alg")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| {
                CryptoError::InvalidSignatureEncoding("jws header missing alg".into())
            })?
            .to_string();

        let signature = URL_SAFE_NO_PAD.decode(parts[2]).map_err(|e| {
            CryptoError::InvalidSignatureEncoding(format!("jws signature base64: {e}"))
        })?;

        Ok(Self {
            protected_b64: parts[0].to_string(),
            algorithm,
            signature,
        })
    }

    /// The bytes actually signed: `ASCII(protected) || '.' || payload`.
    pub fn signing_input(&self, payload: &[u8]) -> Vec<u8> {
        let mut input = Vec::with_capacity(self.protected_b64.len() + 1 + payload.len());
        input.extend_from_slice(self.protected_b64.as_bytes());
        input.push(b'.');
        input.extend_from_slice(payload);
        input
    }

    /// Build a detached compact JWS from an algorithm name and a signer
    /// closure over the signing input. Test/issuance helper.
    pub fn create<F>(algorithm: &str, payload: &[u8], sign: F) -> String
    where
        F: FnOnce(&[u8]) -> Vec<u8>,
    {
        let header = serde_json::json!({"alg": algorithm, "b64": false, "crit": ["b64"]});
        let protected_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap());
        let mut input = Vec::with_capacity(protected_b64.len() + 1 + payload.len());
        input.extend_from_slice(protected_b64.as_bytes());
        input.push(b'.');
        input.extend_from_slice(payload);
        let signature = sign(&input);
        format!("{protected_b64}..{}", URL_SAFE_NO_PAD.encode(signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_parse_roundtrip() {
        let jws = DetachedJws::create("EdDSA", b"payload", |input| {
            assert!(input.ends_with(b".payload"));
            vec![0xAB; 64]
        });
        let parsed = DetachedJws::parse(&jws).unwrap();
        assert_eq!(parsed.algorithm, "EdDSA");
        assert_eq!(parsed.signature, vec![0xAB; 64]);
    }

    #[test]
    fn test_signing_input_shape() {
        let jws = DetachedJws::create("ES256K", b"digest", |_| vec![1, 2, 3]);
        let parsed = DetachedJws::parse(&jws).unwrap();
        let input = parsed.signing_input(b"digest");
        assert!(input.ends_with(b".digest"));
        assert_eq!(input[..input.len() - 7], *jws.split('.').next().unwrap().as_bytes());
    }

    #[test]
    fn test_two_segments_rejected() {
        assert!(DetachedJws::parse("onlyheader.sig").is_err());
    }

    #[test]
    fn test_attached_payload_rejected() {
        assert!(DetachedJws::parse("aGVhZGVy.cGF5bG9hZA.c2ln").is_err());
    }

    #[test]
    fn test_bad_header_base64_rejected() {
        assert!(matches!(
            DetachedJws::parse("!!!..c2ln"),
            Err(CryptoError::InvalidSignatureEncoding(_))
        ));
    }

    #[test]
    fn test_header_without_alg_rejected() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"b64":false}"#);
        assert!(DetachedJws::parse(&format!("{header}..c2ln")).is_err());
    }
}

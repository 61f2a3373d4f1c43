use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Declared intent a proof is valid for (W3C proof purpose vocabulary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProofPurpose {
    /// The issuer asserts the credential claims are true.
    AssertionMethod,
    /// Authentication of the credential holder.
    Authentication,
}

impl std::fmt::Display for ProofPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProofPurpose::AssertionMethod => write!(f, "assertionMethod"),
            ProofPurpose::Authentication => write!(f, "authentication"),
        }
    }
}

/// A Linked-Data Proof block, lifted out of a credential document.
///
/// Exactly one of `proof_value` or `jws` carries the signature; which one
/// depends on the suite named in `proof_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    /// Suite identifier, e.g. "Ed25519Signature2020".
    #[serde(rename = "type")]
    pub proof_type: String,

    /// When the proof was created.
    pub created: Option<DateTime<Utc>>,

    /// Identifier that resolves to the signer's public key.
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,

    /// Declared proof purpose.
    #[serde(rename = "proofPurpose")]
    pub proof_purpose: Option<ProofPurpose>,

    /// Suite-encoded signature value (e.g. multibase base58btc).
    #[serde(rename = "proofValue", skip_serializing_if = "Option::is_none")]
    pub proof_value: Option<String>,

    /// Detached compact JWS, for suites that sign via JOSE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jws: Option<String>,
}

impl Proof {
    /// Parse a proof block from its JSON form, enforcing the required
    /// fields (`type`, `verificationMethod`, and a signature value).
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let obj = value
            .as_object()
            .ok_or_else(|| CoreError::MalformedCredential("proof is not an object".into()))?;

        let proof_type = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::MissingField("proof.type".into()))?
            .to_string();

        let verification_method = obj
            .get("verificationMethod")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::MissingField("proof.verificationMethod".into()))?
            .to_string();

        let proof_value = obj
            .get("proofValue")
            .and_then(Value::as_str)
            .map(str::to_string);
        let jws = obj.get("jws").and_then(Value::as_str).map(str::to_string);
        if proof_value.is_none() && jws.is_none() {
            return Err(CoreError::MissingField("proof.proofValue".into()));
        }

        let created = match obj.get("created").and_then(Value::as_str) {
            Some(s) => Some(
                DateTime::parse_from_rfc3339(s)
                    .map(|d| d.with_timezone(&Utc))
                    .map_err(|e| CoreError::InvalidTimestamp(format!("proof.created: {e}")))?,
            ),
            None => None,
        };

        let proof_purpose = obj
            .get("proofPurpose")
            .map(|v| {
                serde_json::from_value(v.clone()).map_err(|_| {
                    CoreError::MalformedCredential(format!("unknown proofPurpose: {v}"))
                })
            })
            .transpose()?;

        Ok(Self {
            proof_type,
            created,
            verification_method,
            proof_purpose,
            proof_value,
            jws,
        })
    }
}

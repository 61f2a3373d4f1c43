use serde_json::Value;

use crate::error::CoreError;

/// The W3C Verifiable Credentials v1 context URL. Must come first in a
/// credential's `@context` list.
pub const CREDENTIALS_CONTEXT_V1_URL: &str = "https://www.w3.org/2018/credentials/v1";

/// Credential formats an external dispatcher can route on.
///
/// The engine itself only implements `LdpVc`; the enum exists so the
/// dispatcher collaborator has a validated tag type to hand over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialFormat {
    /// JSON-LD credential with an embedded Linked-Data Proof.
    LdpVc,
}

impl CredentialFormat {
    /// The wire value of the format tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialFormat::LdpVc => "ldp_vc",
        }
    }

    /// Parse a wire value into a format tag.
    pub fn from_value(value: &str) -> Result<Self, CoreError> {
        match value {
            "ldp_vc" => Ok(CredentialFormat::LdpVc),
            other => Err(CoreError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for CredentialFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed credential document, backed by its exact JSON structure.
///
/// The engine never re-serializes or reorders the underlying value: the
/// canonical form the signer produced depends on structural fidelity.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialDocument {
    value: Value,
}

impl CredentialDocument {
    /// Wrap an already-parsed JSON document.
    pub fn new(value: Value) -> Result<Self, CoreError> {
        if !value.is_object() {
            return Err(CoreError::MalformedCredential(
                "credential must be a JSON object".into(),
            ));
        }
        Ok(Self { value })
    }

    /// The underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// The `@context` entries, as strings where they are strings.
    pub fn contexts(&self) -> Vec<&str> {
        match self.value.get("@context") {
            Some(Value::String(s)) => vec![s.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// The `type` entries.
    pub fn types(&self) -> Vec<&str> {
        match self.value.get("type") {
            Some(Value::String(s)) => vec![s.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// The issuer identifier. Either a string or an object with an `id`.
    pub fn issuer(&self) -> Option<&str> {
        match self.value.get("issuer") {
            Some(Value::String(s)) => Some(s.as_str()),
            Some(Value::Object(obj)) => obj.get("id").and_then(Value::as_str),
            _ => None,
        }
    }

    /// The raw `proof` member, if any.
    pub fn proof(&self) -> Option<&Value> {
        self.value.get("proof")
    }

    /// The raw `credentialSubject` member, if any.
    pub fn credential_subject(&self) -> Option<&Value> {
        self.value.get("credentialSubject")
    }

    /// The raw `credentialStatus` member, if any.
    pub fn credential_status(&self) -> Option<&Value> {
        self.value.get("credentialStatus")
    }

    /// A field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.value.get(field)
    }
}

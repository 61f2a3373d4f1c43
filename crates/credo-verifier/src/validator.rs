use chrono::{DateTime, Utc};
use credo_core::document::CREDENTIALS_CONTEXT_V1_URL;
use credo_core::{CoreError, CredentialDocument};

/// What structural validation learned about the credential.
///
/// An expired credential is not a validation failure; the expiry is
/// reported alongside a successful signature check instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub expired: bool,
}

/// Check the structural requirements of a v1 verifiable credential:
/// the credentials context in first position, the
/// `VerifiableCredential` type, an issuer, a subject, a proof, and
/// well-formed timestamps.
pub fn validate_structure(document: &CredentialDocument) -> Result<ValidationOutcome, CoreError> {
    let contexts = document.contexts();
    match contexts.first() {
        Some(&CREDENTIALS_CONTEXT_V1_URL) => {}
        Some(other) => {
            return Err(CoreError::MalformedCredential(format!(
                "@context must start with {CREDENTIALS_CONTEXT_V1_URL}, found {other}"
            )))
        }
        None => return Err(CoreError::MissingField("@context".into())),
    }

    if !document.types().contains(&"VerifiableCredential") {
        return Err(CoreError::MalformedCredential(
            "type must include VerifiableCredential".into(),
        ));
    }
    if document.issuer().is_none() {
        return Err(CoreError::MissingField("issuer".into()));
    }
    if document.credential_subject().is_none() {
        return Err(CoreError::MissingField("credentialSubject".into()));
    }
    if document.proof().is_none() {
        return Err(CoreError::MissingField("proof".into()));
    }

    parse_optional_timestamp(document, "issuanceDate")?;
    let expired = match parse_optional_timestamp(document, "expirationDate")? {
        Some(expiration) => expiration < Utc::now(),
        None => false,
    };
    Ok(ValidationOutcome { expired })
}

fn parse_optional_timestamp(
    document: &CredentialDocument,
    field: &str,
) -> Result<Option<DateTime<Utc>>, CoreError> {
    let Some(value) = document.get(field) else {
        return Ok(None);
    };
    let text = value
        .as_str()
        .ok_or_else(|| CoreError::InvalidTimestamp(format!("{field} must be a string")))?;
    let parsed = DateTime::parse_from_rfc3339(text)
        .map_err(|e| CoreError::InvalidTimestamp(format!("{field}: {e}")))?;
    Ok(Some(parsed.with_timezone(&Utc)))
}

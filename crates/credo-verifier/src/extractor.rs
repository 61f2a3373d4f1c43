use credo_core::{CoreError, Proof};
use serde_json::Value;

/// Split a signed credential into its unsigned document and its proof.
///
/// The unsigned document is the input minus the `proof` member and
/// nothing else; it is what gets canonicalized. Exactly one proof must
/// be present: a bare object, or an array holding a single object.
pub fn extract_proof(credential: &Value) -> Result<(Value, Proof), CoreError> {
    let object = credential
        .as_object()
        .ok_or_else(|| CoreError::MalformedCredential("credential must be a JSON object".into()))?;

    let proof_value = object
        .get("proof")
        .ok_or_else(|| CoreError::MissingField("proof".into()))?;

    let proof_json = match proof_value {
        Value::Object(_) => proof_value,
        Value::Array(items) if items.len() == 1 => &items[0],
        Value::Array(items) => {
            return Err(CoreError::MalformedCredential(format!(
                "expected exactly one proof, found {}",
                items.len()
            )))
        }
        _ => {
            return Err(CoreError::MalformedCredential(
                "proof must be an object or a one-element array".into(),
            ))
        }
    };
    let proof = Proof::from_json(proof_json)?;

    let mut unsigned = object.clone();
    unsigned.remove("proof");
    Ok((Value::Object(unsigned), proof))
}

//! Credo Canonicalizer — Deterministic serialization of a credential
//! document into a stable byte sequence, plus the digest engine that
//! hashes it.
//!
//! The canonical form is a sorted list of N-Triples-style statements with
//! normalized blank-node labels, in the manner of the RDF dataset
//! canonicalization used by Linked-Data-Proof ecosystems: two documents
//! with the same claims but different key ordering or formatting produce
//! identical bytes.

pub mod context;
pub mod digest;
pub mod error;
pub mod graph;
pub mod normalize;

pub use context::{ContextMap, TermDefinition};
pub use digest::DigestAlgorithm;
pub use error::{CanonError, DigestError};
pub use graph::{Node, Statement, Term};

use serde_json::Value;

/// Canonicalize a document (already stripped of its proof block) into a
/// stable byte sequence.
///
/// The pipeline is expand → normalize blank nodes → sort statements →
/// serialize one statement per line.
pub fn canonicalize(document: &Value, context: &ContextMap) -> Result<Vec<u8>, CanonError> {
    let statements = graph::expand(document, context)?;
    let statements = normalize::normalize(statements);

    let mut lines: Vec<String> = statements.iter().map(Statement::to_line).collect();
    lines.sort_unstable();

    tracing::debug!(statements = lines.len(), "canonicalized document");

    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in &lines {
        out.push_str(line);
        out.push('\n');
    }
    Ok(out.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> ContextMap {
        ContextMap::credentials_v1()
            .with_term("degree", "https://example.org/vocab#degree")
            .with_term("name", "https://example.org/vocab#name")
            .with_typed_term(
                "awardedOn",
                "https://example.org/vocab#awardedOn",
                "http://www.w3.org/2001/XMLSchema#dateTime",
            )
    }

    #[test]
    fn test_equal_documents_canonicalize_identically() {
        // Same claims, different textual member ordering.
        let d1 = json!({
            "id": "did:example:1",
            "issuer": "did:example:issuer",
            "credentialSubject": {"id": "did:example:1", "degree": "BSc", "name": "Alice"}
        });
        let d2 = json!({
            "credentialSubject": {"name": "Alice", "degree": "BSc", "id": "did:example:1"},
            "issuer": "did:example:issuer",
            "id": "did:example:1"
        });
        let c = ctx();
        assert_eq!(canonicalize(&d1, &c).unwrap(), canonicalize(&d2, &c).unwrap());
    }

    #[test]
    fn test_different_claims_differ() {
        let d1 = json!({"id": "did:example:1", "credentialSubject": {"degree": "BSc"}});
        let d2 = json!({"id": "did:example:1", "credentialSubject": {"degree": "MSc"}});
        let c = ctx();
        assert_ne!(canonicalize(&d1, &c).unwrap(), canonicalize(&d2, &c).unwrap());
    }

    #[test]
    fn test_output_is_sorted_lines() {
        let doc = json!({
            "id": "did:example:1",
            "issuer": "did:example:issuer",
            "credentialSubject": {"degree": "BSc"}
        });
        let bytes = canonicalize(&doc, &ctx()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        let mut sorted = lines.clone();
        sorted.sort_unstable();
        assert_eq!(lines, sorted);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_unknown_term_fails_strict() {
        let doc = json!({"id": "did:example:1", "favouriteColour": "teal"});
        let err = canonicalize(&doc, &ctx()).unwrap_err();
        assert!(matches!(err, CanonError::UnresolvableTerm(t) if t == "favouriteColour"));
    }

    #[test]
    fn test_unknown_term_dropped_lenient() {
        let with_extra = json!({"id": "did:example:1", "issuer": "did:example:i", "favouriteColour": "teal"});
        let without = json!({"id": "did:example:1", "issuer": "did:example:i"});
        let c = ctx().lenient(true);
        assert_eq!(
            canonicalize(&with_extra, &c).unwrap(),
            canonicalize(&without, &c).unwrap()
        );
    }

    #[test]
    fn test_reordered_nested_blank_array_canonicalizes_identically() {
        // Array entries with the same first-degree shape that differ
        // only in deeper structure; element order must not leak into
        // the canonical bytes.
        let c = ContextMap::new()
            .with_term("items", "https://example.org/vocab#items")
            .with_term("child", "https://example.org/vocab#child")
            .with_term("v", "https://example.org/vocab#v");
        let d1 = json!({"items": [{"child": {"v": "X"}}, {"child": {"v": "Y"}}]});
        let d2 = json!({"items": [{"child": {"v": "Y"}}, {"child": {"v": "X"}}]});
        let c1 = canonicalize(&d1, &c).unwrap();
        assert_eq!(c1, canonicalize(&d2, &c).unwrap());
        // The X-child and Y-child keep their own parents across labelings.
        let text = String::from_utf8(c1).unwrap();
        assert!(text.contains("_:c14n"));
    }

    #[test]
    fn test_null_claim_is_ambiguous() {
        let doc = json!({"id": "did:example:1", "issuer": null});
        assert!(matches!(
            canonicalize(&doc, &ctx()),
            Err(CanonError::AmbiguousValue(_))
        ));
    }

    #[test]
    fn test_blank_nodes_are_canonical() {
        // Nested subjects without ids become blank nodes; labels must not
        // depend on member ordering.
        let d1 = json!({
            "credentialSubject": {"degree": "BSc", "name": "Alice"},
            "issuer": "did:example:issuer"
        });
        let d2 = json!({
            "issuer": "did:example:issuer",
            "credentialSubject": {"name": "Alice", "degree": "BSc"}
        });
        let c = ctx();
        let c1 = canonicalize(&d1, &c).unwrap();
        assert_eq!(c1, canonicalize(&d2, &c).unwrap());
        assert!(String::from_utf8(c1).unwrap().contains("_:c14n"));
    }
}

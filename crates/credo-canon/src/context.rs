use std::collections::HashMap;

/// Well-known RDF/XSD IRIs used during expansion.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const XSD_DATETIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

/// How a term maps into the statement graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermDefinition {
    /// Predicate IRI the term expands to.
    pub iri: String,
    /// Datatype IRI forced onto string values of this term, if any.
    pub datatype: Option<String>,
    /// When true, string values are node references (IRIs), not literals.
    pub is_reference: bool,
    /// When true, lenient mode still fails if the term is absent from a
    /// document that uses this context.
    pub required: bool,
}

/// Term-to-IRI definitions for canonicalization.
///
/// Stands in for the resolved `@context` documents of a JSON-LD
/// credential: the caller supplies the definitions, the canonicalizer
/// never fetches anything.
#[derive(Debug, Clone, Default)]
pub struct ContextMap {
    terms: HashMap<String, TermDefinition>,
    lenient: bool,
}

impl ContextMap {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context pre-loaded with the W3C credentials-v1 core terms.
    pub fn credentials_v1() -> Self {
        Self::new()
            .with_reference_term("issuer", "https://www.w3.org/2018/credentials#issuer")
            .with_typed_term(
                "issuanceDate",
                "https://www.w3.org/2018/credentials#issuanceDate",
                XSD_DATETIME,
            )
            .with_typed_term(
                "expirationDate",
                "https://www.w3.org/2018/credentials#expirationDate",
                XSD_DATETIME,
            )
            .with_term(
                "credentialSubject",
                "https://www.w3.org/2018/credentials#credentialSubject",
            )
            .with_term(
                "credentialStatus",
                "https://www.w3.org/2018/credentials#credentialStatus",
            )
            .with_term(
                "VerifiableCredential",
                "https://www.w3.org/2018/credentials#VerifiableCredential",
            )
    }

    /// Add a plain term (string values become `xsd:string` literals).
    pub fn with_term(mut self, name: impl Into<String>, iri: impl Into<String>) -> Self {
        self.terms.insert(
            name.into(),
            TermDefinition {
                iri: iri.into(),
                datatype: None,
                is_reference: false,
                required: false,
            },
        );
        self
    }

    /// Add a term whose string values carry a fixed datatype.
    pub fn with_typed_term(
        mut self,
        name: impl Into<String>,
        iri: impl Into<String>,
        datatype: impl Into<String>,
    ) -> Self {
        self.terms.insert(
            name.into(),
            TermDefinition {
                iri: iri.into(),
                datatype: Some(datatype.into()),
                is_reference: false,
                required: false,
            },
        );
        self
    }

    /// Add a term whose string values are node references (IRIs).
    pub fn with_reference_term(mut self, name: impl Into<String>, iri: impl Into<String>) -> Self {
        self.terms.insert(
            name.into(),
            TermDefinition {
                iri: iri.into(),
                datatype: None,
                is_reference: true,
                required: false,
            },
        );
        self
    }

    /// Mark an already-defined term as required.
    pub fn mark_required(mut self, name: &str) -> Self {
        if let Some(def) = self.terms.get_mut(name) {
            def.required = true;
        }
        self
    }

    /// Toggle lenient mode: unknown terms are dropped instead of failing.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Whether unknown terms are dropped.
    pub fn is_lenient(&self) -> bool {
        self.lenient
    }

    /// Look up a term definition.
    pub fn resolve(&self, term: &str) -> Option<&TermDefinition> {
        self.terms.get(term)
    }

    /// Number of defined terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the context has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

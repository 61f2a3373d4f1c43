use serde_json::{Map, Value};

use crate::context::{
    ContextMap, TermDefinition, RDF_TYPE, XSD_BOOLEAN, XSD_DOUBLE, XSD_INTEGER, XSD_STRING,
};
use crate::error::CanonError;

/// A graph node: named by IRI or a blank-node label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Iri(String),
    Blank(String),
}

/// An object position: a node or a typed literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Node(Node),
    Literal { value: String, datatype: String },
}

/// One subject-predicate-object statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub subject: Node,
    pub predicate: String,
    pub object: Term,
}

impl Node {
    fn write_to(&self, out: &mut String) {
        match self {
            Node::Iri(iri) => {
                out.push('<');
                out.push_str(iri);
                out.push('>');
            }
            Node::Blank(label) => {
                out.push_str("_:");
                out.push_str(label);
            }
        }
    }
}

impl Statement {
    /// Serialize as one N-Triples-style line (no trailing newline).
    pub fn to_line(&self) -> String {
        let mut out = String::new();
        self.subject.write_to(&mut out);
        out.push(' ');
        out.push('<');
        out.push_str(&self.predicate);
        out.push('>');
        out.push(' ');
        match &self.object {
            Term::Node(node) => node.write_to(&mut out),
            Term::Literal { value, datatype } => {
                out.push('"');
                out.push_str(&escape_literal(value));
                out.push('"');
                if datatype != XSD_STRING {
                    out.push_str("^^<");
                    out.push_str(datatype);
                    out.push('>');
                }
            }
        }
        out.push_str(" .");
        out
    }
}

fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// Expand a JSON document into statements using the given context.
///
/// Member iteration is key-sorted (serde_json map order), so blank-node
/// allocation is deterministic for semantically equal documents.
pub fn expand(document: &Value, ctx: &ContextMap) -> Result<Vec<Statement>, CanonError> {
    let obj = document
        .as_object()
        .ok_or_else(|| CanonError::InvalidDocument("document must be a JSON object".into()))?;

    let mut expander = Expander {
        ctx,
        blank_counter: 0,
        statements: Vec::new(),
    };
    expander.expand_object(obj)?;
    Ok(expander.statements)
}

struct Expander<'a> {
    ctx: &'a ContextMap,
    blank_counter: usize,
    statements: Vec<Statement>,
}

impl Expander<'_> {
    fn fresh_blank(&mut self) -> Node {
        let node = Node::Blank(format!("b{}", self.blank_counter));
        self.blank_counter += 1;
        node
    }

    /// Expand one JSON object into statements; returns its subject node.
    fn expand_object(&mut self, obj: &Map<String, Value>) -> Result<Node, CanonError> {
        let subject = match obj.get("id").and_then(Value::as_str) {
            Some(id) => Node::Iri(id.to_string()),
            None => self.fresh_blank(),
        };

        for (key, value) in obj {
            match key.as_str() {
                "@context" | "id" => continue,
                "type" => self.expand_types(&subject, value)?,
                term => {
                    let Some(def) = self.ctx.resolve(term) else {
                        if self.ctx.is_lenient() {
                            tracing::debug!(term, "dropping term without context definition");
                            continue;
                        }
                        return Err(CanonError::UnresolvableTerm(term.to_string()));
                    };
                    let def = def.clone();
                    self.expand_value(&subject, &def, value, term)?;
                }
            }
        }
        Ok(subject)
    }

    fn expand_types(&mut self, subject: &Node, value: &Value) -> Result<(), CanonError> {
        let names: Vec<&str> = match value {
            Value::String(s) => vec![s.as_str()],
            Value::Array(items) => items
                .iter()
                .map(|v| {
                    v.as_str()
                        .ok_or_else(|| CanonError::AmbiguousValue("non-string type entry".into()))
                })
                .collect::<Result<_, _>>()?,
            _ => return Err(CanonError::AmbiguousValue("type must be string or array".into())),
        };

        for name in names {
            let iri = if name.contains(':') {
                name.to_string()
            } else {
                match self.ctx.resolve(name) {
                    Some(def) => def.iri.clone(),
                    None if self.ctx.is_lenient() => continue,
                    None => return Err(CanonError::UnresolvableTerm(name.to_string())),
                }
            };
            self.statements.push(Statement {
                subject: subject.clone(),
                predicate: RDF_TYPE.to_string(),
                object: Term::Node(Node::Iri(iri)),
            });
        }
        Ok(())
    }

    fn expand_value(
        &mut self,
        subject: &Node,
        def: &TermDefinition,
        value: &Value,
        term: &str,
    ) -> Result<(), CanonError> {
        match value {
            Value::Null => Err(CanonError::AmbiguousValue(format!(
                "null value for term {term}"
            ))),
            Value::Array(items) => {
                for item in items {
                    if item.is_array() {
                        return Err(CanonError::AmbiguousValue(format!(
                            "nested array for term {term}"
                        )));
                    }
                    self.expand_value(subject, def, item, term)?;
                }
                Ok(())
            }
            Value::Object(obj) => {
                let child = self.expand_object(obj)?;
                self.statements.push(Statement {
                    subject: subject.clone(),
                    predicate: def.iri.clone(),
                    object: Term::Node(child),
                });
                Ok(())
            }
            Value::String(s) => {
                let object = if def.is_reference {
                    Term::Node(Node::Iri(s.clone()))
                } else {
                    Term::Literal {
                        value: s.clone(),
                        datatype: def
                            .datatype
                            .clone()
                            .unwrap_or_else(|| XSD_STRING.to_string()),
                    }
                };
                self.statements.push(Statement {
                    subject: subject.clone(),
                    predicate: def.iri.clone(),
                    object,
                });
                Ok(())
            }
            Value::Bool(b) => {
                self.statements.push(Statement {
                    subject: subject.clone(),
                    predicate: def.iri.clone(),
                    object: Term::Literal {
                        value: b.to_string(),
                        datatype: XSD_BOOLEAN.to_string(),
                    },
                });
                Ok(())
            }
            Value::Number(n) => {
                let datatype = if n.is_f64() { XSD_DOUBLE } else { XSD_INTEGER };
                self.statements.push(Statement {
                    subject: subject.clone(),
                    predicate: def.iri.clone(),
                    object: Term::Literal {
                        value: n.to_string(),
                        datatype: datatype.to_string(),
                    },
                });
                Ok(())
            }
        }
    }
}

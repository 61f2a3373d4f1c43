//! Blank-node identifier normalization.
//!
//! Relabels blank nodes to `c14n<n>` in the manner of URDNA2015. Each
//! blank node starts from the hash of its first-degree statements
//! (serialized with the node itself as `_:a` and every other blank node
//! as `_:z`), then hashes are refined round by round with neighbor
//! hashes substituted for neighbor labels, so nodes that only differ in
//! deeper structure still separate. Final labels depend on the graph
//! alone, never on allocation order; allocation order only breaks ties
//! between fully automorphic nodes, where either labeling serializes to
//! the same bytes.

use std::collections::{HashMap, HashSet};

use sha2::{Digest, Sha256};

use crate::graph::{Node, Statement, Term};

/// Relabel all blank nodes with canonical `c14n<n>` identifiers.
pub fn normalize(statements: Vec<Statement>) -> Vec<Statement> {
    let mut first_seen: Vec<String> = Vec::new();
    for stmt in &statements {
        for label in blank_labels(stmt) {
            if !first_seen.iter().any(|l| l == label) {
                first_seen.push(label.to_string());
            }
        }
    }
    if first_seen.is_empty() {
        return statements;
    }

    let hashes = refine_hashes(&first_seen, &statements);

    let mut ordered: Vec<(String, usize, String)> = first_seen
        .iter()
        .enumerate()
        .map(|(idx, label)| (hashes[label].clone(), idx, label.clone()))
        .collect();
    ordered.sort_unstable();

    let relabel: HashMap<String, String> = ordered
        .into_iter()
        .enumerate()
        .map(|(i, (_, _, label))| (label, format!("c14n{i}")))
        .collect();

    statements
        .into_iter()
        .map(|stmt| rename(stmt, &relabel))
        .collect()
}

fn blank_labels(stmt: &Statement) -> Vec<&str> {
    let mut labels = Vec::new();
    if let Node::Blank(label) = &stmt.subject {
        labels.push(label.as_str());
    }
    if let Term::Node(Node::Blank(label)) = &stmt.object {
        labels.push(label.as_str());
    }
    labels
}

/// Refine per-node hashes until the partition stops splitting. Bounded
/// by the node count, so cyclic graphs terminate too.
fn refine_hashes(labels: &[String], statements: &[Statement]) -> HashMap<String, String> {
    let mut hashes: HashMap<String, String> = labels
        .iter()
        .map(|label| (label.clone(), node_hash(label, statements, None)))
        .collect();

    let mut distinct = distinct_count(&hashes);
    for _ in 0..labels.len() {
        if distinct == labels.len() {
            break;
        }
        let next: HashMap<String, String> = labels
            .iter()
            .map(|label| (label.clone(), node_hash(label, statements, Some(&hashes))))
            .collect();
        let next_distinct = distinct_count(&next);
        if next_distinct <= distinct {
            break;
        }
        hashes = next;
        distinct = next_distinct;
    }
    hashes
}

fn distinct_count(hashes: &HashMap<String, String>) -> usize {
    hashes.values().collect::<HashSet<_>>().len()
}

/// Hash one node's first-degree statements. Without `neighbor_hashes`
/// every other blank node is masked as `_:z`; with them, each neighbor
/// contributes its hash from the previous round.
fn node_hash(
    label: &str,
    statements: &[Statement],
    neighbor_hashes: Option<&HashMap<String, String>>,
) -> String {
    let placeholder = |node: &Node| -> Node {
        match node {
            Node::Blank(l) if l == label => Node::Blank("a".into()),
            Node::Blank(l) => match neighbor_hashes {
                Some(hashes) => Node::Blank(hashes[l].clone()),
                None => Node::Blank("z".into()),
            },
            other => other.clone(),
        }
    };

    let mut lines: Vec<String> = statements
        .iter()
        .filter(|stmt| blank_labels(stmt).contains(&label))
        .map(|stmt| {
            let masked = Statement {
                subject: placeholder(&stmt.subject),
                predicate: stmt.predicate.clone(),
                object: match &stmt.object {
                    Term::Node(node) => Term::Node(placeholder(node)),
                    literal => literal.clone(),
                },
            };
            masked.to_line()
        })
        .collect();
    lines.sort_unstable();

    let mut hasher = Sha256::new();
    // Folding in the node's previous hash keeps refinement monotone:
    // nodes already distinguished can never merge back.
    if let Some(hashes) = neighbor_hashes {
        hasher.update(hashes[label].as_bytes());
        hasher.update(b"\n");
    }
    for line in &lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

fn rename(stmt: Statement, relabel: &HashMap<String, String>) -> Statement {
    let map_node = |node: Node| -> Node {
        match node {
            Node::Blank(label) => Node::Blank(relabel[&label].clone()),
            other => other,
        }
    };
    Statement {
        subject: map_node(stmt.subject),
        predicate: stmt.predicate,
        object: match stmt.object {
            Term::Node(node) => Term::Node(map_node(node)),
            literal => literal,
        },
    }
}

//! Diagram validation: identifiers, key uniqueness and the modeling policies the resolver relies on.

use crate::diagram::{Diagram, NodeKey, RelationshipKind};
use crate::error::DiagramError;
use crate::naming::is_java_identifier;
use std::collections::{HashMap, HashSet};

/// How strictly links are checked before generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Reject links whose endpoint is missing instead of skipping them.
    pub strict_links: bool,
}

pub fn validate(diagram: &Diagram, policy: ValidationPolicy) -> Result<(), DiagramError> {
    let mut keys: HashSet<&NodeKey> = HashSet::new();
    let mut names: HashSet<&str> = HashSet::new();

    for node in &diagram.node_data_array {
        if !is_java_identifier(&node.name) {
            return Err(DiagramError::InvalidIdentifier {
                kind: "class",
                value: node.name.clone(),
            });
        }
        if !keys.insert(&node.key) {
            return Err(DiagramError::DuplicateKey(node.key.to_string()));
        }
        if !names.insert(node.name.as_str()) {
            return Err(DiagramError::DuplicateName(node.name.clone()));
        }
        let mut property_names = HashSet::new();
        for prop in &node.properties {
            if !is_java_identifier(&prop.name) {
                return Err(DiagramError::InvalidIdentifier {
                    kind: "property",
                    value: format!("{}.{}", node.name, prop.name),
                });
            }
            if !property_names.insert(prop.name.as_str()) {
                return Err(DiagramError::DuplicateField {
                    class: node.name.clone(),
                    field: prop.name.clone(),
                });
            }
        }
        if node.properties.iter().filter(|p| p.is_key).count() > 1 {
            return Err(DiagramError::MultipleKeys {
                class: node.name.clone(),
            });
        }
    }

    let mut superclasses: HashMap<&NodeKey, usize> = HashMap::new();
    for link in &diagram.link_data_array {
        let from = diagram.node(&link.from);
        let to = diagram.node(&link.to);
        let (Some(from), Some(_)) = (from, to) else {
            if policy.strict_links {
                return Err(DiagramError::DanglingLink {
                    from: link.from.to_string(),
                    to: link.to.to_string(),
                });
            }
            tracing::warn!(from = %link.from, to = %link.to, "link references a missing node, skipping");
            continue;
        };
        if link.relationship == RelationshipKind::Inheritance {
            if link.is_self_link() {
                return Err(DiagramError::SelfInheritance {
                    class: from.name.clone(),
                });
            }
            let count = superclasses.entry(&link.from).or_default();
            *count += 1;
            if *count > 1 {
                return Err(DiagramError::MultipleSuperclasses {
                    class: from.name.clone(),
                });
            }
        }
    }

    Ok(())
}

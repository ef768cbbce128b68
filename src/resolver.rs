//! Relationship resolution: turns the links touching one class into field and superclass directives.
//!
//! Each link is resolved independently from the point of view of the class being generated.
//! The source end of an association owns the mapping and the target end mirrors it;
//! composition and aggregation always give the whole/part ends fixed shapes; inheritance only
//! affects the subclass (`from`) end.

use crate::diagram::{
    Annotation, Diagram, Directive, EntityPlan, FieldDirective, JoinColumn, Link, Node, NodeKey, Property,
    RelationshipKind,
};
use crate::error::DiagramError;
use crate::naming::{is_java_identifier, Pluralizer};
use std::collections::HashSet;

/// Field name for a relation to `class_name`: lowercased, pluralized when many-valued.
pub fn relation_field_name(class_name: &str, many: bool, pluralizer: &dyn Pluralizer) -> String {
    let lower = class_name.to_lowercase();
    let name = if many { pluralizer.pluralize(&lower) } else { lower };
    if is_java_identifier(&name) {
        name
    } else {
        format!("{}Item", name)
    }
}

fn join_column_for(owner_class: &str) -> String {
    format!("{}_id", owner_class.to_lowercase())
}

/// Resolve one link for `node`. `other` is the node at the opposite end.
pub fn resolve_link(node: &Node, link: &Link, other: &Node, pluralizer: &dyn Pluralizer) -> Option<Directive> {
    let is_source = link.from == node.key;
    let self_link = link.is_self_link();
    if !is_source && self_link {
        return None;
    }
    let field = |many: bool| relation_field_name(&other.name, many, pluralizer);

    let directive = match (link.relationship, is_source) {
        (RelationshipKind::Association, true) => {
            let from_many = link.from_cardinality().is_many();
            let to_many = link.to_cardinality().is_many();
            let (annotation, join_column) = match (from_many, to_many) {
                (true, true) => (Annotation::ManyToMany, None),
                (false, true) => (
                    Annotation::OneToMany,
                    Some(JoinColumn {
                        name: join_column_for(&node.name),
                        read_only: false,
                    }),
                ),
                (true, false) => (Annotation::ManyToOne, None),
                (false, false) => (Annotation::OneToOne, None),
            };
            FieldDirective {
                annotation,
                target_class: other.name.clone(),
                field_name: field(to_many),
                collection: to_many,
                mapped_by: None,
                join_column,
                cascade_orphans: false,
            }
        }
        (RelationshipKind::Association, false) => {
            let from_many = link.from_cardinality().is_many();
            let to_many = link.to_cardinality().is_many();
            let owner_field = relation_field_name(&node.name, to_many, pluralizer);
            let (annotation, join_column) = match (from_many, to_many) {
                (true, true) => (Annotation::ManyToMany, None),
                (false, true) => (
                    Annotation::ManyToOne,
                    Some(JoinColumn {
                        name: join_column_for(&other.name),
                        read_only: true,
                    }),
                ),
                (true, false) => (Annotation::OneToMany, None),
                (false, false) => (Annotation::OneToOne, None),
            };
            FieldDirective {
                annotation,
                target_class: other.name.clone(),
                field_name: field(from_many),
                collection: from_many,
                mapped_by: Some(owner_field),
                join_column,
                cascade_orphans: false,
            }
        }
        (RelationshipKind::Composition, true) => FieldDirective {
            annotation: Annotation::OneToMany,
            target_class: other.name.clone(),
            field_name: field(true),
            collection: true,
            mapped_by: (!self_link).then(|| relation_field_name(&node.name, false, pluralizer)),
            join_column: None,
            cascade_orphans: true,
        },
        (RelationshipKind::Composition, false) => FieldDirective {
            annotation: Annotation::ManyToOne,
            target_class: other.name.clone(),
            field_name: field(false),
            collection: false,
            mapped_by: None,
            join_column: None,
            cascade_orphans: false,
        },
        (RelationshipKind::Aggregation, true) => FieldDirective {
            annotation: Annotation::ManyToOne,
            target_class: other.name.clone(),
            field_name: field(false),
            collection: false,
            mapped_by: None,
            join_column: None,
            cascade_orphans: false,
        },
        (RelationshipKind::Aggregation, false) => FieldDirective {
            annotation: Annotation::OneToMany,
            target_class: other.name.clone(),
            field_name: field(true),
            collection: true,
            mapped_by: Some(relation_field_name(&node.name, false, pluralizer)),
            join_column: None,
            cascade_orphans: false,
        },
        (RelationshipKind::Inheritance, true) => return Some(Directive::Superclass(other.name.clone())),
        (RelationshipKind::Inheritance, false) => return None,
    };
    Some(Directive::Field(directive))
}

/// Build the directive set for `node` from every link touching it, in link-array order.
/// Links whose other end is missing are skipped (validation decides whether that is allowed).
pub fn plan_entity(node: &Node, diagram: &Diagram, pluralizer: &dyn Pluralizer) -> Result<EntityPlan, DiagramError> {
    let mut plan = EntityPlan {
        class_name: node.name.clone(),
        ..EntityPlan::default()
    };
    let mut taken: HashSet<String> = node.properties.iter().map(|p| p.name.clone()).collect();

    for link in diagram.links_of(&node.key) {
        let other_key = if link.from == node.key { &link.to } else { &link.from };
        let Some(other) = diagram.node(other_key) else {
            tracing::debug!(class = %node.name, other = %other_key, "skipping dangling link");
            continue;
        };
        match resolve_link(node, link, other, pluralizer) {
            Some(Directive::Field(field)) => {
                if !taken.insert(field.field_name.clone()) {
                    return Err(DiagramError::DuplicateField {
                        class: node.name.clone(),
                        field: field.field_name,
                    });
                }
                plan.fields.push(field);
            }
            Some(Directive::Superclass(name)) => {
                if plan.superclass.is_some() {
                    return Err(DiagramError::MultipleSuperclasses {
                        class: node.name.clone(),
                    });
                }
                plan.superclass = Some(name);
            }
            None => {}
        }
    }
    Ok(plan)
}

/// Key property `node` is identified by: its own, else the nearest one up the superclass chain.
pub fn identity_property<'a>(node: &'a Node, diagram: &'a Diagram) -> Option<&'a Property> {
    let mut current = node;
    let mut seen: HashSet<&'a NodeKey> = HashSet::new();
    loop {
        if let Some(key) = current.key_property() {
            return Some(key);
        }
        if !seen.insert(&current.key) {
            return None;
        }
        current = diagram
            .link_data_array
            .iter()
            .find(|l| l.relationship == RelationshipKind::Inheritance && l.from == current.key && !l.is_self_link())
            .and_then(|l| diagram.node(&l.to))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::parse_diagram;
    use crate::naming::EnglishPluralizer;
    use pretty_assertions::assert_eq;

    fn two_classes(link: &str) -> Diagram {
        parse_diagram(&format!(
            r#"{{"nodeDataArray":[
                {{"key":1,"name":"Customer","properties":[{{"name":"id","type":"SERIAL","isKey":true}}]}},
                {{"key":2,"name":"Order","properties":[{{"name":"id","type":"SERIAL","isKey":true}}]}}],
              "linkDataArray":[{}]}}"#,
            link
        ))
        .unwrap()
    }

    fn plans(d: &Diagram) -> (EntityPlan, EntityPlan) {
        let p = EnglishPluralizer::new();
        (
            plan_entity(&d.node_data_array[0], d, &p).unwrap(),
            plan_entity(&d.node_data_array[1], d, &p).unwrap(),
        )
    }

    #[test]
    fn association_many_to_many_mirrors_with_mapped_by() {
        let d = two_classes(r#"{"from":1,"to":2,"relationship":"Association","fromText":"0..*","toText":"1..*"}"#);
        let (customer, order) = plans(&d);

        let owning = customer.field("orders").unwrap();
        assert_eq!(owning.annotation, Annotation::ManyToMany);
        assert!(owning.collection);
        assert_eq!(owning.mapped_by, None);

        let mirror = order.field("customers").unwrap();
        assert_eq!(mirror.annotation, Annotation::ManyToMany);
        assert!(mirror.collection);
        assert_eq!(mirror.mapped_by.as_deref(), Some("orders"));
    }

    #[test]
    fn association_one_to_many_gives_single_inverse_reference() {
        let d = two_classes(r#"{"from":1,"to":2,"relationship":"Asociación","fromText":"1","toText":"1..*"}"#);
        let (customer, order) = plans(&d);

        let owning = customer.field("orders").unwrap();
        assert_eq!(owning.annotation, Annotation::OneToMany);
        assert_eq!(owning.field_type(), "List<Order>");
        assert_eq!(owning.join_column.as_ref().map(|c| c.name.as_str()), Some("customer_id"));

        let mirror = order.field("customer").unwrap();
        assert!(!mirror.collection);
        assert_eq!(mirror.field_type(), "Customer");
        assert_eq!(mirror.mapped_by.as_deref(), Some("orders"));
        assert_eq!(
            mirror.join_column,
            Some(JoinColumn {
                name: "customer_id".into(),
                read_only: true
            })
        );
    }

    #[test]
    fn association_defaults_missing_cardinality_to_many() {
        let d = two_classes(r#"{"from":1,"to":2,"relationship":"Association","fromText":"","toText":"1"}"#);
        let (customer, order) = plans(&d);
        assert_eq!(customer.field("order").unwrap().annotation, Annotation::ManyToOne);
        let mirror = order.field("customers").unwrap();
        assert_eq!(mirror.annotation, Annotation::OneToMany);
        assert_eq!(mirror.mapped_by.as_deref(), Some("order"));
    }

    #[test]
    fn composition_cascades_only_on_the_whole() {
        let d = two_classes(r#"{"from":1,"to":2,"relationship":"Composition"}"#);
        let (customer, order) = plans(&d);

        let parts = customer.field("orders").unwrap();
        assert!(parts.collection);
        assert!(parts.cascade_orphans);
        assert_eq!(parts.mapped_by.as_deref(), Some("customer"));

        let whole = order.field("customer").unwrap();
        assert_eq!(whole.annotation, Annotation::ManyToOne);
        assert!(!whole.collection);
        assert!(!whole.cascade_orphans);
    }

    #[test]
    fn aggregation_source_references_target_collects() {
        let d = two_classes(r#"{"from":1,"to":2,"relationship":"Agregación"}"#);
        let (customer, order) = plans(&d);
        let single = customer.field("order").unwrap();
        assert_eq!(single.annotation, Annotation::ManyToOne);
        let back = order.field("customers").unwrap();
        assert_eq!(back.annotation, Annotation::OneToMany);
        assert_eq!(back.mapped_by.as_deref(), Some("order"));
        assert!(!back.cascade_orphans);
    }

    #[test]
    fn inheritance_only_touches_the_subclass() {
        let d = two_classes(r#"{"from":2,"to":1,"relationship":"Inheritance"}"#);
        let (customer, order) = plans(&d);
        assert_eq!(order.superclass.as_deref(), Some("Customer"));
        assert!(order.fields.is_empty());
        assert_eq!(customer.superclass, None);
        assert!(customer.fields.is_empty());
    }

    #[test]
    fn dangling_links_are_skipped() {
        let d = two_classes(r#"{"from":1,"to":7,"relationship":"Composition"}"#);
        let (customer, order) = plans(&d);
        assert!(customer.fields.is_empty());
        assert!(order.fields.is_empty());
    }

    #[test]
    fn self_association_resolves_source_side_only() {
        let d = parse_diagram(
            r#"{"nodeDataArray":[{"key":1,"name":"Employee","properties":[]}],
              "linkDataArray":[{"from":1,"to":1,"relationship":"Association","fromText":"0..1","toText":"0..*"}]}"#,
        )
        .unwrap();
        let plan = plan_entity(&d.node_data_array[0], &d, &EnglishPluralizer::new()).unwrap();
        assert_eq!(plan.fields.len(), 1);
        assert_eq!(plan.fields[0].field_name, "employees");
        assert_eq!(plan.fields[0].mapped_by, None);
    }

    #[test]
    fn colliding_relationship_fields_are_rejected() {
        let d = two_classes(
            r#"{"from":1,"to":2,"relationship":"Aggregation"},{"from":1,"to":2,"relationship":"Association","toText":"1"}"#,
        );
        let err = plan_entity(&d.node_data_array[0], &d, &EnglishPluralizer::new()).unwrap_err();
        assert!(matches!(err, DiagramError::DuplicateField { field, .. } if field == "order"));
    }

    #[test]
    fn link_order_is_preserved() {
        let d = parse_diagram(
            r#"{"nodeDataArray":[
                {"key":1,"name":"Shop","properties":[]},
                {"key":2,"name":"Shelf","properties":[]},
                {"key":3,"name":"Clerk","properties":[]}],
              "linkDataArray":[
                {"from":1,"to":3,"relationship":"Aggregation"},
                {"from":1,"to":2,"relationship":"Composition"}]}"#,
        )
        .unwrap();
        let plan = plan_entity(&d.node_data_array[0], &d, &EnglishPluralizer::new()).unwrap();
        let names: Vec<&str> = plan.fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["clerk", "shelves"]);
    }

    #[test]
    fn subclass_identity_comes_from_superclass_chain() {
        let d = parse_diagram(
            r#"{"nodeDataArray":[
                {"key":1,"name":"Person","properties":[{"name":"code","type":"UUID","isKey":true}]},
                {"key":2,"name":"Employee","properties":[]},
                {"key":3,"name":"Manager","properties":[{"name":"level","type":"INTEGER"}]}],
              "linkDataArray":[
                {"from":2,"to":1,"relationship":"Inheritance"},
                {"from":3,"to":2,"relationship":"Inheritance"}]}"#,
        )
        .unwrap();
        let manager = &d.node_data_array[2];
        let key = identity_property(manager, &d).unwrap();
        assert_eq!(key.name, "code");
        assert_eq!(identity_property(&d.node_data_array[0], &d).map(|p| p.name.as_str()), Some("code"));
    }

    #[test]
    fn inheritance_cycle_without_key_has_no_identity() {
        let d = parse_diagram(
            r#"{"nodeDataArray":[
                {"key":1,"name":"A","properties":[]},
                {"key":2,"name":"B","properties":[]}],
              "linkDataArray":[
                {"from":1,"to":2,"relationship":"Inheritance"},
                {"from":2,"to":1,"relationship":"Inheritance"}]}"#,
        )
        .unwrap();
        assert!(identity_property(&d.node_data_array[0], &d).is_none());
    }
}

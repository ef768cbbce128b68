//! Entity class rendering from a node and its resolved plan.

use crate::codegen::java::java_type;
use crate::codegen::{import_block, Layer, ProjectLayout};
use crate::diagram::{Annotation, EntityPlan, FieldDirective, Node, Property};
use crate::naming::upper_first;

fn render_property(prop: &Property, imports: &mut Vec<&'static str>) -> String {
    let ty = java_type(prop.type_);
    let mut out = String::new();
    if prop.is_key {
        imports.push("javax.persistence.Id");
        out.push_str("    @Id\n");
        if let Some(strategy) = ty.generation_strategy() {
            imports.push("javax.persistence.GeneratedValue");
            imports.push("javax.persistence.GenerationType");
            out.push_str(&format!("    @GeneratedValue(strategy = GenerationType.{})\n", strategy));
        }
    }
    if let Some(def) = ty.column_definition {
        imports.push("javax.persistence.Column");
        out.push_str(&format!("    @Column(columnDefinition = \"{}\")\n", def));
    }
    if let Some(import) = ty.import {
        imports.push(import);
    }
    out.push_str(&format!("    {} {} {};\n\n", prop.visibility.keyword(), ty.name, prop.name));
    out
}

fn render_relation(field: &FieldDirective, imports: &mut Vec<&'static str>) -> String {
    let annotation = field.annotation.name();
    imports.push(match field.annotation {
        Annotation::OneToOne => "javax.persistence.OneToOne",
        Annotation::OneToMany => "javax.persistence.OneToMany",
        Annotation::ManyToOne => "javax.persistence.ManyToOne",
        Annotation::ManyToMany => "javax.persistence.ManyToMany",
    });

    let mut attrs = Vec::new();
    if let Some(mapped_by) = field.mapped_by.as_deref().filter(|_| field.annotation.supports_mapped_by()) {
        attrs.push(format!("mappedBy = \"{}\"", mapped_by));
    }
    if field.cascade_orphans {
        imports.push("javax.persistence.CascadeType");
        attrs.push("cascade = CascadeType.ALL".to_string());
        attrs.push("orphanRemoval = true".to_string());
    }

    let mut out = if attrs.is_empty() {
        format!("    @{}\n", annotation)
    } else {
        format!("    @{}({})\n", annotation, attrs.join(", "))
    };
    if let Some(column) = &field.join_column {
        imports.push("javax.persistence.JoinColumn");
        if column.read_only {
            out.push_str(&format!(
                "    @JoinColumn(name = \"{}\", insertable = false, updatable = false)\n",
                column.name
            ));
        } else {
            out.push_str(&format!("    @JoinColumn(name = \"{}\")\n", column.name));
        }
    }
    if field.collection {
        imports.push("java.util.List");
    }
    out.push_str(&format!("    private {} {};\n\n", field.field_type(), field.field_name));
    out
}

fn render_accessors(prop: &Property) -> String {
    let ty = java_type(prop.type_).name;
    let cap = upper_first(&prop.name);
    format!(
        "    public {ty} get{cap}() {{\n        return {name};\n    }}\n\n    public void set{cap}({ty} {name}) {{\n        this.{name} = {name};\n    }}\n\n",
        ty = ty,
        cap = cap,
        name = prop.name
    )
}

/// Persistence class for one node: properties first, relationship fields in link order, then property accessors.
pub fn render_entity(node: &Node, plan: &EntityPlan, layout: &ProjectLayout) -> String {
    let mut imports: Vec<&'static str> = vec!["javax.persistence.Entity"];
    let mut body = String::new();

    for prop in &node.properties {
        body.push_str(&render_property(prop, &mut imports));
    }
    for field in &plan.fields {
        body.push_str(&render_relation(field, &mut imports));
    }
    for prop in &node.properties {
        body.push_str(&render_accessors(prop));
    }

    let header = match &plan.superclass {
        Some(parent) => format!("public class {} extends {} {{\n\n", node.name, parent),
        None => format!("public class {} {{\n\n", node.name),
    };

    let mut out = format!("package {};\n\n", layout.package(Layer::Model));
    out.push_str(&import_block(imports));
    out.push_str("@Entity\n");
    out.push_str(&header);
    out.push_str(&body);
    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::parse_diagram;
    use crate::naming::EnglishPluralizer;
    use crate::resolver::plan_entity;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_key_property_accessors_and_relations() {
        let d = parse_diagram(
            r#"{"nodeDataArray":[
                {"key":1,"name":"Customer","properties":[
                    {"name":"id","type":"SERIAL","visibility":"private","isKey":true},
                    {"name":"name","type":"VARCHAR","visibility":"private","isKey":false}]},
                {"key":2,"name":"Order","properties":[]}],
              "linkDataArray":[{"from":1,"to":2,"relationship":"Composition"}]}"#,
        )
        .unwrap();
        let node = &d.node_data_array[0];
        let plan = plan_entity(node, &d, &EnglishPluralizer::new()).unwrap();
        let java = render_entity(node, &plan, &ProjectLayout::default());

        let expected = "\
package com.example.model;

import java.util.List;
import javax.persistence.CascadeType;
import javax.persistence.Entity;
import javax.persistence.GeneratedValue;
import javax.persistence.GenerationType;
import javax.persistence.Id;
import javax.persistence.OneToMany;

@Entity
public class Customer {

    @Id
    @GeneratedValue(strategy = GenerationType.IDENTITY)
    private Long id;

    private String name;

    @OneToMany(mappedBy = \"customer\", cascade = CascadeType.ALL, orphanRemoval = true)
    private List<Order> orders;

    public Long getId() {
        return id;
    }

    public void setId(Long id) {
        this.id = id;
    }

    public String getName() {
        return name;
    }

    public void setName(String name) {
        this.name = name;
    }

}
";
        assert_eq!(java, expected);
    }

    #[test]
    fn subclass_header_names_superclass() {
        let d = parse_diagram(
            r#"{"nodeDataArray":[
                {"key":1,"name":"Person","properties":[]},
                {"key":2,"name":"Employee","properties":[{"name":"hiredOn","type":"DATE"}]}],
              "linkDataArray":[{"from":2,"to":1,"relationship":"Herencia"}]}"#,
        )
        .unwrap();
        let node = &d.node_data_array[1];
        let plan = plan_entity(node, &d, &EnglishPluralizer::new()).unwrap();
        let java = render_entity(node, &plan, &ProjectLayout::default());
        assert!(java.contains("public class Employee extends Person {"));
        assert!(java.contains("import java.time.LocalDate;"));
        assert!(java.contains("public LocalDate getHiredOn()"));
    }

    #[test]
    fn one_to_many_mirror_uses_read_only_join_column() {
        let d = parse_diagram(
            r#"{"nodeDataArray":[
                {"key":"a","name":"A","properties":[]},
                {"key":"b","name":"B","properties":[]}],
              "linkDataArray":[{"from":"a","to":"b","relationship":"Association","fromText":"1","toText":"1..*"}]}"#,
        )
        .unwrap();
        let p = EnglishPluralizer::new();
        let a = &d.node_data_array[0];
        let b = &d.node_data_array[1];
        let a_java = render_entity(a, &plan_entity(a, &d, &p).unwrap(), &ProjectLayout::default());
        let b_java = render_entity(b, &plan_entity(b, &d, &p).unwrap(), &ProjectLayout::default());

        assert!(a_java.contains("    @OneToMany\n    @JoinColumn(name = \"a_id\")\n    private List<B> bs;\n"));
        assert!(b_java.contains(
            "    @ManyToOne\n    @JoinColumn(name = \"a_id\", insertable = false, updatable = false)\n    private A a;\n"
        ));
        assert!(!b_java.contains("List"));
    }

    #[test]
    fn json_columns_get_column_definition() {
        let d = parse_diagram(
            r#"{"nodeDataArray":[{"key":1,"name":"Event","properties":[
                {"name":"payload","type":"JSONB","visibility":"protected"}]}]}"#,
        )
        .unwrap();
        let node = &d.node_data_array[0];
        let plan = plan_entity(node, &d, &EnglishPluralizer::new()).unwrap();
        let java = render_entity(node, &plan, &ProjectLayout::default());
        assert!(java.contains("    @Column(columnDefinition = \"jsonb\")\n    protected String payload;\n"));
        assert!(java.contains("import javax.persistence.Column;"));
    }
}

//! Resolved per-class plan: the immutable directive set an entity is rendered from.

use serde::Serialize;

/// JPA relationship annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Annotation {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl Annotation {
    pub fn name(self) -> &'static str {
        match self {
            Annotation::OneToOne => "OneToOne",
            Annotation::OneToMany => "OneToMany",
            Annotation::ManyToOne => "ManyToOne",
            Annotation::ManyToMany => "ManyToMany",
        }
    }

    /// JPA only allows `mappedBy` on these; `@ManyToOne` is always the owning side.
    pub fn supports_mapped_by(self) -> bool {
        !matches!(self, Annotation::ManyToOne)
    }
}

/// Foreign-key column shared by a one-to-many owner and its single-valued mirror.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JoinColumn {
    pub name: String,
    /// Mirror side: column is written by the owner only.
    pub read_only: bool,
}

/// One relationship field to append to an entity body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldDirective {
    pub annotation: Annotation,
    /// Related class; the field type is this class or a list of it.
    pub target_class: String,
    pub field_name: String,
    pub collection: bool,
    /// Name of the field on the other end this one mirrors.
    pub mapped_by: Option<String>,
    pub join_column: Option<JoinColumn>,
    /// Cascade all operations and remove orphans (composition parts).
    pub cascade_orphans: bool,
}

impl FieldDirective {
    pub fn field_type(&self) -> String {
        if self.collection {
            format!("List<{}>", self.target_class)
        } else {
            self.target_class.clone()
        }
    }
}

/// Outcome of resolving one link for one class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    Field(FieldDirective),
    Superclass(String),
}

/// Everything relationship-derived about one class, computed before any text is rendered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EntityPlan {
    pub class_name: String,
    pub superclass: Option<String>,
    /// In link-array order.
    pub fields: Vec<FieldDirective>,
}

impl EntityPlan {
    pub fn field(&self, name: &str) -> Option<&FieldDirective> {
        self.fields.iter().find(|f| f.field_name == name)
    }
}

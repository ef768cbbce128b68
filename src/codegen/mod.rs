//! Java source generation: entity classes, the repository/service/controller layers and project files.

pub mod entity;
pub mod java;
pub mod layers;
pub mod project;

pub use entity::render_entity;
pub use java::{java_type, JavaType};
pub use layers::{render_controller, render_repository, render_service, LayerContext};
pub use project::{render_application_properties, render_pom};

/// Root of the Java sources inside the generated project.
pub const JAVA_SOURCE_ROOT: &str = "src/main/java";
pub const POM_PATH: &str = "pom.xml";
pub const APPLICATION_PROPERTIES_PATH: &str = "src/main/resources/application.properties";

/// The four parallel source trees of the generated project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Model,
    Repository,
    Service,
    Controller,
}

impl Layer {
    pub const ALL: [Layer; 4] = [Layer::Model, Layer::Repository, Layer::Service, Layer::Controller];

    pub fn package_segment(self) -> &'static str {
        match self {
            Layer::Model => "model",
            Layer::Repository => "repository",
            Layer::Service => "service",
            Layer::Controller => "controller",
        }
    }

    /// Suffix appended to the entity name for this layer's class.
    pub fn class_suffix(self) -> &'static str {
        match self {
            Layer::Model => "",
            Layer::Repository => "Repository",
            Layer::Service => "Service",
            Layer::Controller => "Controller",
        }
    }
}

/// Package and path conventions, derived from the base package only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectLayout {
    base_package: String,
}

impl ProjectLayout {
    pub fn new(base_package: impl Into<String>) -> Self {
        ProjectLayout {
            base_package: base_package.into(),
        }
    }

    pub fn base_package(&self) -> &str {
        &self.base_package
    }

    /// "com.example.model"
    pub fn package(&self, layer: Layer) -> String {
        format!("{}.{}", self.base_package, layer.package_segment())
    }

    /// "src/main/java/com/example/model/"
    pub fn dir(&self, layer: Layer) -> String {
        format!(
            "{}/{}/{}/",
            JAVA_SOURCE_ROOT,
            self.base_package.replace('.', "/"),
            layer.package_segment()
        )
    }

    pub fn class_name(&self, layer: Layer, entity: &str) -> String {
        format!("{}{}", entity, layer.class_suffix())
    }

    /// "src/main/java/com/example/repository/CustomerRepository.java"
    pub fn source_path(&self, layer: Layer, entity: &str) -> String {
        format!("{}{}.java", self.dir(layer), self.class_name(layer, entity))
    }

    /// "com.example.repository.CustomerRepository"
    pub fn qualified_name(&self, layer: Layer, entity: &str) -> String {
        format!("{}.{}", self.package(layer), self.class_name(layer, entity))
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        ProjectLayout::new("com.example")
    }
}

/// Sorted, deduplicated import block followed by a blank line; empty when there is nothing to import.
pub(crate) fn import_block<'a>(imports: impl IntoIterator<Item = &'a str>) -> String {
    let sorted: std::collections::BTreeSet<&str> = imports.into_iter().collect();
    if sorted.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for import in sorted {
        out.push_str(&format!("import {};\n", import));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_paths_follow_base_package() {
        let layout = ProjectLayout::new("org.acme.shop");
        assert_eq!(
            layout.source_path(Layer::Service, "Order"),
            "src/main/java/org/acme/shop/service/OrderService.java"
        );
        assert_eq!(layout.dir(Layer::Model), "src/main/java/org/acme/shop/model/");
        assert_eq!(layout.qualified_name(Layer::Repository, "Order"), "org.acme.shop.repository.OrderRepository");
    }

    #[test]
    fn imports_are_sorted_and_deduplicated() {
        let block = import_block(["javax.persistence.Id", "java.util.List", "javax.persistence.Id"]);
        assert_eq!(block, "import java.util.List;\nimport javax.persistence.Id;\n\n");
        assert_eq!(import_block(Vec::<&str>::new()), "");
    }
}

//! Repository, service and controller templates. They depend only on the class name and its identity type.

use crate::codegen::java::{java_type, JavaType, DEFAULT_ID_TYPE};
use crate::codegen::{import_block, Layer, ProjectLayout};
use crate::diagram::Property;
use crate::naming::{is_java_identifier, lower_first, upper_first, Pluralizer};

const TEMPLATE_LOCALS: &[&str] = &["id", "item", "existingItem"];

/// Inputs shared by the three layer templates.
#[derive(Clone, Copy, Debug)]
pub struct LayerContext<'a> {
    pub class_name: &'a str,
    pub id_type: JavaType,
    /// Name of the key property, used to bind the path id on update.
    pub key_property: Option<&'a str>,
}

impl<'a> LayerContext<'a> {
    pub fn new(class_name: &'a str) -> Self {
        LayerContext {
            class_name,
            id_type: DEFAULT_ID_TYPE,
            key_property: None,
        }
    }

    /// Identity type follows `key` (own or inherited key property); `Long` when there is none.
    pub fn with_key(class_name: &'a str, key: Option<&'a Property>) -> Self {
        match key {
            Some(key) => LayerContext {
                class_name,
                id_type: java_type(key.type_),
                key_property: Some(&key.name),
            },
            None => LayerContext::new(class_name),
        }
    }

    /// camelCase variable name for an instance of the class. Avoids the templates' own locals.
    fn instance(&self) -> String {
        let name = lower_first(self.class_name);
        if is_java_identifier(&name) && !TEMPLATE_LOCALS.contains(&name.as_str()) {
            name
        } else {
            format!("{}Item", name)
        }
    }

    fn id_import(&self) -> Option<&'static str> {
        self.id_type.import
    }
}

pub fn render_repository(ctx: &LayerContext<'_>, layout: &ProjectLayout) -> String {
    let model = layout.qualified_name(Layer::Model, ctx.class_name);
    let mut imports = vec![
        model.as_str(),
        "org.springframework.data.jpa.repository.JpaRepository",
        "org.springframework.stereotype.Repository",
    ];
    imports.extend(ctx.id_import());

    format!(
        "package {package};\n\n{imports}@Repository\npublic interface {class}Repository extends JpaRepository<{class}, {id}> {{\n}}\n",
        package = layout.package(Layer::Repository),
        imports = import_block(imports),
        class = ctx.class_name,
        id = ctx.id_type.name,
    )
}

pub fn render_service(ctx: &LayerContext<'_>, layout: &ProjectLayout) -> String {
    let model = layout.qualified_name(Layer::Model, ctx.class_name);
    let repository = layout.qualified_name(Layer::Repository, ctx.class_name);
    let mut imports = vec![
        model.as_str(),
        repository.as_str(),
        "java.util.List",
        "java.util.Optional",
        "org.springframework.beans.factory.annotation.Autowired",
        "org.springframework.stereotype.Service",
    ];
    imports.extend(ctx.id_import());

    format!(
        r#"package {package};

{imports}@Service
public class {class}Service {{

    @Autowired
    private {class}Repository {inst}Repository;

    public List<{class}> findAll() {{
        return {inst}Repository.findAll();
    }}

    public Optional<{class}> findById({id} id) {{
        return {inst}Repository.findById(id);
    }}

    public {class} save({class} {inst}) {{
        return {inst}Repository.save({inst});
    }}

    public void deleteById({id} id) {{
        {inst}Repository.deleteById(id);
    }}
}}
"#,
        package = layout.package(Layer::Service),
        imports = import_block(imports),
        class = ctx.class_name,
        inst = ctx.instance(),
        id = ctx.id_type.name,
    )
}

/// REST path for a class: pluralized, lowercased class name under `/api`.
pub fn resource_path(class_name: &str, pluralizer: &dyn Pluralizer) -> String {
    format!("/api/{}", pluralizer.pluralize(&class_name.to_lowercase()))
}

pub fn render_controller(ctx: &LayerContext<'_>, layout: &ProjectLayout, pluralizer: &dyn Pluralizer) -> String {
    let model = layout.qualified_name(Layer::Model, ctx.class_name);
    let service = layout.qualified_name(Layer::Service, ctx.class_name);
    let mut imports = vec![
        model.as_str(),
        service.as_str(),
        "java.util.List",
        "org.springframework.beans.factory.annotation.Autowired",
        "org.springframework.http.ResponseEntity",
        "org.springframework.web.bind.annotation.*",
    ];
    imports.extend(ctx.id_import());

    let inst = ctx.instance();
    let update_body = match ctx.key_property {
        Some(key) => format!(
            "                    {inst}.set{key}(id);\n                    return ResponseEntity.ok({inst}Service.save({inst}));\n",
            inst = inst,
            key = upper_first(key)
        ),
        None => format!(
            "                    return ResponseEntity.ok({inst}Service.save({inst}));\n",
            inst = inst
        ),
    };

    format!(
        r#"package {package};

{imports}@RestController
@RequestMapping("{path}")
public class {class}Controller {{

    @Autowired
    private {class}Service {inst}Service;

    @GetMapping
    public List<{class}> getAllItems() {{
        return {inst}Service.findAll();
    }}

    @GetMapping("/{{id}}")
    public ResponseEntity<{class}> getItemById(@PathVariable {id} id) {{
        return {inst}Service.findById(id)
                .map(ResponseEntity::ok)
                .orElse(ResponseEntity.notFound().build());
    }}

    @PostMapping
    public {class} createItem(@RequestBody {class} {inst}) {{
        return {inst}Service.save({inst});
    }}

    @PutMapping("/{{id}}")
    public ResponseEntity<{class}> updateItem(@PathVariable {id} id, @RequestBody {class} {inst}) {{
        return {inst}Service.findById(id)
                .map(existingItem -> {{
{update_body}                }})
                .orElse(ResponseEntity.notFound().build());
    }}

    @DeleteMapping("/{{id}}")
    public ResponseEntity<?> deleteItem(@PathVariable {id} id) {{
        return {inst}Service.findById(id)
                .map(item -> {{
                    {inst}Service.deleteById(id);
                    return ResponseEntity.ok().build();
                }})
                .orElse(ResponseEntity.notFound().build());
    }}
}}
"#,
        package = layout.package(Layer::Controller),
        imports = import_block(imports),
        path = resource_path(ctx.class_name, pluralizer),
        class = ctx.class_name,
        inst = inst,
        id = ctx.id_type.name,
        update_body = update_body,
    )
}

//! Project packaging: runs the whole pipeline for a diagram and zips the result inside a per-request working directory.

use crate::codegen::{
    render_application_properties, render_controller, render_entity, render_pom, render_repository, render_service,
    Layer, LayerContext, ProjectLayout, APPLICATION_PROPERTIES_PATH, POM_PATH,
};
use crate::diagram::{parse_diagram, validate, Diagram, ValidationPolicy};
use crate::error::{DiagramError, GenerateError};
use crate::naming::{EnglishPluralizer, Pluralizer};
use crate::resolver::{identity_property, plan_entity};
use crate::settings::GeneratorSettings;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// One generated file, addressed by its path inside the project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub path: String,
    pub contents: String,
}

#[derive(Clone, Debug)]
pub struct ProjectArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Stateless between calls; share one instance across requests.
#[derive(Clone)]
pub struct ProjectGenerator {
    settings: GeneratorSettings,
    layout: ProjectLayout,
    pluralizer: Arc<dyn Pluralizer>,
}

impl ProjectGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        let layout = ProjectLayout::new(settings.base_package.clone());
        ProjectGenerator {
            settings,
            layout,
            pluralizer: Arc::new(EnglishPluralizer::new()),
        }
    }

    pub fn with_pluralizer(mut self, pluralizer: Arc<dyn Pluralizer>) -> Self {
        self.pluralizer = pluralizer;
        self
    }

    /// All project files for `diagram`: entity, repository, service and controller per class
    /// (in node order), then the build descriptor and the datasource configuration.
    pub fn generate(&self, diagram: &Diagram) -> Result<Vec<Artifact>, DiagramError> {
        validate(
            diagram,
            ValidationPolicy {
                strict_links: self.settings.strict_links,
            },
        )?;
        let pluralizer = self.pluralizer.as_ref();
        let mut artifacts = Vec::with_capacity(diagram.node_data_array.len() * Layer::ALL.len() + 2);

        for node in &diagram.node_data_array {
            let plan = plan_entity(node, diagram, pluralizer)?;
            let ctx = LayerContext::with_key(&node.name, identity_property(node, diagram));
            for layer in Layer::ALL {
                let contents = match layer {
                    Layer::Model => render_entity(node, &plan, &self.layout),
                    Layer::Repository => render_repository(&ctx, &self.layout),
                    Layer::Service => render_service(&ctx, &self.layout),
                    Layer::Controller => render_controller(&ctx, &self.layout, pluralizer),
                };
                artifacts.push(Artifact {
                    path: self.layout.source_path(layer, &node.name),
                    contents,
                });
            }
        }

        artifacts.push(Artifact {
            path: POM_PATH.to_string(),
            contents: render_pom(&self.settings),
        });
        artifacts.push(Artifact {
            path: APPLICATION_PROPERTIES_PATH.to_string(),
            contents: render_application_properties(&self.settings),
        });
        Ok(artifacts)
    }

    /// Parse `text` and package it. Nothing touches the disk if parsing or validation fails.
    pub fn package_json(&self, text: &str, request_id: Uuid) -> Result<ProjectArchive, GenerateError> {
        let diagram = parse_diagram(text)?;
        self.package(&diagram, request_id)
    }

    /// Generate and zip the project in a fresh `<work_dir>/<request_id>-XXXXXX` directory, removed on every path.
    pub fn package(&self, diagram: &Diagram, request_id: Uuid) -> Result<ProjectArchive, GenerateError> {
        let artifacts = self.generate(diagram)?;
        let archive = self.in_work_dir(request_id, |work| self.write_zip(work, &artifacts))?;
        tracing::info!(
            request_id = %request_id,
            classes = diagram.node_data_array.len(),
            files = artifacts.len(),
            bytes = archive.bytes.len(),
            "project archive generated"
        );
        Ok(archive)
    }

    fn in_work_dir<T>(
        &self,
        request_id: Uuid,
        f: impl FnOnce(&Path) -> Result<T, GenerateError>,
    ) -> Result<T, GenerateError> {
        std::fs::create_dir_all(&self.settings.work_dir)?;
        let work = tempfile::Builder::new()
            .prefix(&format!("{}-", request_id))
            .tempdir_in(&self.settings.work_dir)?;
        tracing::debug!(request_id = %request_id, path = %work.path().display(), "working directory created");
        let result = f(work.path());
        if let Err(e) = work.close() {
            tracing::warn!(request_id = %request_id, error = %e, "working directory cleanup failed");
        }
        result
    }

    fn write_zip(&self, work: &Path, artifacts: &[Artifact]) -> Result<ProjectArchive, GenerateError> {
        let file_name = self.settings.archive_name();
        let zip_path = work.join(&file_name);
        let file = BufWriter::new(File::create(&zip_path)?);
        let mut file = write_archive(&self.layout, artifacts, file)?;
        file.flush()?;
        drop(file);
        let bytes = std::fs::read(&zip_path)?;
        Ok(ProjectArchive { file_name, bytes })
    }
}

/// Write the layer directories and every artifact as a zip. Entries carry a fixed timestamp so the same input yields the same bytes.
pub fn write_archive<W: Write + Seek>(
    layout: &ProjectLayout,
    artifacts: &[Artifact],
    writer: W,
) -> Result<W, GenerateError> {
    let file_options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9))
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);
    let dir_options = file_options.unix_permissions(0o755);

    let mut zip = ZipWriter::new(writer);
    for layer in Layer::ALL {
        zip.add_directory(layout.dir(layer), dir_options)?;
    }
    for artifact in artifacts {
        zip.start_file(artifact.path.as_str(), file_options)?;
        zip.write_all(artifact.contents.as_bytes())?;
    }
    Ok(zip.finish()?)
}

//! Example consumer: generates a project archive offline, without the HTTP server.
//!
//! Run from repo root: `cargo run -p example-consumer -- diagram.json out.zip`
//! The diagram file may be a bare diagram or a `{ "diagramData": ... }` request body.

use diagram_codegen::diagram::parse_document;
use diagram_codegen::{GeneratorSettings, ProjectGenerator};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("diagram_codegen=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let input = args.next().map(PathBuf::from).ok_or("usage: example-consumer <diagram.json> [out.zip]")?;
    let text = std::fs::read_to_string(&input)?;
    let diagram = parse_document(&text)?;

    let generator = ProjectGenerator::new(GeneratorSettings::from_env()?);
    let archive = generator.package(&diagram, uuid::Uuid::new_v4())?;
    let output = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from(&archive.file_name));
    std::fs::write(&output, &archive.bytes)?;
    tracing::info!(
        classes = diagram.node_data_array.len(),
        bytes = archive.bytes.len(),
        "wrote {}",
        output.display()
    );
    Ok(())
}


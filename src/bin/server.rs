//! Generation server: POST a diagram, download a Spring Boot project.

use axum::Router;
use diagram_codegen::{common_routes, generate_routes, AppState, GeneratorSettings, ServerSettings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("diagram_codegen=info")),
        )
        .init();

    let generator = GeneratorSettings::from_env()?;
    let server = ServerSettings::from_env()?;
    tracing::info!(
        base_package = %generator.base_package,
        work_dir = %generator.work_dir.display(),
        strict_links = generator.strict_links,
        "generator configured"
    );
    let state = AppState::from_settings(generator);

    let app = Router::new()
        .merge(common_routes())
        .merge(generate_routes(state, server.max_body_bytes));

    let listener = TcpListener::bind(("0.0.0.0", server.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

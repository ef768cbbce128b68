//! Shared application state for all routes.

use crate::packager::ProjectGenerator;
use crate::settings::GeneratorSettings;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Immutable after startup; each request gets its own working directory.
    pub generator: Arc<ProjectGenerator>,
}

impl AppState {
    pub fn new(generator: ProjectGenerator) -> Self {
        AppState {
            generator: Arc::new(generator),
        }
    }

    pub fn from_settings(settings: GeneratorSettings) -> Self {
        AppState::new(ProjectGenerator::new(settings))
    }
}

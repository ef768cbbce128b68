//! Diagram codegen: turns a class diagram (nodes, properties, typed links) into a layered Spring Boot / JPA project.

pub mod codegen;
pub mod diagram;
pub mod error;
pub mod handlers;
pub mod naming;
pub mod packager;
pub mod resolver;
pub mod response;
pub mod routes;
pub mod settings;
pub mod state;

pub use diagram::{parse_diagram, validate, Diagram, DiagramPayload, EntityPlan, Link, Node, ValidationPolicy};
pub use error::{AppError, DiagramError, GenerateError, SettingsError};
pub use naming::{EnglishPluralizer, Pluralizer};
pub use packager::{write_archive, Artifact, ProjectArchive, ProjectGenerator};
pub use resolver::{identity_property, plan_entity, resolve_link};
pub use response::success_many;
pub use routes::{common_routes, generate_routes};
pub use settings::{GeneratorSettings, ServerSettings};
pub use state::AppState;

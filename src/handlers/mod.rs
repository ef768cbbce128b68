//! HTTP handlers for project generation.

pub mod generate;
pub use generate::*;

//! Route builders.

pub mod common;
pub mod generate;
pub use common::common_routes;
pub use generate::generate_routes;

//! CLI library for testing purposes

pub mod logging;
pub mod manifest;
pub mod validation;
pub mod verify;
pub mod version_cmd;

pub use validation::{ProjectContext, parse_silent, resolve_project, validate_anchor};

//! YAML configuration parsing for the deployit pipeline engine.
//!
//! This crate handles turning a pipeline document into executable resources:
//! - Document assembly ([`Assembler`], [`parse_str`], [`parse_file`])
//! - Generic config-key-to-field mapping ([`mapper`])
//! - Environment placeholder substitution ([`EnvVars`])

pub mod envs;
pub mod error;
pub mod mapper;
pub mod parser;

pub use envs::EnvVars;
pub use error::{ConfigError, ConfigResult};
pub use parser::Assembler;

use deployit_core::Resources;
use serde_yaml::Value;
use std::path::Path;

/// Parses a YAML pipeline document, substituting placeholders from the
/// current process environment.
pub fn parse_str(input: &str) -> ConfigResult<Resources> {
    let doc: Value = serde_yaml::from_str(input)?;
    Assembler::new().assemble(&doc)
}

/// Reads and parses a YAML pipeline document from disk.
pub fn parse_file(path: impl AsRef<Path>) -> ConfigResult<Resources> {
    let content = std::fs::read_to_string(path)?;
    parse_str(&content)
}

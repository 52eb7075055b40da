//! Configuration parsing errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no pipeline block in the input file")]
    MissingPipeline,

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("{0}")]
    UnknownType(#[from] deployit_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

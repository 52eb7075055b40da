//! Error types for deployit core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown {kind} type: {name}")]
    UnknownType { kind: &'static str, name: String },
}

pub type Result<T> = std::result::Result<T, Error>;

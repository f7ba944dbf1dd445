//! Error types for the playground library

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("unknown animation `{0}`")]
    UnknownAnimation(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;

// lister_core/src/error.rs
use crate::ecs::reflect::ReflectError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListerError {
    /// The report destination could not be created.
    #[error("could not create '{}': {source}", .path.display())]
    Create {
        path: PathBuf,
        source: io::Error,
    },
    /// Writing to an open report failed part way through.
    #[error("could not write report: {0}")]
    Io(#[from] io::Error),
    #[error("reflective access to `{type_name}` was denied")]
    AccessDenied { type_name: &'static str },
    #[error("could not read scene '{}': {source}", .path.display())]
    SceneRead {
        path: PathBuf,
        source: io::Error,
    },
    #[error("invalid scene: {0}")]
    SceneParse(#[from] ron::error::SpannedError),
    #[error("unknown component type `{0}`")]
    UnknownComponent(String),
    #[error("could not save config to '{}': {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not encode config: {0}")]
    ConfigEncode(#[from] ron::Error),
    #[error("could not decode component `{type_name}`: {source}")]
    Decode {
        type_name: String,
        source: ron::error::SpannedError,
    },
}

impl From<ReflectError> for ListerError {
    fn from(err: ReflectError) -> Self {
        match err {
            ReflectError::AccessDenied { type_name } => ListerError::AccessDenied { type_name },
        }
    }
}

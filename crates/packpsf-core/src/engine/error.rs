use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::error::{ParseError, WriteError};
use crate::core::models::topology::TopologyError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: ParseError },

    #[error(
        "Invalid topology in '{}'{}: {source}",
        .path.display(),
        .line.map(|l| format!(" at line {l}")).unwrap_or_default()
    )]
    Topology {
        path: PathBuf,
        line: Option<usize>,
        source: TopologyError,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: WriteError },

    #[error("Cannot write '{}': the Packmol input names no output coordinate file", .0.display())]
    MissingCoordinates(PathBuf),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    pub(crate) fn read(path: impl Into<PathBuf>) -> impl FnOnce(ParseError) -> Self {
        let path = path.into();
        move |source| Self::Read { path, source }
    }

    pub(crate) fn topology(
        path: impl Into<PathBuf>,
        line: Option<usize>,
    ) -> impl FnOnce(TopologyError) -> Self {
        let path = path.into();
        move |source| Self::Topology { path, line, source }
    }

    pub(crate) fn write(path: impl Into<PathBuf>) -> impl FnOnce(WriteError) -> Self {
        let path = path.into();
        move |source| Self::Write { path, source }
    }
}

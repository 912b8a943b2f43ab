//! Subtitle rendering errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error writing a rendered subtitle track to disk.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write subtitle file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RenderError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for subtitle rendering.
pub type RenderResult<T> = Result<T, RenderError>;

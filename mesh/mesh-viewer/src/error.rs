//! Top-level error type for the viewer library.

use mesh_subdivide::SubdivideError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop a viewer session.
///
/// Rejected command lines are not in this list: a script logs them and
/// keeps going.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A subdivide request failed.
    #[error(transparent)]
    Subdivide(#[from] SubdivideError),

    /// Reading commands or writing replies failed.
    #[error("command stream I/O failed at line {line}: {source}")]
    Io {
        /// 1-based line number being processed.
        line: usize,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for viewer operations.
pub type ViewerResult<T> = std::result::Result<T, ViewerError>;

//! Error types for tree validation, persistence and session state.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by the tree model, the project document and the session.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cycle detected at node '{id}'")]
    Cycle { id: String },

    #[error("Invalid node data: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Path must have .mbird extension: {}", path.display())]
    MissingExtension { path: PathBuf },

    #[error("Directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Tree file not found: {}", path.display())]
    TreeFileNotFound { path: PathBuf },

    #[error("No root node loaded")]
    NoRoot,

    #[error("No project loaded")]
    NoProject,

    #[error("No project path set")]
    NoProjectPath,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The semantic category of an [`Error`], used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input (tree data or path) was rejected.
    Validation,
    /// A directory or tree file the caller pointed at does not exist.
    NotFound,
    /// The operation needs a document, root or path that is not there.
    State,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Cycle { .. } | Self::Malformed(_) | Self::MissingExtension { .. } => {
                ErrorKind::Validation
            }
            Self::DirectoryNotFound { .. }
            | Self::NotADirectory { .. }
            | Self::TreeFileNotFound { .. } => ErrorKind::NotFound,
            Self::NoRoot | Self::NoProject | Self::NoProjectPath => ErrorKind::State,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

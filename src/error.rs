use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum RepocatError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("error opening exclusion file {path}: {source}")]
    IgnoreFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },
    #[error("error reading directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("root path not found: {0}")]
    RootNotFound(PathBuf),
    #[error("tokenizer error: {0}")]
    Tokenizer(String),
    #[error("error writing output: {0}")]
    Output(#[source] std::io::Error),
}
impl RepocatError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RepocatError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RepocatError::ReadDir {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            RepocatError::Io { .. } | RepocatError::Output(_) => 1,
            RepocatError::IgnoreFile { .. }
            | RepocatError::InvalidPattern { .. }
            | RepocatError::Tokenizer(_) => 2,
            RepocatError::RootNotFound(_) => 3,
            RepocatError::ReadDir { .. } => 4,
        }
    }
}

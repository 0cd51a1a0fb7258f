//! Error types for generator runs.

use opgen_catalog::{CatalogError, ParseError};
use opgen_codegen::CodegenError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for a generator run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The host does not meet the runtime's requirements.
    #[error("unsupported environment: {message}")]
    Environment {
        /// Error message.
        message: String,
    },

    /// An input file or directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The operation list could not be decoded or validated.
    #[error("invalid operation catalog {}: {source}", path.display())]
    Catalog {
        /// Catalog path.
        path: PathBuf,
        /// Underlying error.
        source: CatalogError,
    },

    /// A documentation override file could not be parsed.
    #[error("invalid documentation file {}: {source}", path.display())]
    Parse {
        /// Override file path.
        path: PathBuf,
        /// Underlying error.
        source: ParseError,
    },

    /// Wrapper emission failed.
    #[error("code generation failed: {0}")]
    Codegen(#[from] CodegenError),

    /// The output could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

impl RunError {
    /// Creates an environment error with the given message.
    pub fn environment(message: impl Into<String>) -> Self {
        Self::Environment {
            message: message.into(),
        }
    }

    /// Creates a read error for `path`.
    pub fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a write error for `path`.
    pub fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Process exit code for this error.
    ///
    /// 1 for catalog or documentation input errors, 2 for emission errors,
    /// 3 for I/O errors, 4 for environment errors.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Catalog { .. } | Self::Parse { .. } => 1,
            Self::Codegen(CodegenError::Catalog(_)) => 1,
            Self::Codegen(CodegenError::Io(_)) => 3,
            Self::Codegen(_) => 2,
            Self::Read { .. } | Self::Write { .. } => 3,
            Self::Environment { .. } => 4,
        }
    }
}

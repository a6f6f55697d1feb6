//! Error types for the config and context store.

use std::path::{Path, PathBuf};

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised while locating, reading or writing settings files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No platform home directory and no override set.
    #[error("error finding home: could not determine the user home directory")]
    HomeNotFound,

    /// Failed to create a directory.
    #[error("error creating {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read a settings file.
    #[error("error reading {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a settings file.
    #[error("error writing {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Settings file is not a flat string mapping.
    #[error("error parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Settings could not be serialized.
    #[error("error serializing settings: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// Named context has no file in the contexts directory.
    #[error("cannot find context file={}", path.display())]
    ContextNotFound { name: String, path: PathBuf },

    /// Context name cannot be used as a file name.
    #[error("invalid context name '{0}'")]
    InvalidContextName(String),
}

impl StoreError {
    pub(crate) fn create_dir(path: &Path, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn read_file(path: &Path, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write_file(path: &Path, source: std::io::Error) -> Self {
        Self::WriteFile {
            path: path.to_path_buf(),
            source,
        }
    }
}

//! Errors raised while loading blueprints, catalogs and stylesheets from disk

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Blueprint files must end in `.toml` or `.json`
    #[error("unsupported file extension for '{}' (expected .toml or .json)", path.display())]
    UnsupportedExtension { path: PathBuf },
}

impl LoadError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path of the file involved, when the error is tied to one
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } | Self::UnsupportedExtension { path } => Some(path),
            Self::Toml(_) | Self::Json(_) => None,
        }
    }
}

//! Errors raised while generating the settings file

use std::path::PathBuf;
use thiserror::Error;

/// Initialization errors
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Could not find {}", path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("Invalid JSON after processing: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine the current directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

impl InitError {
    /// Wrap an I/O error for `path`, promoting `NotFound` on the template
    /// to [`InitError::TemplateNotFound`]
    pub(crate) fn reading_template(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::TemplateNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Follow-up line to print under the error message, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::TemplateNotFound { .. } => {
                Some("Make sure you run this from the project root directory.")
            }
            Self::InvalidJson { .. } => {
                Some("The template must be valid JSON once $PWD is replaced.")
            }
            _ => None,
        }
    }
}

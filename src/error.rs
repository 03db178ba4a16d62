//! Error types shared by every theme component.
//!
//! Not-found is the common, non-fatal outcome: callers check
//! [`ThemeError::is_not_found`] and fall back (pass the request on, or treat
//! a missing schema as "no settings"). Everything else is propagated.

use std::io;
use std::path::{Path, PathBuf};

use crate::theme::PackageValidationError;

pub type Result<T> = std::result::Result<T, ThemeError>;

/// Which external collaborator produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorStage {
    StyleCompile,
    ScriptBundle,
    TemplateRender,
}

impl std::fmt::Display for CollaboratorStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::StyleCompile => "style compiler",
            Self::ScriptBundle => "script bundler",
            Self::TemplateRender => "template renderer",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("{} not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("broken package {}: {}", path.display(), summarize(errors))]
    Validation {
        path: PathBuf,
        errors: Vec<PackageValidationError>,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{stage} failed: {source}")]
    Collaborator {
        stage: CollaboratorStage,
        #[source]
        source: anyhow::Error,
    },
}

fn summarize(errors: &[PackageValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.path, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ThemeError {
    /// Map an `io::Error` for `path`, turning `NotFound` into [`ThemeError::NotFound`].
    pub fn from_io(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn parse(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn collaborator(stage: CollaboratorStage, source: anyhow::Error) -> Self {
        Self::Collaborator { stage, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

//! Package descriptor loading.
//!
//! One loader, two entry points: [`PackageLoader::load_blocking`] for the
//! active theme at startup (a broken active theme must stop the process
//! before it serves anything) and [`PackageLoader::load`] for registry scans,
//! where each failure only excludes one candidate. Both share
//! [`parse_package`], so validation lives in exactly one place.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::descriptor::PACKAGE_FILENAME;
use super::validate::validate_package;
use crate::error::{Result, ThemeError};
use crate::model::filesystem::{FileSystem, StdFileSystem};
use crate::services::fs::{FsBackend, LocalFsBackend};

/// Validated theme package metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parse and validate the contents of a package descriptor read from `path`.
pub fn parse_package(path: &Path, content: &str) -> Result<PackageMetadata> {
    let value: Value = serde_json::from_str(content).map_err(|e| ThemeError::parse(path, e))?;
    validate_package(&value).map_err(|errors| ThemeError::Validation {
        path: path.to_path_buf(),
        errors,
    })
}

/// Reads `bower.json` from theme directories.
#[derive(Clone)]
pub struct PackageLoader {
    blocking_fs: Arc<dyn FileSystem>,
    fs: Arc<dyn FsBackend>,
}

impl std::fmt::Debug for PackageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageLoader").finish_non_exhaustive()
    }
}

impl Default for PackageLoader {
    fn default() -> Self {
        Self::new(Arc::new(StdFileSystem), Arc::new(LocalFsBackend::new()))
    }
}

impl PackageLoader {
    pub fn new(blocking_fs: Arc<dyn FileSystem>, fs: Arc<dyn FsBackend>) -> Self {
        Self { blocking_fs, fs }
    }

    /// Load the package of the theme in `theme_dir`, blocking the caller.
    pub fn load_blocking(&self, theme_dir: &Path) -> Result<PackageMetadata> {
        let path = theme_dir.join(PACKAGE_FILENAME);
        let is_file = self
            .blocking_fs
            .is_file(&path)
            .map_err(|e| ThemeError::from_io(&path, e))?;
        if !is_file {
            return Err(ThemeError::NotFound { path });
        }
        let content = self
            .blocking_fs
            .read_to_string(&path)
            .map_err(|e| ThemeError::from_io(&path, e))?;
        parse_package(&path, &content)
    }

    /// Load the package of the theme in `theme_dir`.
    pub async fn load(&self, theme_dir: &Path) -> Result<PackageMetadata> {
        let path = theme_dir.join(PACKAGE_FILENAME);
        let is_file = self
            .fs
            .is_file(&path)
            .await
            .map_err(|e| ThemeError::from_io(&path, e))?;
        if !is_file {
            return Err(ThemeError::NotFound { path });
        }
        let content = self
            .fs
            .read_to_string(&path)
            .await
            .map_err(|e| ThemeError::from_io(&path, e))?;
        parse_package(&path, &content)
    }
}

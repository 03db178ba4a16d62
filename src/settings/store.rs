//! Persisted per-theme setting overrides (read side only).

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::SettingsMap;
use crate::error::{Result, ThemeError};
use crate::services::fs::FsBackend;
use crate::theme::ThemeDescriptor;

/// Shape of a stored settings document.
///
/// Only `current` is used. Stored presets are ignored because presets are
/// always recomputed from the schema.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StoredSettings {
    #[serde(default)]
    pub current: SettingsMap,
}

/// Source of persisted overrides for one theme.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Return the stored document, or `None` when nothing has been saved yet.
    async fn find_all(&self) -> Result<Option<StoredSettings>>;

    /// Convenience: the override map, empty when the store has no data.
    async fn overrides(&self) -> Result<SettingsMap> {
        Ok(self
            .find_all()
            .await?
            .map(|stored| stored.current)
            .unwrap_or_default())
    }
}

/// Store backed by `config/settings_data.json` inside the theme directory.
#[derive(Clone)]
pub struct JsonFileSettingsStore {
    fs: Arc<dyn FsBackend>,
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(fs: Arc<dyn FsBackend>, path: PathBuf) -> Self {
        Self { fs, path }
    }

    pub fn for_theme(fs: Arc<dyn FsBackend>, descriptor: &ThemeDescriptor) -> Self {
        Self::new(fs, descriptor.settings_data_path())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn find_all(&self) -> Result<Option<StoredSettings>> {
        let is_file = self
            .fs
            .is_file(&self.path)
            .await
            .map_err(|e| ThemeError::from_io(&self.path, e))?;
        if !is_file {
            return Ok(None);
        }

        let content = match self.fs.read_to_string(&self.path).await {
            Ok(content) => content,
            // Removed between the check and the read
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ThemeError::from_io(&self.path, e)),
        };
        let stored: StoredSettings =
            serde_json::from_str(&content).map_err(|e| ThemeError::parse(&self.path, e))?;
        Ok(Some(stored))
    }
}

/// In-memory store, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    stored: Option<StoredSettings>,
}

impl MemorySettingsStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_overrides(current: SettingsMap) -> Self {
        Self {
            stored: Some(StoredSettings { current }),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn find_all(&self) -> Result<Option<StoredSettings>> {
        Ok(self.stored.clone())
    }
}

//! Merge of schema-derived presets with persisted overrides.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::{Instrument, Span};

use super::schema::load_schema;
use super::store::SettingsStore;
use super::SettingsMap;
use crate::error::Result;
use crate::services::fs::FsBackend;

/// Name of the preset derived from the schema
pub const DEFAULT_PRESET: &str = "Default";

/// Preset name -> (field id -> value). Always contains [`DEFAULT_PRESET`].
pub type SettingsPresets = BTreeMap<String, SettingsMap>;

static EMPTY_PRESET: Lazy<SettingsMap> = Lazy::new(SettingsMap::new);

/// Final settings exposed to request-time consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSettings {
    pub current: SettingsMap,
    pub presets: SettingsPresets,
}

impl ResolvedSettings {
    /// Overrides win, the `Default` preset fills the gaps.
    ///
    /// Override keys that the schema does not know about are kept as-is.
    pub fn merge(overrides: SettingsMap, default_preset: SettingsMap) -> Self {
        let mut current = overrides;
        for (key, value) in &default_preset {
            if !current.contains_key(key) {
                current.insert(key.clone(), value.clone());
            }
        }

        let mut presets = SettingsPresets::new();
        presets.insert(DEFAULT_PRESET.to_string(), default_preset);
        Self { current, presets }
    }

    /// Nothing configurable: empty `current`, empty `Default` preset.
    pub fn empty() -> Self {
        Self::merge(SettingsMap::new(), SettingsMap::new())
    }

    /// The `Default` preset; empty when `presets` was built without one.
    pub fn default_preset(&self) -> &SettingsMap {
        self.presets.get(DEFAULT_PRESET).unwrap_or(&EMPTY_PRESET)
    }
}

/// Resolves the settings of one theme from its schema file and store.
#[derive(Clone)]
pub struct SettingsResolver {
    fs: Arc<dyn FsBackend>,
    span: Span,
}

impl SettingsResolver {
    pub fn new(fs: Arc<dyn FsBackend>) -> Self {
        Self {
            fs,
            span: tracing::debug_span!("settings_resolver"),
        }
    }

    /// Log under `span` instead of the default `settings_resolver` span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Resolve settings. A missing schema yields no preset values; a missing
    /// store yields no overrides. Malformed JSON in either is an error.
    pub async fn resolve(
        &self,
        schema_path: &Path,
        store: &dyn SettingsStore,
    ) -> Result<ResolvedSettings> {
        async {
            let overrides = store.overrides().await?;

            let default_preset = match load_schema(self.fs.as_ref(), schema_path).await {
                Ok(schema) => schema.default_preset(),
                Err(e) if e.is_not_found() => {
                    tracing::debug!(path = %schema_path.display(), "no settings schema");
                    SettingsMap::new()
                }
                Err(e) => return Err(e),
            };

            tracing::debug!(
                overrides = overrides.len(),
                defaults = default_preset.len(),
                "resolved settings"
            );
            Ok(ResolvedSettings::merge(overrides, default_preset))
        }
        .instrument(self.span.clone())
        .await
    }
}

//! Settings schema loading and the derived `Default` preset.
//!
//! The schema file is a JSON array of sections. A section may carry a
//! `settings` array of field objects; a field contributes to the preset only
//! when it has a non-empty string `id` and a `default` key:
//!
//! ```json
//! [
//!   { "name": "Colors", "settings": [
//!       { "id": "base", "type": "color", "default": "blue" },
//!       { "id": "link", "type": "color", "default": "{base}" }
//!   ]}
//! ]
//! ```

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::placeholder::interpolate;
use super::SettingsMap;
use crate::error::{Result, ThemeError};
use crate::services::fs::FsBackend;

/// One configurable field with its default value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsField {
    pub id: String,
    pub default: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SettingsSection {
    pub name: Option<String>,
    pub fields: Vec<SettingsField>,
}

/// Ordered sections of ordered fields. Order drives placeholder resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SettingsSchema {
    pub sections: Vec<SettingsSection>,
}

fn parse_field(raw: &Value) -> Option<SettingsField> {
    let id = raw.get("id")?.as_str().filter(|id| !id.is_empty())?;
    let default = raw.get("default")?;
    Some(SettingsField {
        id: id.to_string(),
        default: default.clone(),
    })
}

fn parse_section(raw: &Value) -> SettingsSection {
    let fields = raw
        .get("settings")
        .and_then(Value::as_array)
        .map(|fields| fields.iter().filter_map(parse_field).collect())
        .unwrap_or_default();
    SettingsSection {
        name: raw.get("name").and_then(Value::as_str).map(str::to_string),
        fields,
    }
}

impl SettingsSchema {
    /// Parse schema JSON read from `path`. Fields without an id or a default
    /// are dropped here.
    pub fn from_json(path: &Path, content: &str) -> Result<Self> {
        let raw: Vec<Value> =
            serde_json::from_str(content).map_err(|e| ThemeError::parse(path, e))?;
        Ok(Self {
            sections: raw.iter().map(parse_section).collect(),
        })
    }

    /// All fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &SettingsField> {
        self.sections.iter().flat_map(|section| section.fields.iter())
    }

    /// Compute the `Default` preset.
    ///
    /// Single forward pass in declaration order. String defaults are
    /// interpolated against the preset as built so far, so `{id}` only sees
    /// fields declared earlier; later (or unknown) ids substitute as blank.
    /// A repeated id keeps its first position and takes the last value.
    pub fn default_preset(&self) -> SettingsMap {
        let mut preset = SettingsMap::new();
        for field in self.fields() {
            let value = match &field.default {
                Value::String(template) => Value::String(interpolate(template, &preset)),
                other => other.clone(),
            };
            preset.insert(field.id.clone(), value);
        }
        preset
    }
}

/// Load the schema at `path`.
///
/// A missing file is [`ThemeError::NotFound`]; callers decide whether that
/// means "no configurable settings".
pub async fn load_schema(fs: &dyn FsBackend, path: &Path) -> Result<SettingsSchema> {
    let is_file = fs
        .is_file(path)
        .await
        .map_err(|e| ThemeError::from_io(path, e))?;
    if !is_file {
        return Err(ThemeError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs
        .read_to_string(path)
        .await
        .map_err(|e| ThemeError::from_io(path, e))?;
    SettingsSchema::from_json(path, &content)
}

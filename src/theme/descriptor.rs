//! Theme directory layout.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Package descriptor file at the root of every theme directory
pub const PACKAGE_FILENAME: &str = "bower.json";
/// Publicly served assets
pub const PUBLIC_DIRNAME: &str = "assets";
pub const SCRIPTS_DIRNAME: &str = "scripts";
pub const STYLES_DIRNAME: &str = "styles";
pub const TEMPLATES_DIRNAME: &str = "templates";
pub const CONFIG_DIRNAME: &str = "config";
/// Declarative list of configurable fields, under `config/`
pub const SETTINGS_SCHEMA_FILENAME: &str = "settings_schema.json";
/// Persisted overrides document, under `config/`
pub const SETTINGS_DATA_FILENAME: &str = "settings_data.json";

/// Name and paths of one theme.
///
/// Every path is derived from `root` and the directory-name constants above,
/// once, at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeDescriptor {
    pub name: String,
    pub root: PathBuf,
    pub package_path: PathBuf,
    pub public_path: PathBuf,
    pub scripts_path: PathBuf,
    pub styles_path: PathBuf,
    pub templates_path: PathBuf,
    pub config_path: PathBuf,
}

impl ThemeDescriptor {
    /// Describe theme `name` living under `themes_root`.
    pub fn new(themes_root: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let name = name.into();
        let root = themes_root.as_ref().join(&name);
        Self::at(name, root)
    }

    /// Describe a theme whose directory is `root`.
    pub fn at(name: impl Into<String>, root: PathBuf) -> Self {
        Self {
            name: name.into(),
            package_path: root.join(PACKAGE_FILENAME),
            public_path: root.join(PUBLIC_DIRNAME),
            scripts_path: root.join(SCRIPTS_DIRNAME),
            styles_path: root.join(STYLES_DIRNAME),
            templates_path: root.join(TEMPLATES_DIRNAME),
            config_path: root.join(CONFIG_DIRNAME),
            root,
        }
    }

    pub fn settings_schema_path(&self) -> PathBuf {
        self.config_path.join(SETTINGS_SCHEMA_FILENAME)
    }

    pub fn settings_data_path(&self) -> PathBuf {
        self.config_path.join(SETTINGS_DATA_FILENAME)
    }
}

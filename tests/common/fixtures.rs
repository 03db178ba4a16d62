//! Theme trees on disk, built in a temp directory.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use themeserve::settings::SettingsMap;
use themeserve::theme::{ActiveTheme, ThemeOptions};

/// A themes root in a temp directory. Dropped with the fixture.
pub struct ThemesRoot {
    dir: TempDir,
}

impl ThemesRoot {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create `name` with a valid package descriptor.
    pub fn theme(&self, name: &str) -> ThemeDir {
        let theme = self.bare_theme(name);
        theme.write(
            "bower.json",
            &format!(r#"{{"name": "{name}", "version": "1.0.0"}}"#),
        );
        theme
    }

    /// Create the `name` directory with nothing in it.
    pub fn bare_theme(&self, name: &str) -> ThemeDir {
        let root = self.path().join(name);
        std::fs::create_dir_all(&root).unwrap();
        ThemeDir { root }
    }

    pub fn options(&self, theme: &str) -> ThemeOptions {
        ThemeOptions::new(self.path(), theme)
    }

    pub fn activate(&self, theme: &str) -> ActiveTheme {
        ActiveTheme::new(self.options(theme)).unwrap()
    }
}

pub struct ThemeDir {
    root: PathBuf,
}

impl ThemeDir {
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write `content` at `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
        self
    }

    pub fn schema(&self, schema: Value) -> &Self {
        self.write("config/settings_schema.json", &schema.to_string())
    }

    pub fn overrides(&self, current: Value) -> &Self {
        let data = serde_json::json!({ "current": current });
        self.write("config/settings_data.json", &data.to_string())
    }
}

/// Object literal to settings map.
pub fn map(value: Value) -> SettingsMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

//! Request path classification.

use std::path::{Path, PathBuf};

use crate::theme::{
    ThemeDescriptor, ThemeOptions, PUBLIC_DIRNAME, SCRIPTS_DIRNAME, STYLES_DIRNAME,
};

const SETTINGS_QUERY_FILENAME: &str = "settings.json";

/// What a request path asks the theme for.
///
/// Relative paths held here are already checked: no `..`, no hidden or
/// empty segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRoute {
    /// `/assets/styles/<file>.scss`
    Style { relative: PathBuf },
    /// `/assets/scripts/settings.json`
    SettingsQuery,
    /// `/assets/scripts/<file>.js`
    Script { relative: PathBuf },
    /// Anything else under `/assets/`, served by the host's static handler
    Public,
    /// `/`
    Index,
    /// Any other path, looked up as a template
    Template { logical: String },
}

fn segments(path: &str) -> Option<Vec<&str>> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Some(Vec::new());
    }
    let parts: Vec<&str> = trimmed.split('/').collect();
    let safe = parts
        .iter()
        .all(|part| !part.is_empty() && !part.starts_with('.') && !part.contains('\\'));
    safe.then_some(parts)
}

fn relative(parts: &[&str]) -> PathBuf {
    parts.iter().collect()
}

impl AssetRoute {
    /// Classify a request path. `None` means the path can never name a
    /// theme file (traversal, hidden or empty segments).
    pub fn parse(path: &str) -> Option<Self> {
        let parts = segments(path)?;

        let Some((first, rest)) = parts.split_first() else {
            return Some(Self::Index);
        };
        if *first != PUBLIC_DIRNAME {
            return Some(Self::Template {
                logical: parts.join("/"),
            });
        }

        let route = match rest {
            [dir, SETTINGS_QUERY_FILENAME] if *dir == SCRIPTS_DIRNAME => Self::SettingsQuery,
            [dir, file @ ..] if *dir == STYLES_DIRNAME && has_extension(file, "scss") => {
                Self::Style {
                    relative: relative(file),
                }
            }
            [dir, file @ ..] if *dir == SCRIPTS_DIRNAME && has_extension(file, "js") => {
                Self::Script {
                    relative: relative(file),
                }
            }
            _ => Self::Public,
        };
        Some(route)
    }

    /// Short name, for logs and the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Style { .. } => "style",
            Self::SettingsQuery => "settings",
            Self::Script { .. } => "script",
            Self::Public => "public",
            Self::Index | Self::Template { .. } => "template",
        }
    }

    /// The theme file this route reads, if any.
    pub fn source_path(
        &self,
        descriptor: &ThemeDescriptor,
        options: &ThemeOptions,
    ) -> Option<PathBuf> {
        match self {
            Self::Style { relative } => Some(descriptor.styles_path.join(relative)),
            Self::Script { relative } => Some(descriptor.scripts_path.join(relative)),
            Self::Index => Some(template_path(
                &descriptor.templates_path,
                &options.index_template,
                &options.template_extension,
            )),
            Self::Template { logical } => Some(template_path(
                &descriptor.templates_path,
                logical,
                &options.template_extension,
            )),
            Self::SettingsQuery | Self::Public => None,
        }
    }
}

fn has_extension(file: &[&str], extension: &str) -> bool {
    file.last()
        .and_then(|name| Path::new(name).extension())
        .is_some_and(|ext| ext == extension)
}

fn template_path(templates: &Path, logical: &str, extension: &str) -> PathBuf {
    templates.join(format!("{logical}.{extension}"))
}

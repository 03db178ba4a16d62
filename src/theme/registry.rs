//! Theme discovery under a themes root directory.

use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{Instrument, Span};

use super::package::{PackageLoader, PackageMetadata};
use crate::error::{Result, ThemeError};
use crate::services::fs::FsBackend;

/// Scans a themes root and reports the entries that are usable themes.
///
/// An entry is a theme when it is a non-hidden directory whose package
/// descriptor loads and validates. Per-entry failures only exclude that
/// entry; the scan itself fails only when the root cannot be listed.
#[derive(Clone)]
pub struct ThemeRegistry {
    fs: Arc<dyn FsBackend>,
    loader: PackageLoader,
    span: Span,
}

impl ThemeRegistry {
    pub fn new(fs: Arc<dyn FsBackend>, loader: PackageLoader) -> Self {
        Self {
            fs,
            loader,
            span: tracing::debug_span!("theme_registry"),
        }
    }

    /// Log under `span` instead of the default `theme_registry` span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Names of all valid themes under `themes_root`, in no particular order.
    pub async fn discover_themes(&self, themes_root: &Path) -> Result<Vec<String>> {
        let packages = self.discover_packages(themes_root).await?;
        Ok(packages.into_iter().map(|(name, _)| name).collect())
    }

    /// Like [`discover_themes`](Self::discover_themes), also returning each
    /// theme's package metadata.
    pub async fn discover_packages(
        &self,
        themes_root: &Path,
    ) -> Result<Vec<(String, PackageMetadata)>> {
        async {
            let entries = self
                .fs
                .read_dir(themes_root)
                .await
                .map_err(|e| ThemeError::from_io(themes_root, e))?;

            let candidates: Vec<_> = entries
                .into_iter()
                .filter(|entry| !entry.is_hidden() && entry.is_dir())
                .collect();
            tracing::debug!(
                root = %themes_root.display(),
                candidates = candidates.len(),
                "scanning themes"
            );

            let loader = &self.loader;
            let checks = candidates.into_iter().map(move |entry| async move {
                match loader.load(&entry.path).await {
                    Ok(package) => Some((entry.name, package)),
                    Err(e) => {
                        tracing::debug!(theme = %entry.name, error = %e, "excluding theme");
                        None
                    }
                }
            });

            let themes: Vec<_> = join_all(checks).await.into_iter().flatten().collect();
            let names: Vec<_> = themes.iter().map(|(name, _)| name.as_str()).collect();
            tracing::debug!(themes = ?names, "found themes");
            Ok::<_, ThemeError>(themes)
        }
        .instrument(self.span.clone())
        .await
    }
}

//! Contracts for the external style, script and template engines.
//!
//! The dispatcher only prepares inputs and wraps outputs; compiling SCSS,
//! bundling scripts and rendering templates happen behind these traits.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::settings::SettingsMap;

/// Input for a style compilation
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSource {
    /// Variable preamble followed by the stylesheet text
    pub source_text: String,
    /// Directories searched for `@import`
    pub include_paths: Vec<PathBuf>,
}

#[async_trait]
pub trait StyleCompiler: Send + Sync {
    /// Compile to CSS text
    async fn compile(&self, source: StyleSource) -> anyhow::Result<String>;
}

/// Options handed to the script bundler
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BundleOptions {
    /// Resolved `current` settings, for bundlers that inline them
    pub settings: SettingsMap,
}

#[async_trait]
pub trait ScriptBundler: Send + Sync {
    /// Bundle `entry_path` and produce the full response (headers included)
    async fn bundle(
        &self,
        entry_path: PathBuf,
        options: BundleOptions,
    ) -> anyhow::Result<http::Response<Vec<u8>>>;
}

#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    /// Render the template at `template_path` with `data` in scope
    async fn render(&self, template_path: PathBuf, data: SettingsMap) -> anyhow::Result<String>;
}

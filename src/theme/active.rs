//! The active theme and the per-request context built from it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::Span;

use super::descriptor::ThemeDescriptor;
use super::package::{PackageLoader, PackageMetadata};
use super::registry::ThemeRegistry;
use crate::error::{Result, ThemeError};
use crate::model::filesystem::{FileSystem, StdFileSystem};
use crate::services::fs::{FsBackend, LocalFsBackend};
use crate::settings::{JsonFileSettingsStore, ResolvedSettings, SettingsResolver, SettingsStore};

fn default_themes_root() -> PathBuf {
    PathBuf::from("themes")
}

fn default_template_extension() -> String {
    "html".to_string()
}

fn default_index_template() -> String {
    "index".to_string()
}

/// Which theme to serve and where themes live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeOptions {
    /// Name of the active theme (its directory name under `themes_root`)
    pub theme: String,

    #[serde(default = "default_themes_root")]
    pub themes_root: PathBuf,

    /// Extension appended to template lookups, without the dot
    #[serde(default = "default_template_extension")]
    pub template_extension: String,

    /// Template rendered for `/`
    #[serde(default = "default_index_template")]
    pub index_template: String,
}

impl ThemeOptions {
    pub fn new(themes_root: impl Into<PathBuf>, theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            themes_root: themes_root.into(),
            template_extension: default_template_extension(),
            index_template: default_index_template(),
        }
    }

    /// Load options from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ThemeError::from_io(path, e))?;
        serde_json::from_str(&content).map_err(|e| ThemeError::parse(path, e))
    }
}

/// The theme selected at startup, shared read-only by all requests.
#[derive(Clone)]
pub struct ActiveTheme {
    options: ThemeOptions,
    descriptor: Arc<ThemeDescriptor>,
    package: Arc<PackageMetadata>,
    fs: Arc<dyn FsBackend>,
    registry: ThemeRegistry,
    resolver: SettingsResolver,
    store: Arc<dyn SettingsStore>,
}

impl std::fmt::Debug for ActiveTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveTheme")
            .field("options", &self.options)
            .field("descriptor", &self.descriptor)
            .field("package", &self.package)
            .finish_non_exhaustive()
    }
}

impl ActiveTheme {
    /// Select the theme named in `options` using the local filesystem.
    ///
    /// Blocks while the package descriptor is read. A missing or broken
    /// package is returned as an error here, never deferred to a request.
    pub fn new(options: ThemeOptions) -> Result<Self> {
        Self::with_backends(options, Arc::new(StdFileSystem), Arc::new(LocalFsBackend::new()))
    }

    pub fn with_backends(
        options: ThemeOptions,
        blocking_fs: Arc<dyn FileSystem>,
        fs: Arc<dyn FsBackend>,
    ) -> Result<Self> {
        let descriptor = ThemeDescriptor::new(&options.themes_root, options.theme.clone());
        let loader = PackageLoader::new(blocking_fs, fs.clone());
        let package = loader.load_blocking(&descriptor.root)?;
        tracing::info!(
            theme = %descriptor.name,
            version = %package.version,
            path = %descriptor.root.display(),
            "selected theme"
        );

        let store = Arc::new(JsonFileSettingsStore::for_theme(fs.clone(), &descriptor));
        Ok(Self {
            registry: ThemeRegistry::new(fs.clone(), loader),
            resolver: SettingsResolver::new(fs.clone()),
            options,
            descriptor: Arc::new(descriptor),
            package: Arc::new(package),
            fs,
            store,
        })
    }

    /// Read overrides from `store` instead of `config/settings_data.json`.
    pub fn with_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.store = store;
        self
    }

    /// Log registry and resolver work under `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.registry = self.registry.with_span(span.clone());
        self.resolver = self.resolver.with_span(span);
        self
    }

    pub fn options(&self) -> &ThemeOptions {
        &self.options
    }

    pub fn descriptor(&self) -> &Arc<ThemeDescriptor> {
        &self.descriptor
    }

    pub fn package(&self) -> &Arc<PackageMetadata> {
        &self.package
    }

    pub fn fs(&self) -> &Arc<dyn FsBackend> {
        &self.fs
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    /// Valid themes under the configured themes root.
    pub async fn available_themes(&self) -> Result<Vec<String>> {
        self.registry
            .discover_themes(&self.options.themes_root)
            .await
    }

    /// Fresh context for one request. Settings are not resolved until first read.
    pub fn build_context(&self) -> ThemeContext {
        ThemeContext {
            descriptor: self.descriptor.clone(),
            package: self.package.clone(),
            resolver: self.resolver.clone(),
            store: self.store.clone(),
            settings: OnceCell::new(),
        }
    }

    /// Build a context and store it in the request's extensions.
    pub fn attach<B>(&self, request: &mut http::Request<B>) -> Arc<ThemeContext> {
        let context = Arc::new(self.build_context());
        request.extensions_mut().insert(context.clone());
        context
    }
}

/// Per-request view of the active theme.
///
/// Descriptor and package are shared with [`ActiveTheme`]; resolved settings
/// belong to this request only and are computed at most once.
pub struct ThemeContext {
    descriptor: Arc<ThemeDescriptor>,
    package: Arc<PackageMetadata>,
    resolver: SettingsResolver,
    store: Arc<dyn SettingsStore>,
    settings: OnceCell<ResolvedSettings>,
}

impl std::fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("theme", &self.descriptor.name)
            .field("settings", &self.settings.get())
            .finish_non_exhaustive()
    }
}

impl ThemeContext {
    /// Context previously stored by [`ActiveTheme::attach`].
    pub fn from_request<B>(request: &http::Request<B>) -> Option<Arc<ThemeContext>> {
        request.extensions().get::<Arc<ThemeContext>>().cloned()
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &ThemeDescriptor {
        &self.descriptor
    }

    pub fn package(&self) -> &PackageMetadata {
        &self.package
    }

    /// Resolved settings, resolving on first call.
    ///
    /// A failed resolution is not cached; the next call tries again.
    pub async fn settings(&self) -> Result<&ResolvedSettings> {
        self.settings
            .get_or_try_init(|| async {
                self.resolver
                    .resolve(&self.descriptor.settings_schema_path(), self.store.as_ref())
                    .await
            })
            .await
    }
}

//! Recording fakes for the external engines.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use themeserve::dispatch::{
    AssetDispatcher, BundleOptions, ScriptBundler, StyleCompiler, StyleSource, TemplateRenderer,
};
use themeserve::settings::SettingsMap;
use themeserve::theme::ActiveTheme;

/// Echoes the source text back as "CSS", or fails when told to.
#[derive(Default)]
pub struct FakeStyleCompiler {
    pub calls: Mutex<Vec<StyleSource>>,
    pub fail: bool,
}

#[async_trait]
impl StyleCompiler for FakeStyleCompiler {
    async fn compile(&self, source: StyleSource) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(source.clone());
        if self.fail {
            anyhow::bail!("undefined variable");
        }
        Ok(source.source_text)
    }
}

#[derive(Default)]
pub struct FakeScriptBundler {
    pub calls: Mutex<Vec<(PathBuf, BundleOptions)>>,
}

#[async_trait]
impl ScriptBundler for FakeScriptBundler {
    async fn bundle(
        &self,
        entry_path: PathBuf,
        options: BundleOptions,
    ) -> anyhow::Result<http::Response<Vec<u8>>> {
        let body = format!("bundle:{}", entry_path.display()).into_bytes();
        self.calls.lock().unwrap().push((entry_path, options));
        Ok(http::Response::builder()
            .header(http::header::CONTENT_TYPE, "application/javascript")
            .body(body)?)
    }
}

#[derive(Default)]
pub struct FakeTemplateRenderer {
    pub calls: Mutex<Vec<(PathBuf, SettingsMap)>>,
}

#[async_trait]
impl TemplateRenderer for FakeTemplateRenderer {
    async fn render(&self, template_path: PathBuf, data: SettingsMap) -> anyhow::Result<String> {
        let name = template_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.calls.lock().unwrap().push((template_path, data));
        Ok(format!("<p>{name}</p>"))
    }
}

/// A dispatcher wired to fresh fakes, with handles kept for assertions.
pub struct Harness {
    pub dispatcher: AssetDispatcher,
    pub styles: Arc<FakeStyleCompiler>,
    pub scripts: Arc<FakeScriptBundler>,
    pub templates: Arc<FakeTemplateRenderer>,
}

impl Harness {
    pub fn new(theme: ActiveTheme) -> Self {
        Self::with_styles(theme, FakeStyleCompiler::default())
    }

    pub fn with_styles(theme: ActiveTheme, styles: FakeStyleCompiler) -> Self {
        let styles = Arc::new(styles);
        let scripts = Arc::new(FakeScriptBundler::default());
        let templates = Arc::new(FakeTemplateRenderer::default());
        let dispatcher =
            AssetDispatcher::new(theme, styles.clone(), scripts.clone(), templates.clone());
        Self {
            dispatcher,
            styles,
            scripts,
            templates,
        }
    }
}

//! Asset dispatch - turns a request path into a call on an external engine
//!
//! - **`route`**: `AssetRoute` classifies request paths
//! - **`collaborators`**: traits for the style compiler, script bundler and
//!   template renderer
//!
//! Every lookup of a theme file that does not exist ends in
//! [`Dispatch::PassThrough`]; the host then tries its next handler. Only real
//! faults (I/O errors, malformed settings JSON, engine failures) are errors.

mod collaborators;
mod route;

use std::path::PathBuf;
use std::sync::Arc;

use http::header::{HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use http::{Method, Request, Response};
use tracing::{Instrument, Span};

pub use collaborators::{
    BundleOptions, ScriptBundler, StyleCompiler, StyleSource, TemplateRenderer,
};
pub use route::AssetRoute;

use crate::error::{CollaboratorStage, Result, ThemeError};
use crate::settings::{display_value, SettingsMap};
use crate::theme::{ActiveTheme, ThemeContext, STYLES_DIRNAME};

/// Outcome of dispatching one request.
#[derive(Debug)]
pub enum Dispatch {
    Respond(Response<Vec<u8>>),
    /// Not ours; the host should continue with its next handler
    PassThrough,
}

impl Dispatch {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough)
    }

    pub fn into_response(self) -> Option<Response<Vec<u8>>> {
        match self {
            Self::Respond(response) => Some(response),
            Self::PassThrough => None,
        }
    }
}

/// SCSS variable declarations for every setting, one per line, in map order.
pub fn style_preamble(settings: &SettingsMap) -> String {
    settings
        .iter()
        .map(|(key, value)| format!("${}: {};\n", key, display_value(value)))
        .collect()
}

fn respond(content_type: &'static str, body: Vec<u8>) -> Dispatch {
    let mut response = Response::new(body);
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    Dispatch::Respond(response)
}

pub struct AssetDispatcher {
    theme: ActiveTheme,
    styles: Arc<dyn StyleCompiler>,
    scripts: Arc<dyn ScriptBundler>,
    templates: Arc<dyn TemplateRenderer>,
    span: Span,
}

impl AssetDispatcher {
    pub fn new(
        theme: ActiveTheme,
        styles: Arc<dyn StyleCompiler>,
        scripts: Arc<dyn ScriptBundler>,
        templates: Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self {
            theme,
            styles,
            scripts,
            templates,
            span: tracing::debug_span!("asset_dispatcher"),
        }
    }

    /// Log under `span` instead of the default `asset_dispatcher` span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn theme(&self) -> &ActiveTheme {
        &self.theme
    }

    /// Handle a request from the host.
    ///
    /// Reuses the [`ThemeContext`] already attached to the request, or
    /// attaches a new one. Only GET and HEAD are handled.
    pub async fn handle<B>(&self, request: &mut Request<B>) -> Result<Dispatch> {
        if request.method() != Method::GET && request.method() != Method::HEAD {
            return Ok(Dispatch::PassThrough);
        }
        let context = match ThemeContext::from_request(request) {
            Some(context) => context,
            None => self.theme.attach(request),
        };
        let path = request.uri().path().to_string();
        self.dispatch(&context, &path).await
    }

    /// Dispatch `path` using an existing context.
    pub async fn dispatch(&self, context: &ThemeContext, path: &str) -> Result<Dispatch> {
        async {
            let Some(route) = AssetRoute::parse(path) else {
                tracing::debug!(path, "unroutable path");
                return Ok(Dispatch::PassThrough);
            };
            tracing::debug!(path, kind = route.kind(), "dispatching");

            let source = route.source_path(context.descriptor(), self.theme.options());
            match (route, source) {
                (AssetRoute::SettingsQuery, _) => self.settings_query(context).await,
                (AssetRoute::Style { .. }, Some(source)) => {
                    self.render_style(context, source).await
                }
                (AssetRoute::Script { .. }, Some(source)) => {
                    self.bundle_script(context, source).await
                }
                (AssetRoute::Index | AssetRoute::Template { .. }, Some(source)) => {
                    self.render_template(context, source).await
                }
                _ => Ok(Dispatch::PassThrough),
            }
        }
        .instrument(self.span.clone())
        .await
    }

    async fn file_exists(&self, path: &std::path::Path) -> Result<bool> {
        self.theme
            .fs()
            .is_file(path)
            .await
            .map_err(|e| ThemeError::from_io(path, e))
    }

    async fn settings_query(&self, context: &ThemeContext) -> Result<Dispatch> {
        let settings = context.settings().await?;
        // A JSON map always serializes
        let body = serde_json::Value::Object(settings.current.clone()).to_string();
        Ok(respond("application/json", body.into_bytes()))
    }

    async fn render_style(&self, context: &ThemeContext, source: PathBuf) -> Result<Dispatch> {
        if !self.file_exists(&source).await? {
            tracing::debug!(path = %source.display(), "no stylesheet");
            return Ok(Dispatch::PassThrough);
        }
        let stylesheet = self
            .theme
            .fs()
            .read_to_string(&source)
            .await
            .map_err(|e| ThemeError::from_io(&source, e))?;
        let settings = context.settings().await?;

        let descriptor = context.descriptor();
        let style_source = StyleSource {
            source_text: style_preamble(&settings.current) + &stylesheet,
            include_paths: vec![
                descriptor.styles_path.clone(),
                descriptor.public_path.join(STYLES_DIRNAME),
            ],
        };
        let css = self
            .styles
            .compile(style_source)
            .await
            .map_err(|e| ThemeError::collaborator(CollaboratorStage::StyleCompile, e))?;

        tracing::debug!(path = %source.display(), bytes = css.len(), "compiled stylesheet");
        let mut dispatch = respond("text/css", css.into_bytes());
        if let Dispatch::Respond(response) = &mut dispatch {
            response
                .headers_mut()
                .insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
        }
        Ok(dispatch)
    }

    async fn bundle_script(&self, context: &ThemeContext, entry: PathBuf) -> Result<Dispatch> {
        if !self.file_exists(&entry).await? {
            tracing::debug!(path = %entry.display(), "no script entry");
            return Ok(Dispatch::PassThrough);
        }
        let settings = context.settings().await?;
        let options = BundleOptions {
            settings: settings.current.clone(),
        };
        let response = self
            .scripts
            .bundle(entry, options)
            .await
            .map_err(|e| ThemeError::collaborator(CollaboratorStage::ScriptBundle, e))?;
        Ok(Dispatch::Respond(response))
    }

    async fn render_template(
        &self,
        context: &ThemeContext,
        template: PathBuf,
    ) -> Result<Dispatch> {
        if !self.file_exists(&template).await? {
            tracing::debug!(path = %template.display(), "no template");
            return Ok(Dispatch::PassThrough);
        }
        let settings = context.settings().await?;
        let html = self
            .templates
            .render(template, settings.current.clone())
            .await
            .map_err(|e| ThemeError::collaborator(CollaboratorStage::TemplateRender, e))?;
        Ok(respond("text/html; charset=utf-8", html.into_bytes()))
    }
}

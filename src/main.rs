use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use themeserve::dispatch::AssetRoute;
use themeserve::services::fs::LocalFsBackend;
use themeserve::theme::{ActiveTheme, PackageLoader, ThemeOptions, ThemeRegistry};

/// Inspect themes and how requests map onto them
#[derive(Debug, Parser)]
#[command(name = "themeserve", version)]
struct Cli {
    /// JSON options file; flags given on the command line take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding one sub-directory per theme
    #[arg(long, value_name = "DIR")]
    themes_root: Option<PathBuf>,

    /// Name of the active theme
    #[arg(long)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List valid themes with their versions
    List,
    /// Print the active theme's layout and package as JSON
    Info,
    /// Print the active theme's resolved settings as JSON
    Settings,
    /// Show how a request path is dispatched
    Route {
        /// Request path, e.g. `/assets/styles/app.scss`
        path: String,
    },
}

impl Cli {
    fn themes_root(&self) -> Result<PathBuf> {
        if let Some(root) = &self.themes_root {
            return Ok(root.clone());
        }
        match &self.config {
            Some(path) => Ok(ThemeOptions::from_file(path)?.themes_root),
            None => Ok(PathBuf::from("themes")),
        }
    }

    /// Options file first, then command-line flags on top.
    fn options(&self) -> Result<ThemeOptions> {
        let mut options = match &self.config {
            Some(path) => ThemeOptions::from_file(path)
                .with_context(|| format!("loading options from {}", path.display()))?,
            None => {
                let Some(theme) = &self.theme else {
                    bail!("no theme selected; pass --theme or --config");
                };
                ThemeOptions::new("themes", theme.clone())
            }
        };
        if let Some(theme) = &self.theme {
            options.theme = theme.clone();
        }
        if let Some(root) = &self.themes_root {
            options.themes_root = root.clone();
        }
        Ok(options)
    }

    fn active_theme(&self) -> Result<ActiveTheme> {
        let options = self.options()?;
        let name = options.theme.clone();
        ActiveTheme::new(options).with_context(|| format!("selecting theme {name}"))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn list(cli: &Cli) -> Result<()> {
    let root = cli.themes_root()?;
    let fs = Arc::new(LocalFsBackend::new());
    let registry = ThemeRegistry::new(fs, PackageLoader::default());

    let mut packages = registry
        .discover_packages(&root)
        .await
        .with_context(|| format!("scanning {}", root.display()))?;
    packages.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, package) in packages {
        println!("{name}\t{}", package.version);
    }
    Ok(())
}

fn info(theme: &ActiveTheme) -> Result<()> {
    let info = json!({
        "descriptor": theme.descriptor().as_ref(),
        "package": theme.package().as_ref(),
    });
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

async fn settings(theme: &ActiveTheme) -> Result<()> {
    let context = theme.build_context();
    let settings = context.settings().await?;
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}

async fn route(theme: &ActiveTheme, path: &str) -> Result<()> {
    let Some(route) = AssetRoute::parse(path) else {
        println!("pass-through\t(unroutable path)");
        return Ok(());
    };
    match route.source_path(theme.descriptor(), theme.options()) {
        Some(source) => {
            let exists = theme.fs().is_file(&source).await?;
            let state = if exists { "found" } else { "missing, pass-through" };
            println!("{}\t{}\t({state})", route.kind(), source.display());
        }
        None => println!("{}", route.kind()),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Command::List => list(&cli).await,
        Command::Info => info(&cli.active_theme()?),
        Command::Settings => settings(&cli.active_theme()?).await,
        Command::Route { path } => route(&cli.active_theme()?, path).await,
    }
}

//! Theme discovery through the public registry API

use std::sync::Arc;

use themeserve::services::fs::LocalFsBackend;
use themeserve::theme::{PackageLoader, ThemeRegistry};
use themeserve::ThemeError;

use crate::common::fixtures::ThemesRoot;

fn registry() -> ThemeRegistry {
    ThemeRegistry::new(Arc::new(LocalFsBackend::new()), PackageLoader::default())
}

#[tokio::test]
async fn test_discover_packages_returns_metadata() {
    let root = ThemesRoot::new();
    root.theme("alpha");
    root.bare_theme("gamma").write(
        "bower.json",
        r#"{"name": "gamma", "version": "2.1.0", "description": "Dark theme"}"#,
    );

    let mut packages = registry().discover_packages(root.path()).await.unwrap();
    packages.sort_by(|a, b| a.0.cmp(&b.0));

    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0].0, "alpha");
    assert_eq!(packages[0].1.version, "1.0.0");
    assert_eq!(packages[1].0, "gamma");
    assert_eq!(packages[1].1.description.as_deref(), Some("Dark theme"));
}

#[tokio::test]
async fn test_discovery_excludes_every_kind_of_broken_theme() {
    let root = ThemesRoot::new();
    root.theme("ok");
    root.bare_theme("empty");
    root.bare_theme("garbage").write("bower.json", "{ not json");
    root.bare_theme("array").write("bower.json", "[]");
    root.bare_theme("blank").write("bower.json", r#"{"name": "", "version": "1"}"#);
    // A plain file at the top level is not a theme
    std::fs::write(root.path().join("README.md"), "themes").unwrap();

    let themes = registry().discover_themes(root.path()).await.unwrap();
    assert_eq!(themes, vec!["ok"]);
}

#[tokio::test]
async fn test_empty_root_has_no_themes() {
    let root = ThemesRoot::new();
    assert!(registry().discover_themes(root.path()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_root_is_an_error() {
    let root = ThemesRoot::new();
    let err = registry()
        .discover_themes(&root.path().join("nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, ThemeError::NotFound { .. }));
}

#[tokio::test]
async fn test_async_and_blocking_loads_agree() {
    let root = ThemesRoot::new();
    let theme = root.theme("alpha");
    let loader = PackageLoader::default();

    let blocking = loader.load_blocking(theme.path()).unwrap();
    let non_blocking = loader.load(theme.path()).await.unwrap();
    assert_eq!(blocking, non_blocking);

    let broken = root.bare_theme("beta");
    broken.write("bower.json", r#"{"version": "1"}"#);
    assert!(matches!(
        loader.load_blocking(broken.path()).unwrap_err(),
        ThemeError::Validation { .. }
    ));
    assert!(matches!(
        loader.load(broken.path()).await.unwrap_err(),
        ThemeError::Validation { .. }
    ));
}

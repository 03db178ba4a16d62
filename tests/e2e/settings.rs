//! Settings resolution against real theme trees

use std::sync::Arc;

use serde_json::json;

use themeserve::settings::{MemorySettingsStore, SettingsResolver};
use themeserve::services::fs::LocalFsBackend;
use themeserve::ThemeError;

use crate::common::fixtures::{map, ThemesRoot};

#[tokio::test]
async fn test_forward_references_and_unknown_ids_are_blank() {
    let root = ThemesRoot::new();
    root.theme("alpha").schema(json!([
        {"settings": [
            {"id": "link", "default": "{accent} / {nope}"},
            {"id": "accent", "default": "orange"},
            {"id": "border", "default": "1px solid {accent}"}
        ]}
    ]));

    let theme = root.activate("alpha");
    let context = theme.build_context();
    let settings = context.settings().await.unwrap();

    assert_eq!(
        settings.current,
        map(json!({"link": " / ", "accent": "orange", "border": "1px solid orange"}))
    );
}

#[tokio::test]
async fn test_non_string_defaults_and_sections_without_fields() {
    let root = ThemesRoot::new();
    root.theme("alpha").schema(json!([
        {"name": "Intro", "type": "header"},
        {"name": "Layout", "settings": [
            {"id": "columns", "type": "number", "default": 3},
            {"id": "sticky", "type": "checkbox", "default": false},
            {"id": "label", "default": "{columns} cols, sticky={sticky}"},
            {"id": "missing_default", "type": "text"},
            {"type": "paragraph", "default": "no id"}
        ]}
    ]));

    let theme = root.activate("alpha");
    let context = theme.build_context();
    let settings = context.settings().await.unwrap();

    assert_eq!(
        settings.default_preset(),
        &map(json!({"columns": 3, "sticky": false, "label": "3 cols, sticky=false"}))
    );
}

#[tokio::test]
async fn test_unknown_override_keys_are_kept() {
    let root = ThemesRoot::new();
    root.theme("alpha")
        .schema(json!([{"settings": [{"id": "base", "default": "blue"}]}]))
        .overrides(json!({"legacy": "x"}));

    let theme = root.activate("alpha");
    let context = theme.build_context();
    let settings = context.settings().await.unwrap();

    assert_eq!(settings.current, map(json!({"legacy": "x", "base": "blue"})));
    assert_eq!(settings.default_preset(), &map(json!({"base": "blue"})));
}

#[tokio::test]
async fn test_malformed_files_are_errors() {
    let root = ThemesRoot::new();
    root.theme("schema_broken")
        .write("config/settings_schema.json", "{\"not\": \"an array\"}");
    root.theme("data_broken")
        .write("config/settings_data.json", "[1, 2");

    for name in ["schema_broken", "data_broken"] {
        let theme = root.activate(name);
        let err = theme.build_context().settings().await.unwrap_err();
        assert!(matches!(err, ThemeError::Parse { .. }), "{name}: {err}");
    }
}

#[tokio::test]
async fn test_failed_resolution_is_retried() {
    let root = ThemesRoot::new();
    let dir = root.theme("alpha");
    dir.write("config/settings_schema.json", "[");

    let theme = root.activate("alpha");
    let context = theme.build_context();
    assert!(context.settings().await.is_err());

    dir.schema(json!([{"settings": [{"id": "base", "default": "blue"}]}]));
    let settings = context.settings().await.unwrap();
    assert_eq!(settings.current["base"], json!("blue"));
}

#[tokio::test]
async fn test_resolver_with_memory_store() {
    let root = ThemesRoot::new();
    let dir = root.theme("alpha");
    dir.schema(json!([{"settings": [
        {"id": "base", "default": "blue"},
        {"id": "size", "default": 12}
    ]}]));

    let resolver = SettingsResolver::new(Arc::new(LocalFsBackend::new()));
    let store = MemorySettingsStore::with_overrides(map(json!({"size": 14})));
    let schema_path = dir.path().join("config/settings_schema.json");
    let settings = resolver.resolve(&schema_path, &store).await.unwrap();

    assert_eq!(settings.current, map(json!({"size": 14, "base": "blue"})));
}

#[tokio::test]
async fn test_store_override_replaces_file_store() {
    let root = ThemesRoot::new();
    root.theme("alpha")
        .schema(json!([{"settings": [{"id": "base", "default": "blue"}]}]))
        .overrides(json!({"base": "from-file"}));

    let theme = root
        .activate("alpha")
        .with_store(Arc::new(MemorySettingsStore::with_overrides(map(
            json!({"base": "from-memory"}),
        ))));
    let context = theme.build_context();
    let settings = context.settings().await.unwrap();
    assert_eq!(settings.current["base"], json!("from-memory"));
}

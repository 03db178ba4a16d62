//! Reference scenarios for resolution, discovery and dispatch

use serde_json::json;

use crate::common::collaborators::Harness;
use crate::common::fixtures::{map, ThemesRoot};
use crate::common::tracing::init_tracing_from_env;

fn chained_schema() -> serde_json::Value {
    json!([{
        "name": "Colors",
        "settings": [
            {"id": "base", "type": "color", "default": "blue"},
            {"id": "color", "type": "color", "default": "{base}"}
        ]
    }])
}

/// Scenario A: a later default can reference an earlier field
#[tokio::test]
async fn test_default_preset_interpolates_earlier_fields() {
    init_tracing_from_env();
    let root = ThemesRoot::new();
    root.theme("alpha").schema(chained_schema());

    let theme = root.activate("alpha");
    let context = theme.build_context();
    let settings = context.settings().await.unwrap();

    assert_eq!(
        settings.default_preset(),
        &map(json!({"base": "blue", "color": "blue"}))
    );
}

/// Scenario B: stored overrides win over schema defaults
#[tokio::test]
async fn test_overrides_win_over_defaults() {
    init_tracing_from_env();
    let root = ThemesRoot::new();
    root.theme("alpha")
        .schema(chained_schema())
        .overrides(json!({"color": "red"}));

    let theme = root.activate("alpha");
    let context = theme.build_context();
    let settings = context.settings().await.unwrap();

    assert_eq!(settings.current, map(json!({"base": "blue", "color": "red"})));
    // The preset itself is untouched by overrides
    assert_eq!(settings.default_preset()["color"], json!("blue"));
}

/// Scenario C: hidden directories and broken packages are skipped
#[tokio::test]
async fn test_discovery_skips_hidden_and_broken_themes() {
    init_tracing_from_env();
    let root = ThemesRoot::new();
    root.bare_theme(".git").write("bower.json", r#"{"name": "git", "version": "1"}"#);
    root.theme("alpha");
    root.bare_theme("beta").write("bower.json", r#"{"name": "beta"}"#);

    let theme = root.activate("alpha");
    assert_eq!(theme.available_themes().await.unwrap(), vec!["alpha"]);
}

/// Scenario D: a missing stylesheet is not an error, the request moves on
#[tokio::test]
async fn test_missing_stylesheet_passes_through() {
    init_tracing_from_env();
    let root = ThemesRoot::new();
    root.theme("alpha");

    let harness = Harness::new(root.activate("alpha"));
    let mut request = http::Request::get("/assets/styles/missing.scss")
        .body(())
        .unwrap();
    let dispatch = harness.dispatcher.handle(&mut request).await.unwrap();

    assert!(dispatch.is_pass_through());
    assert!(harness.styles.calls.lock().unwrap().is_empty());
}

/// Scenario E: no schema file means nothing is configurable
#[tokio::test]
async fn test_missing_schema_resolves_to_empty_settings() {
    init_tracing_from_env();
    let root = ThemesRoot::new();
    root.theme("alpha");

    let theme = root.activate("alpha");
    let context = theme.build_context();
    let settings = context.settings().await.unwrap();

    assert_eq!(
        serde_json::to_value(settings).unwrap(),
        json!({"current": {}, "presets": {"Default": {}}})
    );
}

//! `{fieldId}` placeholder substitution for string setting defaults.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use super::SettingsMap;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z0-9_.\-]+)\}").expect("placeholder pattern is valid")
});

/// Text form of a setting value as it appears when substituted or emitted.
///
/// Strings are used verbatim (no quotes), null renders as nothing.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Replace every `{id}` in `template` with the value of `id` in `data`.
///
/// Unknown ids become the empty string. Braces that do not form a
/// placeholder (`{ color: red }`) are left alone. The result never contains
/// placeholder-shaped text: if substitution joins literal braces and values
/// into a new `{word}`, its braces are dropped (`{{base}}` gives `blue`, not
/// `{blue}`), so interpolating the result again leaves it unchanged.
pub fn interpolate(template: &str, data: &SettingsMap) -> String {
    let substituted = PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            data.get(&caps[1]).map(display_value).unwrap_or_default()
        })
        .into_owned();
    unwrap_placeholders(substituted)
}

/// Strip the braces of placeholder-shaped text until none is left. Each
/// step removes one `{`, so this terminates.
fn unwrap_placeholders(mut text: String) -> String {
    while let Some(found) = PLACEHOLDER.find(&text) {
        let range = found.range();
        let inner = text[range.start + 1..range.end - 1].to_string();
        text.replace_range(range, &inner);
    }
    text
}

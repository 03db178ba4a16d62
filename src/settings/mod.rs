//! Theme settings: schema defaults, persisted overrides, and their merge.
//!
//! - **`schema`**: loads `config/settings_schema.json` and derives the
//!   `Default` preset (with `{id}` placeholder interpolation)
//! - **`store`**: reads persisted overrides (`config/settings_data.json`)
//! - **`resolver`**: overrides win, schema defaults fill the gaps
//!
//! # Example
//!
//! ```ignore
//! let resolver = SettingsResolver::new(fs.clone());
//! let store = JsonFileSettingsStore::for_theme(fs, &descriptor);
//! let resolved = resolver
//!     .resolve(&descriptor.settings_schema_path(), &store)
//!     .await?;
//! println!("{}", resolved.current["color"]);
//! ```

mod placeholder;
mod resolver;
mod schema;
mod store;

/// Field id -> value, in insertion order
pub type SettingsMap = serde_json::Map<String, serde_json::Value>;

pub use placeholder::{display_value, interpolate};
pub use resolver::{ResolvedSettings, SettingsPresets, SettingsResolver, DEFAULT_PRESET};
pub use schema::{load_schema, SettingsField, SettingsSchema, SettingsSection};
pub use store::{JsonFileSettingsStore, MemorySettingsStore, SettingsStore, StoredSettings};

//! Theme module - discovery, package metadata, and the active theme
//!
//! - **`descriptor`**: fixed directory layout of a theme (`ThemeDescriptor`)
//! - **`validate`**: package descriptor validation with field-level errors
//! - **`package`**: `PackageLoader` with blocking and async loads
//! - **`registry`**: `ThemeRegistry` scans a themes root for valid themes
//! - **`active`**: `ActiveTheme`, selected once at startup, and the
//!   per-request `ThemeContext` it builds
//!
//! # Usage
//!
//! ```ignore
//! use themeserve::theme::{ActiveTheme, ThemeOptions};
//!
//! // Fails immediately if the theme's package is missing or broken
//! let theme = ActiveTheme::new(ThemeOptions::new("themes", "alpha"))?;
//!
//! // Per request
//! let context = theme.attach(&mut request);
//! let settings = context.settings().await?;
//! ```

mod active;
mod descriptor;
mod package;
mod registry;
mod validate;

pub use active::{ActiveTheme, ThemeContext, ThemeOptions};
pub use descriptor::{
    ThemeDescriptor, CONFIG_DIRNAME, PACKAGE_FILENAME, PUBLIC_DIRNAME, SCRIPTS_DIRNAME,
    SETTINGS_DATA_FILENAME, SETTINGS_SCHEMA_FILENAME, STYLES_DIRNAME, TEMPLATES_DIRNAME,
};
pub use package::{parse_package, PackageLoader, PackageMetadata};
pub use registry::ThemeRegistry;
pub use validate::{validate_package, PackageValidationError, ValidationErrorKind};

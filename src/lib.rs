// Theme engine library - discovery, settings resolution and asset dispatch

pub mod dispatch;
pub mod error;
pub mod model;
pub mod services;
pub mod settings;
pub mod theme;

pub use error::{CollaboratorStage, Result, ThemeError};

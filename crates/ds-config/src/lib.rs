//! DownShift configuration loading and clamped settings.
//!
//! This crate provides:
//! - The typed [`Settings`] aggregate for the DownShift service
//! - Sidecar file resolution next to the service executable
//! - XML loading with silent clamping of out-of-range values
//! - A composed [`SettingsError`] for malformed settings files
//!
//! The service engine treats a loaded [`Settings`] as an immutable
//! snapshot; configuration is re-read only on service restart.

pub mod error;
pub mod resolve;
pub mod settings;

pub use error::SettingsError;
pub use resolve::{settings_path, sidecar_path};
pub use settings::Settings;

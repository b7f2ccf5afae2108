//! Configuration module for textsum
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{ClientSettings, GeneralSettings, ModelSettings, ServerSettings, Settings};

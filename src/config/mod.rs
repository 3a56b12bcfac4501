//! Configuration module for Tubeqa.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{GeneralSettings, OllamaSettings, QaSettings, Settings, YoutubeSettings};

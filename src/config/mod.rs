//! Configuration loading, saving, and the settings model.

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{LoggingSettings, PathSettings, PlaybackSettings, Settings};

//! Service configuration bootstrap.
//!
//! Collects database credentials from the environment and the service's
//! settings from a config server (or `config/config.json` in development)
//! into one [`SettingsStore`].

pub mod constants;
pub mod document;
pub mod env;
pub mod error;
pub mod global;
pub mod loader;
pub mod settings;

use std::path::Path;

pub use document::{PropertySource, RemoteConfigDocument};
pub use env::Env;
pub use error::{LoadError, SettingsError};
pub use loader::ConfigLoader;
pub use settings::SettingsStore;

/// Load settings for `service` in `environment` with the default loader.
///
/// Never fails: problems are logged and whatever could be loaded is returned.
pub fn initialize(service: &str, environment: &str, base_path: impl AsRef<Path>) -> SettingsStore {
    ConfigLoader::default().initialize(service, environment, base_path)
}

use std::path::PathBuf;

use thiserror::Error;

/// Failures while fetching or parsing the configuration document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("couldn't read local configuration file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("request to config server {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("config server {url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("error reading configuration response body from {url}: {source}")]
    ReadBody { url: String, source: reqwest::Error },

    #[error("cannot parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("configuration document has no property sources")]
    NoPropertySources,
}

/// Failures of the typed settings accessors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("setting not found: {0}")]
    NotFound(String),

    #[error("setting {key} has an incompatible type: {source}")]
    Type {
        key: String,
        source: config::ConfigError,
    },

    #[error("cannot decode settings: {0}")]
    Decode(#[source] config::ConfigError),

    #[error("settings are already installed for this process")]
    AlreadyInstalled,
}

// src/loader.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::Value;
use tracing::{debug, error, info, warn};

use crate::constants::{
    DATABASE_OVERRIDES, DEFAULT_CONFIG_SERVER_URL, DEV_ENVIRONMENT, LOCAL_CONFIG_DIR,
    LOCAL_CONFIG_FILE, SERVER_NAME_KEY,
};
use crate::document::RemoteConfigDocument;
use crate::env::Env;
use crate::error::LoadError;
use crate::settings::SettingsStore;

/// Builds a [`SettingsStore`] from database env overrides plus the first
/// property source of the service's configuration document.
///
/// In the development environment the document is read from
/// `{base_path}/config/config.json`; everywhere else it is fetched from
/// `{server_url}/{service}/{environment}`.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    server_url: String,
    dev_environment: String,
    env: Env,
    timeout: Option<Duration>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_CONFIG_SERVER_URL.to_string(),
            dev_environment: DEV_ENVIRONMENT.to_string(),
            env: Env::real(),
            timeout: None,
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    pub fn with_dev_environment(mut self, environment: impl Into<String>) -> Self {
        self.dev_environment = environment.into();
        self
    }

    pub fn with_env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    /// Bound the config server request. Without one a hanging server blocks
    /// the caller indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn config_url(&self, service: &str, environment: &str) -> String {
        format!(
            "{}/{}/{}",
            self.server_url.trim_end_matches('/'),
            service,
            environment
        )
    }

    pub fn local_config_path(base_path: &Path) -> PathBuf {
        base_path.join(LOCAL_CONFIG_DIR).join(LOCAL_CONFIG_FILE)
    }

    /// Load settings, logging and skipping over every failure.
    ///
    /// Missing files, unreachable servers and malformed documents never stop
    /// initialization: the returned store holds whatever was gathered, so at
    /// minimum the database overrides.
    pub fn initialize(
        &self,
        service: &str,
        environment: &str,
        base_path: impl AsRef<Path>,
    ) -> SettingsStore {
        let mut store = SettingsStore::new();
        self.apply_env_overrides(&mut store);

        let body = match self.fetch(service, environment, base_path.as_ref()) {
            Ok(body) => body,
            Err(e @ LoadError::ReadFile { .. }) => {
                warn!(error = %e, "couldn't load configuration");
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "couldn't load configuration");
                Vec::new()
            }
        };

        if let Err(e) = apply_document(&mut store, &body) {
            error!(error = %e, "cannot parse configuration");
        }

        log_server_name(&store);
        store
    }

    /// Load settings, returning the first fetch or parse failure.
    pub fn load_strict(
        &self,
        service: &str,
        environment: &str,
        base_path: impl AsRef<Path>,
    ) -> Result<SettingsStore, LoadError> {
        let mut store = SettingsStore::new();
        self.apply_env_overrides(&mut store);

        let body = self.fetch(service, environment, base_path.as_ref())?;
        apply_document(&mut store, &body)?;

        log_server_name(&store);
        Ok(store)
    }

    fn apply_env_overrides(&self, store: &mut SettingsStore) {
        for (key, var, default) in DATABASE_OVERRIDES {
            let (value, origin) = match self.env.var(var) {
                Some(value) => (value, var),
                None => (default.to_string(), "default"),
            };
            store.set(key, Value::new(Some(&origin.to_string()), value));
        }
    }

    fn fetch(
        &self,
        service: &str,
        environment: &str,
        base_path: &Path,
    ) -> Result<Vec<u8>, LoadError> {
        if environment == self.dev_environment {
            read_local(base_path)
        } else {
            self.fetch_remote(&self.config_url(service, environment))
        }
    }

    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        info!(url = %url, "loading config from config server");

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|source| LoadError::Request {
                url: url.to_string(),
                source,
            })?;

        let response = client.get(url).send().map_err(|source| LoadError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().map_err(|source| LoadError::ReadBody {
            url: url.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }
}

fn read_local(base_path: &Path) -> Result<Vec<u8>, LoadError> {
    let path = ConfigLoader::local_config_path(base_path);
    let body = std::fs::read(&path).map_err(|source| LoadError::ReadFile {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "using local config");
    Ok(body)
}

fn apply_document(store: &mut SettingsStore, body: &[u8]) -> Result<(), LoadError> {
    let document = RemoteConfigDocument::from_slice(body)?;
    let source = document.first_source().ok_or(LoadError::NoPropertySources)?;

    let origin = if source.name.is_empty() {
        "propertySources[0]"
    } else {
        source.name.as_str()
    };
    for (key, value) in &source.source {
        debug!(key = %key, "loading config property");
        store.set_json(key.as_str(), value, origin);
    }
    Ok(())
}

fn log_server_name(store: &SettingsStore) {
    if store.is_set(SERVER_NAME_KEY) {
        info!(
            server_name = %store.get_string(SERVER_NAME_KEY),
            "successfully loaded configuration for service"
        );
    }
}

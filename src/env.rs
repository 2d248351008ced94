//! Environment variable reader.
//!
//! [`Env::real()`] delegates to [`std::env::var`]; [`Env::from_vars`] is backed
//! by an explicit map so loaders can be exercised without touching the process
//! environment.

use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Read from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Read only from the given key-value pairs.
    pub fn from_vars(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn var(&self, name: &str) -> Option<String> {
        match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        }
    }

    /// Value of `name`, or `default` when the variable is not present.
    /// A variable set to the empty string counts as present.
    pub fn var_or(&self, name: &str, default: &str) -> String {
        self.var(name).unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_env_reads_cargo_manifest_dir() {
        let env = Env::real();
        assert!(env.var("CARGO_MANIFEST_DIR").is_some());
    }

    #[test]
    fn from_vars_returns_set_values() {
        let env = Env::from_vars([("DB_HOST", "db.internal"), ("DB_USERNAME", "svc")]);
        assert_eq!(env.var("DB_HOST").as_deref(), Some("db.internal"));
        assert_eq!(env.var("DB_USERNAME").as_deref(), Some("svc"));
        assert_eq!(env.var("DB_PASSWORD"), None);
    }

    #[test]
    fn var_or_falls_back_only_when_absent() {
        let env = Env::from_vars([("DB_PASSWORD", "")]);
        assert_eq!(env.var_or("DB_PASSWORD", "flywaydb"), "");
        assert_eq!(env.var_or("DB_HOST", "localhost"), "localhost");
    }

    #[test]
    fn default_is_real() {
        let env = Env::default();
        assert!(env.var("CARGO_MANIFEST_DIR").is_some());
    }
}

//! Flat key-value settings produced by the loader.
//!
//! Values are [`config::Value`]s, so every entry remembers where it came from
//! (an env var name or a property source name) and coerces between types the
//! same way the `config` crate does: `"30"` reads as `30`, `"yes"` reads as
//! `true`, numbers read back as strings.
//!
//! Keys are case-insensitive: they are stored and looked up lower-cased,
//! including the keys of nested tables.

use std::collections::BTreeMap;

use config::{Config, Map, Value, ValueKind};
use serde::de::DeserializeOwned;

use crate::error::SettingsError;

#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    entries: BTreeMap<String, Value>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into().to_lowercase(), value);
    }

    /// Store a JSON value under `key`, tagging it with `origin`.
    pub fn set_json(&mut self, key: impl Into<String>, value: &serde_json::Value, origin: &str) {
        let origin = origin.to_string();
        self.set(key, value_from_json(value, &origin));
    }

    /// Raw value for `key`. Dotted keys also resolve into nested tables, so
    /// `database.pool.size` finds `size` inside a table stored as `database.pool`
    /// or `database`.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        let key = key.to_lowercase();
        if let Some(value) = self.entries.get(&key) {
            return Some(value);
        }

        let mut end = key.len();
        while let Some(dot) = key[..end].rfind('.') {
            if let Some(found) = self
                .entries
                .get(&key[..dot])
                .and_then(|table| descend(table, &key[dot + 1..]))
            {
                return Some(found);
            }
            end = dot;
        }
        None
    }

    /// `true` if `key` resolves to a non-null value.
    pub fn is_set(&self, key: &str) -> bool {
        self.present(key).is_some()
    }

    pub fn try_get_string(&self, key: &str) -> Result<String, SettingsError> {
        self.coerce(key, Value::into_string)
    }

    pub fn try_get_bool(&self, key: &str) -> Result<bool, SettingsError> {
        self.coerce(key, Value::into_bool)
    }

    pub fn try_get_int(&self, key: &str) -> Result<i64, SettingsError> {
        self.coerce(key, Value::into_int)
    }

    pub fn try_get_float(&self, key: &str) -> Result<f64, SettingsError> {
        self.coerce(key, Value::into_float)
    }

    /// String value of `key`, or `""` when absent or not representable.
    pub fn get_string(&self, key: &str) -> String {
        self.try_get_string(key).unwrap_or_default()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.try_get_bool(key).unwrap_or_default()
    }

    pub fn get_int(&self, key: &str) -> i64 {
        self.try_get_int(key).unwrap_or_default()
    }

    pub fn get_float(&self, key: &str) -> f64 {
        self.try_get_float(key).unwrap_or_default()
    }

    /// Deserialize all settings into `T`. Dotted keys become nested tables,
    /// so `database.host` fills `database: Database { host, .. }`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, SettingsError> {
        let mut builder = Config::builder();
        for (key, value) in &self.entries {
            builder = builder
                .set_override(key.as_str(), value.clone())
                .map_err(SettingsError::Decode)?;
        }
        builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(SettingsError::Decode)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn present(&self, key: &str) -> Option<&Value> {
        self.get_value(key)
            .filter(|value| !matches!(value.kind, ValueKind::Nil))
    }

    fn coerce<T>(
        &self,
        key: &str,
        convert: fn(Value) -> Result<T, config::ConfigError>,
    ) -> Result<T, SettingsError> {
        let value = self
            .present(key)
            .ok_or_else(|| SettingsError::NotFound(key.to_string()))?;
        convert(value.clone()).map_err(|source| SettingsError::Type {
            key: key.to_string(),
            source,
        })
    }
}

fn descend<'a>(mut value: &'a Value, path: &str) -> Option<&'a Value> {
    for segment in path.split('.') {
        match &value.kind {
            ValueKind::Table(table) => value = table.get(segment)?,
            _ => return None,
        }
    }
    Some(value)
}

fn value_from_json(json: &serde_json::Value, origin: &String) -> Value {
    use serde_json::Value as Json;

    let kind = match json {
        Json::Null => ValueKind::Nil,
        Json::Bool(b) => ValueKind::Boolean(*b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                ValueKind::I64(i)
            } else if let Some(u) = n.as_u64() {
                ValueKind::U64(u)
            } else {
                ValueKind::Float(n.as_f64().unwrap_or_default())
            }
        }
        Json::String(s) => ValueKind::String(s.clone()),
        Json::Array(items) => {
            ValueKind::Array(items.iter().map(|item| value_from_json(item, origin)).collect())
        }
        Json::Object(fields) => ValueKind::Table(
            fields
                .iter()
                .map(|(k, v)| (k.to_lowercase(), value_from_json(v, origin)))
                .collect::<Map<String, Value>>(),
        ),
    };
    Value::new(Some(origin), kind)
}

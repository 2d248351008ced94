//! The JSON document served by the config server (and kept in the local
//! development file).

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::LoadError;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteConfigDocument {
    pub name: String,
    pub profiles: Vec<String>,
    pub label: Option<String>,
    pub version: Option<String>,
    pub property_sources: Vec<PropertySource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PropertySource {
    pub name: String,
    pub source: HashMap<String, Value>,
}

impl RemoteConfigDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The only property source that gets applied; the rest are ignored.
    pub fn first_source(&self) -> Option<&PropertySource> {
        self.property_sources.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER_RESPONSE: &str = r#"{
        "name": "orders",
        "profiles": ["production"],
        "label": null,
        "version": "4f2a9c1",
        "propertySources": [
            {
                "name": "https://git.example/config/orders-production.yml",
                "source": { "server_name": "orders", "server.port": 8080, "feature.enabled": true }
            },
            {
                "name": "https://git.example/config/application.yml",
                "source": { "server_name": "fallback" }
            }
        ]
    }"#;

    #[test]
    fn parses_server_response() {
        let doc = RemoteConfigDocument::from_slice(SERVER_RESPONSE.as_bytes()).unwrap();
        assert_eq!(doc.name, "orders");
        assert_eq!(doc.profiles, vec!["production".to_string()]);
        assert_eq!(doc.label, None);
        assert_eq!(doc.version.as_deref(), Some("4f2a9c1"));
        assert_eq!(doc.property_sources.len(), 2);

        let first = doc.first_source().unwrap();
        assert_eq!(first.name, "https://git.example/config/orders-production.yml");
        assert_eq!(first.source["server_name"], "orders");
        assert_eq!(first.source["server.port"], 8080);
    }

    #[test]
    fn missing_fields_default() {
        let doc = RemoteConfigDocument::from_slice(br#"{"propertySources":[{"source":{"a":"b"}}]}"#).unwrap();
        assert!(doc.name.is_empty());
        assert!(doc.profiles.is_empty());
        assert_eq!(doc.first_source().unwrap().source["a"], "b");
    }

    #[test]
    fn empty_document_has_no_source() {
        let doc = RemoteConfigDocument::from_slice(b"{}").unwrap();
        assert!(doc.first_source().is_none());
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            RemoteConfigDocument::from_slice(b"<html>502 Bad Gateway</html>"),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(RemoteConfigDocument::from_slice(b""), Err(LoadError::Parse(_))));
        assert!(matches!(
            RemoteConfigDocument::from_slice(br#"{"propertySources":[{"source":"#),
            Err(LoadError::Parse(_))
        ));
    }
}

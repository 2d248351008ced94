// src/constants.rs

/// Environment name that selects the local config file instead of the config server.
pub const DEV_ENVIRONMENT: &str = "development";

/// Base URL of the config server; requests go to `{url}/{service}/{environment}`.
pub const DEFAULT_CONFIG_SERVER_URL: &str = "http://configuration.zestmoney.in:8888";

/// Location of the local config file, relative to the base path.
pub const LOCAL_CONFIG_DIR: &str = "config";
pub const LOCAL_CONFIG_FILE: &str = "config.json";

pub const SERVER_NAME_KEY: &str = "server_name";

/// Database overrides as `(settings key, env var, default)`.
pub const DATABASE_OVERRIDES: [(&str, &str, &str); 3] = [
    ("database.username", "DB_USERNAME", "postgres"),
    ("database.password", "DB_PASSWORD", "flywaydb"),
    ("database.host", "DB_HOST", "localhost"),
];

// main.rs

use std::{env, error::Error};

use prettytable::{row, Table};
use service_config::{constants::DEV_ENVIRONMENT, global, SettingsStore};
use tracing_subscriber::EnvFilter;

const MASKED_KEYS: [&str; 1] = ["database.password"];

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let service = env::var("SERVICE_NAME").unwrap_or_else(|_| "service".to_string());
    let environment = env::var("APP_ENV").unwrap_or_else(|_| DEV_ENVIRONMENT.to_string());
    let base_path = env::var("APP_BASE_PATH").unwrap_or_else(|_| ".".to_string());

    let store = service_config::initialize(&service, &environment, &base_path);
    settings_table(&store).printstd();

    global::install(store)?;
    Ok(())
}

fn settings_table(store: &SettingsStore) -> Table {
    let mut table = Table::new();
    table.add_row(row!["KEY", "VALUE", "ORIGIN"]);
    for (key, value) in store.iter() {
        let shown = if MASKED_KEYS.contains(&key) {
            "********".to_string()
        } else {
            value.to_string()
        };
        table.add_row(row![key, shown, value.origin().unwrap_or("-")]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn table_masks_database_password() {
        let mut store = SettingsStore::new();
        store.set_json("database.password", &json!("s3cret"), "DB_PASSWORD");
        store.set_json("server_name", &json!("orders"), "local");

        let table = settings_table(&store);
        let content_at = |row: usize, col: usize| {
            table
                .get_row(row)
                .and_then(|r| r.get_cell(col))
                .map(|c| c.get_content())
                .unwrap_or_default()
        };

        assert_eq!(table.len(), 3);
        assert_eq!(content_at(1, 0), "database.password");
        assert_eq!(content_at(1, 1), "********");
        assert_eq!(content_at(1, 2), "DB_PASSWORD");
        assert_eq!(content_at(2, 1), "orders");
        assert!(!table.to_string().contains("s3cret"));
    }
}

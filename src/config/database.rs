use serde::{Deserialize, Serialize};

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Falls back to `DATABASE_URL`, then a local SQLite file.
    #[serde(default = "default_url")]
    pub url: String,

    /// Log every statement sent to the database.
    #[serde(default)]
    pub sql_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            sql_logging: false,
        }
    }
}

fn default_url() -> String {
    match std::env::var(DATABASE_URL_ENV) {
        Ok(url) if !url.is_empty() => url,
        _ => "sqlite://ormless.db?mode=rwc".to_string(),
    }
}

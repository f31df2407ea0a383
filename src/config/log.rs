use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default = "default_console_format")]
    pub console_format: String,

    /// Write JSON logs to a daily file under `dir`.
    #[serde(default)]
    pub file_enabled: bool,

    #[serde(
        default = "default_ext_level",
        deserialize_with = "deserialize_ext_level"
    )]
    pub ext_level: Option<HashMap<String, String>>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
            console_format: default_console_format(),
            file_enabled: false,
            ext_level: default_ext_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// One of `pretty`, `json` or `compact`.
fn default_console_format() -> String {
    "compact".to_string()
}

fn default_ext_level() -> Option<HashMap<String, String>> {
    let mut map = HashMap::new();
    map.insert("sqlx".to_string(), "error".to_string());
    Some(map)
}

fn deserialize_ext_level<'de, D>(
    deserializer: D,
) -> Result<Option<HashMap<String, String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;

    let mut map = default_ext_level().unwrap_or_default();

    // `target:level` pairs, comma separated; later pairs override defaults
    for pair in s.iter().flat_map(|s| s.split(',')) {
        if let Some((target, level)) = pair.trim().split_once(':') {
            map.insert(target.trim().to_string(), level.trim().to_string());
        }
    }

    Ok(Some(map))
}

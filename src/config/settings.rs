use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::config::{DatabaseConfig, LogConfig, MigrationsConfig};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logs: LogConfig,

    #[serde(default)]
    pub migrations: MigrationsConfig,
}

fn get_env_file_name() -> String {
    if let Ok(env_file) = std::env::var("ORMLESS_ENV_FILE") {
        return env_file;
    }
    match std::env::var("ORMLESS_ENV") {
        Ok(env) => match env.to_lowercase().as_str() {
            "dev" => ".env.dev".to_string(),
            "test" => ".env.test".to_string(),
            _ => ".env".to_string(),
        },
        Err(_) => ".env".to_string(),
    }
}

impl Settings {
    /// Loads the `.env` file picked by `ORMLESS_ENV_FILE` / `ORMLESS_ENV`,
    /// then reads `ORMLESS__<SECTION>__<KEY>` variables.
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::from_filename(get_env_file_name()).ok();

        let settings = Config::builder()
            .add_source(
                Environment::with_prefix("ORMLESS")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn cleanup_env_vars() {
        unsafe {
            env::remove_var("ORMLESS_ENV_FILE");
            env::remove_var("ORMLESS_ENV");
            env::remove_var("ORMLESS__DATABASE__URL");
            env::remove_var("ORMLESS__DATABASE__SQL_LOGGING");
            env::remove_var("ORMLESS__MIGRATIONS__SUFFIX");
            env::remove_var("ORMLESS__LOGS__LEVEL");
        }
    }

    fn load_from(contents: &str) -> Settings {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{}", contents).unwrap();

        unsafe {
            env::set_var("ORMLESS_ENV_FILE", temp_file.path());
        }
        let settings = Settings::new().unwrap();
        cleanup_env_vars();
        settings
    }

    #[test]
    #[serial]
    fn env_file_var_set() {
        cleanup_env_vars();
        unsafe {
            env::set_var("ORMLESS_ENV_FILE", ".env.override");
        }
        assert_eq!(get_env_file_name(), ".env.override");
        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn env_names_map_to_files() {
        cleanup_env_vars();
        for (env_name, file) in [
            ("dev", ".env.dev"),
            ("DEV", ".env.dev"),
            ("test", ".env.test"),
            ("prod", ".env"),
            ("staging", ".env"),
        ] {
            unsafe {
                env::set_var("ORMLESS_ENV", env_name);
            }
            assert_eq!(get_env_file_name(), file, "{}", env_name);
        }
        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn no_env_set() {
        cleanup_env_vars();
        assert_eq!(get_env_file_name(), ".env");
    }

    #[test]
    #[serial]
    fn reads_sections_from_env_file() {
        cleanup_env_vars();
        let settings = load_from(
            r#"ORMLESS__DATABASE__URL=sqlite::memory:
ORMLESS__DATABASE__SQL_LOGGING=true
ORMLESS__MIGRATIONS__SUFFIX=.migration.sql
ORMLESS__LOGS__LEVEL=debug"#,
        );

        assert_eq!(settings.database.url, "sqlite::memory:");
        assert!(settings.database.sql_logging);
        assert_eq!(settings.migrations.suffix, ".migration.sql");
        assert_eq!(settings.logs.level, "debug");
    }

    #[test]
    #[serial]
    fn missing_sections_use_defaults() {
        cleanup_env_vars();
        let settings = load_from("UNRELATED=1");

        assert_eq!(settings.migrations.suffix, ".sql");
        assert!(!settings.database.sql_logging);
        assert_eq!(settings.logs.console_format, "compact");
    }
}

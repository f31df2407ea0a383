use std::path::{Path, PathBuf};

use crate::errors::MigrateError;

pub const DEFAULT_MIGRATION_DIRECTORY: &str = "migration";
pub const MIGRATION_DIRECTORY_ENV: &str = "MIGRATION_DIRECTORY";

pub fn validate_dir(path: &Path) -> Result<PathBuf, MigrateError> {
    if path.is_dir() {
        Ok(path.to_path_buf())
    } else {
        Err(MigrateError::InvalidDirectory(path.display().to_string()))
    }
}

/// Picks the migration directory: an explicit argument wins, then
/// `MIGRATION_DIRECTORY`, then the default.
pub fn detect_migration_directory(argument: &str) -> String {
    resolve_migration_directory(argument, std::env::var(MIGRATION_DIRECTORY_ENV).ok())
}

fn resolve_migration_directory(argument: &str, env_value: Option<String>) -> String {
    if argument != DEFAULT_MIGRATION_DIRECTORY {
        return argument.to_string();
    }
    match env_value {
        Some(value) if !value.is_empty() => value,
        _ => DEFAULT_MIGRATION_DIRECTORY.to_string(),
    }
}

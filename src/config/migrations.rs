use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MigrationsConfig {
    /// File suffix that marks a migration unit. Stripped once from the file
    /// name to form the unit id.
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
        }
    }
}

fn default_suffix() -> String {
    ".sql".to_string()
}

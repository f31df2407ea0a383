mod commands;

use clap::Parser;
use colored::Colorize;

pub use crate::cli::commands::ExitOnErr;
use crate::cli::commands::{cmd_migrate, cmd_version};
use crate::config::Settings;
use crate::errors::MigrateError;
use crate::types::Action;
use crate::utils::DEFAULT_MIGRATION_DIRECTORY;

#[derive(Parser, Debug)]
#[command(
    name = "ormless",
    version,
    about = "Applies and reverts versioned schema migrations",
    long_about = format!(
r#"{} - {}

Actions: version, commit (alias: migrate, run) or revert (alias: rollback)"#,
"ORMLESS".green().bold(),
"Applies pending migrations in order and reverts the last one."
))]
pub struct Cli {
    /// version, commit (alias: migrate, run) or revert (alias: rollback)
    #[arg(value_name = "ACTION")]
    pub action: Option<String>,

    /// Same as the positional ACTION, and takes precedence over it
    #[arg(long = "action", value_name = "ACTION")]
    pub action_flag: Option<String>,

    /// Path to the directory containing migration files
    #[arg(long, default_value = DEFAULT_MIGRATION_DIRECTORY)]
    pub migration_directory: String,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn requested_action(&self) -> Result<Action, MigrateError> {
        let raw = self
            .action_flag
            .as_deref()
            .filter(|a| !a.is_empty())
            .or(self.action.as_deref())
            .filter(|a| !a.is_empty())
            .ok_or(MigrateError::MissingAction)?;
        Action::parse(raw)
    }

    pub async fn execute(&self, settings: &Settings) {
        let action = self.requested_action().exit_on_err("Invalid command");

        match action {
            Action::Version => cmd_version::execute(),
            Action::Apply | Action::Revert => {
                cmd_migrate::execute(action, &self.migration_directory, settings).await
            }
        }
    }
}

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::debug;

use crate::config::Settings;

/// Connects to the target database. The driver follows the URL scheme.
pub async fn init_db(settings: &Settings) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(settings.database.url.clone());
    options.sqlx_logging(settings.database.sql_logging);

    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;
    debug!("Connected to {:?} database", db.get_database_backend());
    Ok(db)
}

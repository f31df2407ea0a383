use std::error::Error;
use std::path::PathBuf;

use colored::Colorize;
use tracing::info;

use crate::{
    cli::commands::ExitOnErr,
    config::Settings,
    engine::RunOutcome,
    errors::MigrateError,
    services::MigrationService,
    types::Action,
    utils::{detect_migration_directory, validate_dir},
};

pub async fn execute(action: Action, directory: &str, settings: &Settings) {
    let directory = PathBuf::from(detect_migration_directory(directory));
    validate_dir(&directory).exit_on_err("Invalid migration directory");

    info!("Using migration directory '{}'", directory.display());
    let service = MigrationService::new(settings)
        .await
        .exit_on_err("Failed to initialize services");

    match service.run(action, &directory).await {
        Ok(outcome) => print_outcome(&outcome),
        Err(err) => {
            print_failure(action, &err);
            std::process::exit(1);
        }
    }
}

fn print_outcome(outcome: &RunOutcome) {
    println!(
        "✅ {} {}",
        outcome.state.to_colored_string(),
        outcome.summary()
    );
    for id in &outcome.units {
        println!("   {}", id.green());
    }
}

fn print_failure(action: Action, err: &MigrateError) {
    eprintln!(
        "❌ {}",
        format!("Migration ({}) failed", action).red().bold()
    );
    if let Some(id) = err.unit_id() {
        eprintln!("   unit: {}", id.yellow());
    }
    eprintln!("   error: {}", err);

    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("   caused by: {}", cause);
        source = cause.source();
    }
}

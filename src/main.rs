use ormless::{
    cli::{Cli, ExitOnErr},
    config::Settings,
    utils,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    let settings = Settings::new().exit_on_err("Failed to load configuration");

    utils::logger::init_logging(&settings.logs, settings.database.sql_logging);

    cli.execute(&settings).await;
}

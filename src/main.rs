use std::sync::Arc;

use anyhow::Context;
use chess_catalog::modules::statistics::application::dto::StatisticsRequest;
use chess_catalog::shared::domain::SystemClock;
use chess_catalog::shared::utils::init_logger;
use chess_catalog::shared::{AppConfig, Database};
use chess_catalog::{SqlitePlayerStore, StatisticsService};

/// Prints the statistics report for the configured catalog as JSON.
///
/// Pass `--include-inactive` to report over the whole population.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let database = Arc::new(Database::new(&config).context("failed to open the catalog database")?);
    let applied = database.run_migrations().context("failed to run migrations")?;
    log::info!("{} migrations applied", applied);

    let include_inactive = std::env::args().any(|arg| arg == "--include-inactive");
    let service = StatisticsService::new(
        Arc::new(SqlitePlayerStore::new(database)),
        Arc::new(SystemClock),
    );

    let report = service
        .statistics(&StatisticsRequest {
            include_inactive: Some(include_inactive.to_string()),
        })
        .await
        .context("failed to build the statistics report")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

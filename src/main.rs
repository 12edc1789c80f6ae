use anyhow::Result;

use shortly::config::AppConfig;
use shortly::logging::init_logging;
use shortly::runtime::server::run_server;
use shortly::storage::StorageFactory;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load();

    // Guard must outlive the server so buffered logs are flushed on exit.
    let _log_guard = init_logging(&config.logging);

    let store = StorageFactory::create(&config.database).await?;

    run_server(config, store).await
}

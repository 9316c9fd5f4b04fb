use std::{sync::Arc, time::Duration};

use anyhow::Result;

use holdings_portal::{
    chain::json_rpc::HttpConnector,
    config::{Config, SecretBackend},
    db::postgres::PostgresDatabase,
    holdings::HoldingsAggregator,
    secrets::{EnvSecretStore, PostgresSecretStore, SecretStore},
    server::{self, state::AppState},
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let postgres = Arc::new(
        PostgresDatabase::new(&config.database_url, config.database_max_connections).await?,
    );
    postgres.migrate().await?;

    let secrets: Arc<dyn SecretStore> = match config.secret_backend {
        SecretBackend::Postgres => Arc::new(PostgresSecretStore::new(postgres.clone())),
        SecretBackend::Env => Arc::new(EnvSecretStore),
    };
    let connector = Arc::new(HttpConnector::new(config.request_timeout)?);
    let aggregator = Arc::new(HoldingsAggregator::new(
        config.aggregator.clone(),
        secrets,
        connector,
    ));
    info!(
        "Aggregating BGLD holdings via {} (secret {}, {:?} backend)",
        config.aggregator.rpc_base_url, config.aggregator.rpc_secret_name, config.secret_backend
    );

    let state = AppState {
        postgres,
        aggregator,
    };
    // Outlives the RPC timeout so provider stalls surface as 503.
    let request_timeout = config.request_timeout + Duration::from_secs(5);
    if let Err(e) = server::main(state, config.addr, request_timeout).await {
        warn!("Server stopped: {:#}", e);
        return Err(e);
    }
    warn!("Main end");
    Ok(())
}

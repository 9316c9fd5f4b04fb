use std::sync::Arc;

use crate::{db::postgres::PostgresDatabase, holdings::HoldingsAggregator};

#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresDatabase>,
    pub aggregator: Arc<HoldingsAggregator>,
}

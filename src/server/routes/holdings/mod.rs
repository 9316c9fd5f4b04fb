pub mod handler;
pub mod path;
use axum::{routing::post, Router};

use handler::query_holdings;
use path::HoldingsPath;

use crate::server::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(HoldingsPath::Query.as_str(), post(query_holdings))
}

pub mod handler;
pub mod path;
use axum::{routing::post, Router};

use handler::generate_voucher;
use path::AdminPath;

use crate::server::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(AdminPath::Vouchers.as_str(), post(generate_voucher))
}

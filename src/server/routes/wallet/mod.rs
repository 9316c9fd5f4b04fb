pub mod handler;
pub mod path;
use crate::server::state::AppState;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use handler::{add_wallet, delete_wallet, get_wallets, record_holdings, sync_holdings};
use path::WalletPath;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            WalletPath::ProfileWallets.as_str(),
            get(get_wallets).post(add_wallet),
        )
        .route(WalletPath::Wallet.as_str(), delete(delete_wallet))
        .route(WalletPath::Holdings.as_str(), put(record_holdings))
        .route(WalletPath::SyncHoldings.as_str(), post(sync_holdings))
}

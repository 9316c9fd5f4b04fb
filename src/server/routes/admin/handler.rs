use axum::{extract::State, Json};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::{
    db::postgres::controller::{profile::ProfileController, wallet::WalletController},
    holdings::voucher::parse_wallet_list,
    server::{result::AppJsonResult, state::AppState},
    types::holdings::Voucher,
};

/// Wallets given either as a JSON array or as one comma separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WalletList {
    List(Vec<String>),
    Csv(String),
}

impl WalletList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            WalletList::List(wallets) => wallets
                .into_iter()
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect(),
            WalletList::Csv(wallets) => parse_wallet_list(&wallets),
        }
    }
}

#[serde_as]
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "email": "holder@example.com",
    "wallets": "0x1111111111111111111111111111111111111111,0x2222222222222222222222222222222222222222",
    "cutoffBlock": 38000000
}))]
pub struct VoucherRequest {
    pub email: String,
    /// Defaults to every wallet connected to the profile with this email.
    #[schema(value_type = Option<Vec<String>>)]
    pub wallets: Option<WalletList>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub cutoff_block: Option<u64>,
}

/// Sum BGLD holdings across a user's wallets at one cutoff block
#[utoipa::path(
    post,
    path = "/admin/vouchers",
    request_body = VoucherRequest,
    responses(
        (status = 200, description = "Voucher generated", body = Voucher),
        (status = 400, description = "Missing email or malformed wallet"),
        (status = 404, description = "No profile for that email"),
        (status = 500, description = "RPC access key not configured"),
        (status = 503, description = "Blockchain provider unavailable")
    ),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn generate_voucher(
    State(state): State<AppState>,
    Json(payload): Json<VoucherRequest>,
) -> AppJsonResult<Voucher> {
    let wallets = match payload.wallets {
        Some(wallets) => wallets.into_vec(),
        None => {
            let profile = ProfileController::new(state.postgres.clone())
                .get_profile_by_email(payload.email.trim())
                .await?;
            let wallets = WalletController::new(state.postgres.clone())
                .get_wallets(profile.id)
                .await?;
            info!(
                "Voucher for {} uses {} connected wallet(s)",
                profile.email,
                wallets.len()
            );
            wallets.into_iter().map(|w| w.address).collect()
        }
    };

    let voucher = state
        .aggregator
        .generate_voucher(&payload.email, &wallets, payload.cutoff_block)
        .await?;
    Ok(Json(voucher))
}

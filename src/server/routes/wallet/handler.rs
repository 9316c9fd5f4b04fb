use crate::{
    db::postgres::controller::{
        holdings::HoldingsController, profile::ProfileController, wallet::WalletController,
    },
    holdings::parse_address,
    server::{
        result::{AppError, AppJsonResult},
        state::AppState,
    },
    types::{
        holdings::HoldingsRecord,
        model::{NftHolding, SelfReportedHoldings, TokenHolding, Wallet},
        project::ProjectName,
    },
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "address": "0x1111111111111111111111111111111111111111",
    "nickname": "cold storage",
    "syncOnChain": true
}))]
pub struct AddWalletRequest {
    pub address: String,
    pub nickname: Option<String>,
    /// Read BGLD holdings on-chain and store them with the wallet.
    #[serde(default)]
    pub sync_on_chain: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddWalletResponse {
    wallet: Wallet,
    holdings: Option<HoldingsRecord>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletWithHoldings {
    wallet: Wallet,
    token_holdings: Vec<TokenHolding>,
    nft_holdings: Vec<NftHolding>,
}

#[derive(Serialize, ToSchema)]
pub struct WalletsResponse {
    wallets: Vec<WalletWithHoldings>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UpsertStatus {
    Added,
    Updated,
}

impl UpsertStatus {
    fn from_inserted(inserted: bool) -> Self {
        if inserted {
            UpsertStatus::Added
        } else {
            UpsertStatus::Updated
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordHoldingsResponse {
    status: UpsertStatus,
    token_holding: TokenHolding,
    nft_holding: NftHolding,
}

#[serde_as]
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncHoldingsRequest {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub block_cutoff: Option<u64>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncHoldingsResponse {
    status: UpsertStatus,
    holdings: HoldingsRecord,
    nft_holding: NftHolding,
}

/// Connect a wallet to a profile
#[utoipa::path(
    post,
    path = "/profiles/{id}/wallets",
    params(
        ("id" = Uuid, Path, description = "Profile id")
    ),
    request_body = AddWalletRequest,
    responses(
        (status = 200, description = "Wallet connected", body = AddWalletResponse),
        (status = 400, description = "Malformed address"),
        (status = 404, description = "Profile not found"),
        (status = 409, description = "Wallet already connected"),
        (status = 503, description = "Blockchain provider unavailable")
    ),
    tag = "Wallet"
)]
#[instrument(skip(state))]
pub async fn add_wallet(
    Path(profile_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<AddWalletRequest>,
) -> AppJsonResult<AddWalletResponse> {
    let address = payload.address.trim();
    parse_address(address)?;

    ProfileController::new(state.postgres.clone())
        .get_profile(profile_id)
        .await?;

    // Read the chain first; the wallet and its holdings are then written in
    // one transaction.
    let holdings = if payload.sync_on_chain {
        Some(state.aggregator.aggregate(address, None).await?)
    } else {
        None
    };

    let nickname = payload
        .nickname
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let (wallet, _) = WalletController::new(state.postgres.clone())
        .add_wallet(profile_id, address, nickname, holdings.as_ref())
        .await?;

    info!("Wallet {} connected to profile {}", wallet.address, profile_id);
    Ok(Json(AddWalletResponse { wallet, holdings }))
}

/// List a profile's wallets with their holdings
#[utoipa::path(
    get,
    path = "/profiles/{id}/wallets",
    params(
        ("id" = Uuid, Path, description = "Profile id")
    ),
    responses(
        (status = 200, description = "Wallets retrieved successfully", body = WalletsResponse),
        (status = 404, description = "Profile not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallet"
)]
pub async fn get_wallets(
    Path(profile_id): Path<Uuid>,
    State(state): State<AppState>,
) -> AppJsonResult<WalletsResponse> {
    ProfileController::new(state.postgres.clone())
        .get_profile(profile_id)
        .await?;

    let wallets = WalletController::new(state.postgres.clone())
        .get_wallets(profile_id)
        .await?;
    let ids: Vec<Uuid> = wallets.iter().map(|w| w.id).collect();
    let (tokens, nfts) = HoldingsController::new(state.postgres.clone())
        .get_wallet_holdings(&ids)
        .await?;

    let wallets = wallets
        .into_iter()
        .map(|wallet| WalletWithHoldings {
            token_holdings: tokens
                .iter()
                .filter(|t| t.wallet_id == wallet.id)
                .cloned()
                .collect(),
            nft_holdings: nfts
                .iter()
                .filter(|n| n.wallet_id == wallet.id)
                .cloned()
                .collect(),
            wallet,
        })
        .collect();
    Ok(Json(WalletsResponse { wallets }))
}

/// Disconnect a wallet and drop its holdings
#[utoipa::path(
    delete,
    path = "/wallets/{id}",
    params(
        ("id" = Uuid, Path, description = "Wallet id")
    ),
    responses(
        (status = 204, description = "Wallet removed"),
        (status = 404, description = "Wallet not found")
    ),
    tag = "Wallet"
)]
#[instrument(skip(state))]
pub async fn delete_wallet(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let deleted = WalletController::new(state.postgres.clone())
        .delete_wallet(id)
        .await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Wallet {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Record self-reported holdings for one project
#[utoipa::path(
    put,
    path = "/wallets/{id}/holdings",
    params(
        ("id" = Uuid, Path, description = "Wallet id")
    ),
    request_body = SelfReportedHoldings,
    responses(
        (status = 200, description = "Holdings added or updated", body = RecordHoldingsResponse),
        (status = 400, description = "Unknown project or negative amount"),
        (status = 404, description = "Wallet not found")
    ),
    tag = "Wallet"
)]
#[instrument(skip(state))]
pub async fn record_holdings(
    Path(wallet_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<SelfReportedHoldings>,
) -> AppJsonResult<RecordHoldingsResponse> {
    let project: ProjectName = payload
        .project_name
        .parse()
        .map_err(|e: anyhow::Error| AppError::BadRequest(e.to_string()))?;
    validate_amounts(&payload)?;

    WalletController::new(state.postgres.clone())
        .get_wallet(wallet_id)
        .await?;

    let (token, nft) = HoldingsController::new(state.postgres.clone())
        .record_self_reported(wallet_id, project, &payload)
        .await?;

    Ok(Json(RecordHoldingsResponse {
        status: UpsertStatus::from_inserted(token.inserted || nft.inserted),
        token_holding: token.row,
        nft_holding: nft.row,
    }))
}

/// Refresh a wallet's BGLD holdings from the chain
#[utoipa::path(
    post,
    path = "/wallets/{id}/holdings/sync",
    params(
        ("id" = Uuid, Path, description = "Wallet id")
    ),
    request_body(content = SyncHoldingsRequest, description = "Optional block cutoff"),
    responses(
        (status = 200, description = "Holdings read and stored", body = SyncHoldingsResponse),
        (status = 404, description = "Wallet not found"),
        (status = 500, description = "RPC access key not configured"),
        (status = 502, description = "Unexpected contract response"),
        (status = 503, description = "Blockchain provider unavailable")
    ),
    tag = "Wallet"
)]
#[instrument(skip(state))]
pub async fn sync_holdings(
    Path(wallet_id): Path<Uuid>,
    State(state): State<AppState>,
    payload: Option<Json<SyncHoldingsRequest>>,
) -> AppJsonResult<SyncHoldingsResponse> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let wallet = WalletController::new(state.postgres.clone())
        .get_wallet(wallet_id)
        .await?;

    let sink = HoldingsController::new(state.postgres.clone());
    let (holdings, stored) = state
        .aggregator
        .aggregate_and_store(&sink, wallet.id, &wallet.address, payload.block_cutoff)
        .await?;

    Ok(Json(SyncHoldingsResponse {
        status: UpsertStatus::from_inserted(stored.inserted),
        holdings,
        nft_holding: stored.row,
    }))
}

fn validate_amounts(payload: &SelfReportedHoldings) -> Result<(), AppError> {
    let zero = BigDecimal::from(0);
    let amounts = [
        ("totalTokens", payload.total_tokens.as_ref()),
        ("piggyBankTokens", payload.piggy_bank_tokens.as_ref()),
        ("stakedDebtTokens", payload.staked_debt_tokens.as_ref()),
        ("microNFTs", payload.micro_nfts.as_ref()),
    ];
    if let Some((field, _)) = amounts
        .iter()
        .find(|(_, value)| value.map_or(false, |v| *v < zero))
    {
        return Err(AppError::BadRequest(format!("{} must not be negative", field)));
    }
    if payload.total_nfts.map_or(false, |n| n < 0) {
        return Err(AppError::BadRequest("totalNFTs must not be negative".into()));
    }
    Ok(())
}

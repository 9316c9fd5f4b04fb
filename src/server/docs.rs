use utoipa::OpenApi;

use crate::{
    server::routes::{admin, holdings, profile, project, wallet},
    types::{
        holdings::{AggregationStatus, HoldingsRecord, RewardSource, Voucher},
        model::{NftHolding, Profile, SelfReportedHoldings, TokenHolding, Wallet},
        project::ProjectName,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        holdings::handler::query_holdings,
        profile::handler::create_profile,
        profile::handler::get_profile,
        wallet::handler::add_wallet,
        wallet::handler::get_wallets,
        wallet::handler::delete_wallet,
        wallet::handler::record_holdings,
        wallet::handler::sync_holdings,
        admin::handler::generate_voucher,
        project::handler::get_projects,
    ),
    components(schemas(
        HoldingsRecord,
        AggregationStatus,
        RewardSource,
        Voucher,
        Profile,
        Wallet,
        TokenHolding,
        NftHolding,
        SelfReportedHoldings,
        ProjectName,
        holdings::handler::HoldingsQueryRequest,
        profile::handler::CreateProfileRequest,
        profile::handler::ProfileResponse,
        wallet::handler::AddWalletRequest,
        wallet::handler::AddWalletResponse,
        wallet::handler::WalletWithHoldings,
        wallet::handler::WalletsResponse,
        wallet::handler::UpsertStatus,
        wallet::handler::RecordHoldingsResponse,
        wallet::handler::SyncHoldingsRequest,
        wallet::handler::SyncHoldingsResponse,
        admin::handler::VoucherRequest,
        project::handler::ProjectInfo,
        project::handler::ProjectsResponse,
    )),
    tags(
        (name = "Holdings", description = "On-chain BGLD holdings"),
        (name = "Profile", description = "Portal user profiles"),
        (name = "Wallet", description = "Connected wallets and their holdings"),
        (name = "Admin", description = "Migration vouchers"),
        (name = "Projects", description = "Migration projects")
    )
)]
pub struct ApiDoc;

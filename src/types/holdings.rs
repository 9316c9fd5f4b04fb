use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RewardSource {
    Legacy,
    Diamond,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AggregationStatus {
    Complete,
    /// One or both reward reads failed and were counted as zero.
    PartialDataDegraded { zeroed: Vec<RewardSource> },
}

impl AggregationStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, AggregationStatus::PartialDataDegraded { .. })
    }
}

/// Snapshot of one wallet's on-chain holdings at a single block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsRecord {
    pub address: String,
    pub block_number: u64,
    #[serde(rename = "totalNFTs")]
    pub total_nfts: u64,
    #[serde(rename = "microNFTs")]
    #[schema(value_type = String, example = "2.5")]
    pub micro_nfts: BigDecimal,
    #[schema(value_type = String, example = "0")]
    pub pending_rewards: BigDecimal,
    pub status: AggregationStatus,
}

/// Administrative sum of holdings across a user's wallets at one cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub email: String,
    pub cutoff_block: Option<u64>,
    pub wallets: Vec<HoldingsRecord>,
    #[serde(rename = "totalNFTs")]
    pub total_nfts: u64,
    #[serde(rename = "microNFTs")]
    #[schema(value_type = String, example = "2.5")]
    pub micro_nfts: BigDecimal,
    #[schema(value_type = String, example = "0")]
    pub pending_rewards: BigDecimal,
}

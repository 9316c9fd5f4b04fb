use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(value_type = String, example = "2024-06-01T12:00:00Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-06-01T12:00:00Z")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Wallet {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub address: String,
    pub nickname: Option<String>,
    #[schema(value_type = String, example = "2024-06-01T12:00:00Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-06-01T12:00:00Z")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TokenHolding {
    pub id: Uuid,
    pub wallet_id: Uuid,
    pub project_name: String,
    #[schema(value_type = String, example = "1500.25")]
    pub total_tokens: BigDecimal,
    #[schema(value_type = String, example = "0")]
    pub piggy_bank_tokens: BigDecimal,
    #[schema(value_type = String, example = "0")]
    pub staked_debt_tokens: BigDecimal,
    #[schema(value_type = String, example = "2024-06-01T12:00:00Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-06-01T12:00:00Z")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct NftHolding {
    pub id: Uuid,
    pub wallet_id: Uuid,
    pub project_name: String,
    pub total_nfts: i64,
    #[schema(value_type = String, example = "2.5")]
    pub micro_nfts: BigDecimal,
    #[schema(value_type = String, example = "0")]
    pub pending_rewards: BigDecimal,
    /// Block the values were read at; `None` for self-reported rows.
    pub block_number: Option<i64>,
    #[schema(value_type = String, example = "2024-06-01T12:00:00Z")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-06-01T12:00:00Z")]
    pub updated_at: DateTime<Utc>,
}

/// Result of an upsert: the row plus whether it was newly inserted.
#[derive(Debug, Clone)]
pub struct Upserted<T> {
    pub row: T,
    pub inserted: bool,
}

/// Holdings a user enters by hand for one project on one wallet. Omitted
/// amounts keep their stored value, or start at zero on a new row.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelfReportedHoldings {
    pub project_name: String,
    #[schema(value_type = Option<String>, example = "1500.25")]
    pub total_tokens: Option<BigDecimal>,
    #[schema(value_type = Option<String>, example = "0")]
    pub piggy_bank_tokens: Option<BigDecimal>,
    #[schema(value_type = Option<String>, example = "0")]
    pub staked_debt_tokens: Option<BigDecimal>,
    #[serde(rename = "totalNFTs")]
    pub total_nfts: Option<i64>,
    #[serde(rename = "microNFTs")]
    #[schema(value_type = Option<String>, example = "2.5")]
    pub micro_nfts: Option<BigDecimal>,
}

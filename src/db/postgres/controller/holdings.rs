use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{types::BigDecimal, PgExecutor};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::postgres::PostgresDatabase,
    holdings::HoldingsSink,
    types::{
        holdings::HoldingsRecord,
        model::{NftHolding, SelfReportedHoldings, TokenHolding, Upserted},
        project::ProjectName,
    },
};

#[derive(sqlx::FromRow)]
struct UpsertedTokenRow {
    #[sqlx(flatten)]
    row: TokenHolding,
    inserted: bool,
}

#[derive(sqlx::FromRow)]
struct UpsertedNftRow {
    #[sqlx(flatten)]
    row: NftHolding,
    inserted: bool,
}

impl From<UpsertedTokenRow> for Upserted<TokenHolding> {
    fn from(upserted: UpsertedTokenRow) -> Self {
        Upserted {
            row: upserted.row,
            inserted: upserted.inserted,
        }
    }
}

impl From<UpsertedNftRow> for Upserted<NftHolding> {
    fn from(upserted: UpsertedNftRow) -> Self {
        Upserted {
            row: upserted.row,
            inserted: upserted.inserted,
        }
    }
}

pub struct HoldingsController {
    pub db: Arc<PostgresDatabase>,
}

impl HoldingsController {
    pub fn new(db: Arc<PostgresDatabase>) -> Self {
        HoldingsController { db }
    }

    /// Upserts the token row and the NFT row for one project in a single
    /// transaction. On-chain fields of the NFT row are left alone.
    pub async fn record_self_reported(
        &self,
        wallet_id: Uuid,
        project: ProjectName,
        input: &SelfReportedHoldings,
    ) -> Result<(Upserted<TokenHolding>, Upserted<NftHolding>)> {
        let mut tx = self.db.pool.begin().await?;

        let token = upsert_self_reported_token(&mut *tx, wallet_id, project, input).await?;
        let nft = upsert_self_reported_nft(&mut *tx, wallet_id, project, input).await?;

        tx.commit()
            .await
            .context("Failed to commit self-reported holdings")?;

        info!(
            "Self-reported {} holdings for wallet {} ({})",
            project,
            wallet_id,
            if token.inserted || nft.inserted {
                "added"
            } else {
                "updated"
            }
        );
        Ok((token, nft))
    }

    pub async fn get_wallet_holdings(
        &self,
        wallet_ids: &[Uuid],
    ) -> Result<(Vec<TokenHolding>, Vec<NftHolding>)> {
        let tokens = sqlx::query_as::<_, TokenHolding>(
            r#"
            SELECT *
            FROM token_holdings
            WHERE wallet_id = ANY($1)
            ORDER BY project_name ASC
            "#,
        )
        .bind(wallet_ids)
        .fetch_all(&self.db.pool)
        .await?;

        let nfts = sqlx::query_as::<_, NftHolding>(
            r#"
            SELECT *
            FROM nft_holdings
            WHERE wallet_id = ANY($1)
            ORDER BY project_name ASC
            "#,
        )
        .bind(wallet_ids)
        .fetch_all(&self.db.pool)
        .await?;

        Ok((tokens, nfts))
    }
}

#[async_trait]
impl HoldingsSink for HoldingsController {
    async fn upsert_nft_holding(
        &self,
        wallet_id: Uuid,
        project: ProjectName,
        record: &HoldingsRecord,
    ) -> Result<Upserted<NftHolding>> {
        upsert_aggregated_nft(&self.db.pool, wallet_id, project, record).await
    }
}

async fn upsert_self_reported_token<'e, E: PgExecutor<'e>>(
    executor: E,
    wallet_id: Uuid,
    project: ProjectName,
    input: &SelfReportedHoldings,
) -> Result<Upserted<TokenHolding>> {
    let upserted = sqlx::query_as::<_, UpsertedTokenRow>(
        r#"
        INSERT INTO token_holdings
            (wallet_id, project_name, total_tokens, piggy_bank_tokens, staked_debt_tokens)
        VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0), COALESCE($5, 0))
        ON CONFLICT (wallet_id, project_name) DO UPDATE SET
            total_tokens = COALESCE($3, token_holdings.total_tokens),
            piggy_bank_tokens = COALESCE($4, token_holdings.piggy_bank_tokens),
            staked_debt_tokens = COALESCE($5, token_holdings.staked_debt_tokens),
            updated_at = now()
        RETURNING *, (xmax = 0) AS inserted
        "#,
    )
    .bind(wallet_id)
    .bind(project.as_str())
    .bind(input.total_tokens.as_ref())
    .bind(input.piggy_bank_tokens.as_ref())
    .bind(input.staked_debt_tokens.as_ref())
    .fetch_one(executor)
    .await
    .with_context(|| format!("Failed to upsert {} token holding", project))?;

    Ok(upserted.into())
}

/// Touches only the hand-entered counts; rewards and block stay as the last
/// on-chain sync left them.
async fn upsert_self_reported_nft<'e, E: PgExecutor<'e>>(
    executor: E,
    wallet_id: Uuid,
    project: ProjectName,
    input: &SelfReportedHoldings,
) -> Result<Upserted<NftHolding>> {
    let upserted = sqlx::query_as::<_, UpsertedNftRow>(
        r#"
        INSERT INTO nft_holdings (wallet_id, project_name, total_nfts, micro_nfts)
        VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0))
        ON CONFLICT (wallet_id, project_name) DO UPDATE SET
            total_nfts = COALESCE($3, nft_holdings.total_nfts),
            micro_nfts = COALESCE($4, nft_holdings.micro_nfts),
            updated_at = now()
        RETURNING *, (xmax = 0) AS inserted
        "#,
    )
    .bind(wallet_id)
    .bind(project.as_str())
    .bind(input.total_nfts)
    .bind(input.micro_nfts.as_ref())
    .fetch_one(executor)
    .await
    .with_context(|| format!("Failed to upsert {} NFT holding", project))?;

    Ok(upserted.into())
}

/// Writes every aggregated field, including the block it was read at.
pub(crate) async fn upsert_aggregated_nft<'e, E: PgExecutor<'e>>(
    executor: E,
    wallet_id: Uuid,
    project: ProjectName,
    record: &HoldingsRecord,
) -> Result<Upserted<NftHolding>> {
    let total_nfts = i64::try_from(record.total_nfts)
        .with_context(|| format!("NFT count {} out of range", record.total_nfts))?;
    let block_number = i64::try_from(record.block_number)
        .with_context(|| format!("Block number {} out of range", record.block_number))?;

    let upserted = sqlx::query_as::<_, UpsertedNftRow>(
        r#"
        INSERT INTO nft_holdings
            (wallet_id, project_name, total_nfts, micro_nfts, pending_rewards, block_number)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (wallet_id, project_name) DO UPDATE SET
            total_nfts = EXCLUDED.total_nfts,
            micro_nfts = EXCLUDED.micro_nfts,
            pending_rewards = EXCLUDED.pending_rewards,
            block_number = EXCLUDED.block_number,
            updated_at = now()
        RETURNING *, (xmax = 0) AS inserted
        "#,
    )
    .bind(wallet_id)
    .bind(project.as_str())
    .bind(total_nfts)
    .bind(&record.micro_nfts)
    .bind(&record.pending_rewards)
    .bind(block_number)
    .fetch_one(executor)
    .await
    .with_context(|| format!("Failed to upsert {} NFT holding", project))?;

    Ok(upserted.into())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use sqlx::PgPool;

    use super::*;
    use crate::{
        db::postgres::controller::{profile::ProfileController, wallet::WalletController},
        types::holdings::AggregationStatus,
    };

    const OWNER: &str = "0x1111111111111111111111111111111111111111";

    fn decimal(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn record(total_nfts: u64, micro: &str, rewards: &str, block_number: u64) -> HoldingsRecord {
        HoldingsRecord {
            address: OWNER.to_string(),
            block_number,
            total_nfts,
            micro_nfts: decimal(micro),
            pending_rewards: decimal(rewards),
            status: AggregationStatus::Complete,
        }
    }

    fn self_reported(json: &str) -> SelfReportedHoldings {
        serde_json::from_str(json).unwrap()
    }

    async fn setup(pool: PgPool) -> (HoldingsController, Uuid) {
        let db = Arc::new(PostgresDatabase { pool });
        let profile = ProfileController::new(db.clone())
            .create_profile("holder@example.com", "Ada", "Lovelace")
            .await
            .unwrap();
        let (wallet, _) = WalletController::new(db.clone())
            .add_wallet(profile.id, OWNER, None, None)
            .await
            .unwrap();
        (HoldingsController::new(db), wallet.id)
    }

    async fn nft_rows(controller: &HoldingsController, wallet_id: Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM nft_holdings WHERE wallet_id = $1")
            .bind(wallet_id)
            .fetch_one(&controller.db.pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_aggregated_upsert_keeps_one_row(pool: PgPool) {
        let (controller, wallet_id) = setup(pool).await;

        let first = controller
            .upsert_nft_holding(wallet_id, ProjectName::Bgld, &record(3, "2.5", "0", 100))
            .await
            .unwrap();
        assert!(first.inserted);
        assert_eq!(first.row.project_name, "BGLD");
        assert_eq!(first.row.block_number, Some(100));

        let second = controller
            .upsert_nft_holding(wallet_id, ProjectName::Bgld, &record(4, "1.25", "2", 200))
            .await
            .unwrap();
        assert!(!second.inserted);
        assert_eq!(second.row.id, first.row.id);
        assert_eq!(second.row.total_nfts, 4);
        assert_eq!(second.row.micro_nfts, decimal("1.25"));
        assert_eq!(second.row.pending_rewards, decimal("2"));
        assert_eq!(second.row.block_number, Some(200));
        assert_eq!(nft_rows(&controller, wallet_id).await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_self_report_keeps_on_chain_fields(pool: PgPool) {
        let (controller, wallet_id) = setup(pool).await;
        controller
            .upsert_nft_holding(
                wallet_id,
                ProjectName::Bgld,
                &record(3, "2.5", "2", 38_000_000),
            )
            .await
            .unwrap();

        let (token, nft) = controller
            .record_self_reported(
                wallet_id,
                ProjectName::Bgld,
                &self_reported(r#"{"projectName":"BGLD","totalNFTs":4,"microNFTs":"2.5"}"#),
            )
            .await
            .unwrap();

        assert!(token.inserted);
        assert!(!nft.inserted);
        assert_eq!(nft.row.total_nfts, 4);
        assert_eq!(nft.row.micro_nfts, decimal("2.5"));
        assert_eq!(nft.row.pending_rewards, decimal("2"));
        assert_eq!(nft.row.block_number, Some(38_000_000));
        assert_eq!(nft_rows(&controller, wallet_id).await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_self_report_keeps_omitted_amounts(pool: PgPool) {
        let (controller, wallet_id) = setup(pool).await;

        let (token, nft) = controller
            .record_self_reported(
                wallet_id,
                ProjectName::Debt,
                &self_reported(
                    r#"{"projectName":"DEBT","totalTokens":"10","stakedDebtTokens":"5","totalNFTs":2}"#,
                ),
            )
            .await
            .unwrap();
        assert!(token.inserted && nft.inserted);
        assert_eq!(token.row.piggy_bank_tokens, decimal("0"));
        assert_eq!(nft.row.micro_nfts, decimal("0"));
        assert_eq!(nft.row.block_number, None);

        let (token, nft) = controller
            .record_self_reported(
                wallet_id,
                ProjectName::Debt,
                &self_reported(r#"{"projectName":"DEBT","totalTokens":"12"}"#),
            )
            .await
            .unwrap();
        assert!(!token.inserted && !nft.inserted);
        assert_eq!(token.row.total_tokens, decimal("12"));
        assert_eq!(token.row.staked_debt_tokens, decimal("5"));
        assert_eq!(nft.row.total_nfts, 2);
    }
}

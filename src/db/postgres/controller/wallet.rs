use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

use super::holdings::upsert_aggregated_nft;
use crate::{
    db::postgres::PostgresDatabase,
    holdings::AGGREGATED_PROJECT,
    types::{
        holdings::HoldingsRecord,
        model::{NftHolding, Upserted, Wallet},
    },
};

pub struct WalletController {
    pub db: Arc<PostgresDatabase>,
}

impl WalletController {
    pub fn new(db: Arc<PostgresDatabase>) -> Self {
        WalletController { db }
    }

    /// Inserts the wallet and, when given, its aggregated holdings in one
    /// transaction. Either both rows land or neither does.
    pub async fn add_wallet(
        &self,
        profile_id: Uuid,
        address: &str,
        nickname: Option<&str>,
        holdings: Option<&HoldingsRecord>,
    ) -> Result<(Wallet, Option<Upserted<NftHolding>>)> {
        let mut tx = self.db.pool.begin().await?;

        let wallet = sqlx::query_as::<_, Wallet>(
            r#"
            INSERT INTO wallets (profile_id, address, nickname)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(profile_id)
        .bind(address)
        .bind(nickname)
        .fetch_one(&mut *tx)
        .await?;

        let stored = match holdings {
            Some(record) => {
                Some(upsert_aggregated_nft(&mut *tx, wallet.id, AGGREGATED_PROJECT, record).await?)
            }
            None => None,
        };

        tx.commit().await?;
        Ok((wallet, stored))
    }

    pub async fn get_wallet(&self, id: Uuid) -> Result<Wallet> {
        let wallet = sqlx::query_as::<_, Wallet>("SELECT * FROM wallets WHERE id = $1")
            .bind(id)
            .fetch_one(&self.db.pool)
            .await?;

        Ok(wallet)
    }

    pub async fn get_wallets(&self, profile_id: Uuid) -> Result<Vec<Wallet>> {
        let wallets = sqlx::query_as::<_, Wallet>(
            r#"
            SELECT *
            FROM wallets
            WHERE profile_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.db.pool)
        .await?;

        Ok(wallets)
    }

    /// Returns false when no wallet had that id. Holdings rows cascade.
    pub async fn delete_wallet(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM wallets WHERE id = $1")
            .bind(id)
            .execute(&self.db.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

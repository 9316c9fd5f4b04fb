//! On-chain holdings aggregation.
//!
//! One aggregation resolves a single block, reads the NFT count, the
//! micro-NFT balance and decimals, and both reward distributors at that
//! block, then folds them into a [`HoldingsRecord`]. Balance reads are
//! mandatory. A reward distributor that reverts degrades to zero, but a
//! provider failure on any read aborts the aggregation.

pub mod voucher;

#[cfg(test)]
pub(crate) mod mock;

use std::{str::FromStr, sync::Arc};

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    chain::{
        contracts::{MicroNftContract, NftContract, RewardDistributor},
        BlockRef, ChainConnector, ChainError, ChainReader,
    },
    constant::REWARD_DECIMALS,
    secrets::SecretStore,
    types::{
        holdings::{AggregationStatus, HoldingsRecord, RewardSource},
        model::{NftHolding, Upserted},
        project::ProjectName,
    },
    utils::{format_units, is_address},
};

/// Project every on-chain aggregation is recorded under.
pub const AGGREGATED_PROJECT: ProjectName = ProjectName::Bgld;

#[derive(Debug, Error)]
pub enum HoldingsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),
    #[error("Blockchain provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("Unexpected contract response: {0}")]
    Contract(String),
    #[error("Failed to store holdings: {0}")]
    Persistence(String),
}

impl From<ChainError> for HoldingsError {
    fn from(error: ChainError) -> Self {
        if error.is_provider_failure() {
            HoldingsError::ProviderUnavailable(error.to_string())
        } else {
            HoldingsError::Contract(error.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContractSet {
    pub nft: Address,
    pub micro_nft: Address,
    pub rewards_legacy: Address,
    pub rewards_diamond: Address,
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Provider URL without the trailing access key.
    pub rpc_base_url: String,
    /// Name the access key is stored under in the secret store.
    pub rpc_secret_name: String,
    pub contracts: ContractSet,
}

impl AggregatorConfig {
    pub fn endpoint(&self, key: &str) -> String {
        format!("{}/{}", self.rpc_base_url.trim_end_matches('/'), key)
    }
}

/// Where aggregated holdings are written.
#[async_trait]
pub trait HoldingsSink: Send + Sync {
    async fn upsert_nft_holding(
        &self,
        wallet_id: Uuid,
        project: ProjectName,
        record: &HoldingsRecord,
    ) -> anyhow::Result<Upserted<NftHolding>>;
}

pub fn parse_address(address: &str) -> Result<Address, HoldingsError> {
    let address = address.trim();
    if !is_address(address) {
        return Err(HoldingsError::InvalidInput(format!(
            "{} is not a 0x-prefixed 40 hex character address",
            address
        )));
    }
    Address::from_str(address).map_err(|e| HoldingsError::InvalidInput(e.to_string()))
}

pub struct HoldingsAggregator {
    config: AggregatorConfig,
    secrets: Arc<dyn SecretStore>,
    connector: Arc<dyn ChainConnector>,
}

impl HoldingsAggregator {
    pub fn new(
        config: AggregatorConfig,
        secrets: Arc<dyn SecretStore>,
        connector: Arc<dyn ChainConnector>,
    ) -> Self {
        HoldingsAggregator {
            config,
            secrets,
            connector,
        }
    }

    /// Reader for the configured provider. Fails without touching the network
    /// when the access key is absent.
    async fn reader(&self) -> Result<Arc<dyn ChainReader>, HoldingsError> {
        let name = &self.config.rpc_secret_name;
        let key = self
            .secrets
            .get_secret(name)
            .await
            .map_err(|e| HoldingsError::ConfigurationMissing(format!("{}: {:#}", name, e)))?
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                HoldingsError::ConfigurationMissing(format!("RPC access key {} is not set", name))
            })?;

        self.connector
            .connect(&self.config.endpoint(key.trim()))
            .map_err(|e| HoldingsError::ConfigurationMissing(e.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn aggregate(
        &self,
        address: &str,
        block_cutoff: Option<u64>,
    ) -> Result<HoldingsRecord, HoldingsError> {
        let owner = parse_address(address)?;
        let reader = self.reader().await?;
        let block_number = match block_cutoff {
            Some(block) => block,
            None => reader.block_number().await?,
        };
        self.read_holdings(reader.as_ref(), owner, address, block_number)
            .await
    }

    /// Every read here is pinned to `block_number`.
    async fn read_holdings(
        &self,
        reader: &dyn ChainReader,
        owner: Address,
        address: &str,
        block_number: u64,
    ) -> Result<HoldingsRecord, HoldingsError> {
        let block = BlockRef::Number(block_number);
        let contracts = &self.config.contracts;
        let nft = NftContract::new(contracts.nft, reader);
        let micro = MicroNftContract::new(contracts.micro_nft, reader);
        let legacy = RewardDistributor::new(contracts.rewards_legacy, reader);
        let diamond = RewardDistributor::new(contracts.rewards_diamond, reader);

        let (nft_balance, micro_balance, micro_decimals, legacy_rewards, diamond_rewards) = tokio::join!(
            nft.balance_of(owner, block),
            micro.balance_of(owner, block),
            micro.decimals(block),
            legacy.calculate_pending_rewards(owner, block),
            diamond.calculate_pending_rewards(owner, block),
        );

        let nft_balance = nft_balance?;
        let total_nfts = u64::try_from(nft_balance).map_err(|_| {
            HoldingsError::Contract(format!("NFT balance {} does not fit u64", nft_balance))
        })?;
        let micro_nfts = format_units(micro_balance?, u32::from(micro_decimals?));

        let mut zeroed = Vec::new();
        let legacy_rewards = reward_or_zero(RewardSource::Legacy, legacy_rewards, &mut zeroed)?;
        let diamond_rewards = reward_or_zero(RewardSource::Diamond, diamond_rewards, &mut zeroed)?;
        let pending_rewards = format_units(
            legacy_rewards.saturating_add(diamond_rewards),
            REWARD_DECIMALS,
        );

        let status = if zeroed.is_empty() {
            AggregationStatus::Complete
        } else {
            warn!(
                "Partial data for {} at block {}: zeroed reward sources {:?}",
                address, block_number, zeroed
            );
            AggregationStatus::PartialDataDegraded { zeroed }
        };

        info!(
            "Holdings for {} at block {}: nfts={} micro={} rewards={}",
            address, block_number, total_nfts, micro_nfts, pending_rewards
        );

        Ok(HoldingsRecord {
            address: address.trim().to_string(),
            block_number,
            total_nfts,
            micro_nfts,
            pending_rewards,
            status,
        })
    }

    /// Aggregates and upserts the `(wallet, BGLD)` NFT row. Nothing is written
    /// when aggregation fails.
    #[instrument(skip(self, sink))]
    pub async fn aggregate_and_store(
        &self,
        sink: &dyn HoldingsSink,
        wallet_id: Uuid,
        address: &str,
        block_cutoff: Option<u64>,
    ) -> Result<(HoldingsRecord, Upserted<NftHolding>), HoldingsError> {
        let record = self.aggregate(address, block_cutoff).await?;
        let stored = sink
            .upsert_nft_holding(wallet_id, AGGREGATED_PROJECT, &record)
            .await
            .map_err(|e| HoldingsError::Persistence(format!("{:#}", e)))?;
        Ok((record, stored))
    }
}

/// A distributor that reverts or answers garbage counts as zero; a provider
/// failure aborts the whole aggregation.
fn reward_or_zero(
    source: RewardSource,
    result: Result<U256, ChainError>,
    zeroed: &mut Vec<RewardSource>,
) -> Result<U256, HoldingsError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_provider_failure() => Err(e.into()),
        Err(e) => {
            warn!("Reward read from {:?} distributor failed, counting zero: {}", source, e);
            zeroed.push(source);
            Ok(U256::ZERO)
        }
    }
}

//! In-memory doubles for the aggregator's collaborators.

use std::{
    collections::HashMap,
    str::FromStr,
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    chain::{
        abi::{Selector, BALANCE_OF, CALCULATE_PENDING_REWARDS, DECIMALS},
        BlockRef, ChainConnector, ChainError, ChainReader,
    },
    secrets::SecretStore,
    types::{
        holdings::HoldingsRecord,
        model::{NftHolding, Upserted},
        project::ProjectName,
    },
};

use super::{ContractSet, HoldingsSink};

pub const OWNER: &str = "0x1111111111111111111111111111111111111111";

pub fn contracts() -> ContractSet {
    let addr = |s: &str| Address::from_str(s).unwrap();
    ContractSet {
        nft: addr("0x00000000000000000000000000000000000000a1"),
        micro_nft: addr("0x00000000000000000000000000000000000000a2"),
        rewards_legacy: addr("0x00000000000000000000000000000000000000a3"),
        rewards_diamond: addr("0x00000000000000000000000000000000000000a4"),
    }
}

/// Chain state keyed by (contract, selector). Every address gets the same
/// answer, which is all the aggregator tests need.
pub struct MockChain {
    responses: Mutex<HashMap<(Address, Selector), Result<U256, ChainError>>>,
    head: AtomicU64,
    head_error: Mutex<Option<ChainError>>,
    calls: Mutex<Vec<(Address, Selector, BlockRef)>>,
    block_number_calls: AtomicUsize,
}

impl MockChain {
    pub fn standard(nfts: u64, micro: u64, decimals: u8, legacy: u64, diamond: u64) -> Self {
        let c = contracts();
        let mut responses = HashMap::new();
        responses.insert((c.nft, BALANCE_OF), Ok(U256::from(nfts)));
        responses.insert((c.micro_nft, BALANCE_OF), Ok(U256::from(micro)));
        responses.insert((c.micro_nft, DECIMALS), Ok(U256::from(decimals)));
        responses.insert(
            (c.rewards_legacy, CALCULATE_PENDING_REWARDS),
            Ok(U256::from(legacy)),
        );
        responses.insert(
            (c.rewards_diamond, CALCULATE_PENDING_REWARDS),
            Ok(U256::from(diamond)),
        );
        MockChain {
            responses: Mutex::new(responses),
            head: AtomicU64::new(1_000),
            head_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            block_number_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_head(&self, block: u64) {
        self.head.store(block, Ordering::SeqCst);
    }

    pub fn fail_head(&self, error: ChainError) {
        *self.head_error.lock().unwrap() = Some(error);
    }

    pub fn fail(&self, contract: Address, selector: Selector, error: ChainError) {
        self.responses
            .lock()
            .unwrap()
            .insert((contract, selector), Err(error));
    }

    pub fn call_blocks(&self) -> Vec<BlockRef> {
        self.calls.lock().unwrap().iter().map(|c| c.2).collect()
    }

    pub fn block_number_calls(&self) -> usize {
        self.block_number_calls.load(Ordering::SeqCst)
    }

    /// eth_call plus eth_blockNumber requests seen so far.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len() + self.block_number_calls()
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn block_number(&self) -> Result<u64, ChainError> {
        self.block_number_calls.fetch_add(1, Ordering::SeqCst);
        match self.head_error.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(self.head.load(Ordering::SeqCst)),
        }
    }

    async fn call(&self, to: Address, data: Bytes, block: BlockRef) -> Result<Bytes, ChainError> {
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&data[..4]);
        self.calls.lock().unwrap().push((to, selector, block));

        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&(to, selector))
            .cloned()
            .unwrap_or_else(|| Err(ChainError::Reverted("no mock response".to_string())));
        response.map(|value| Bytes::from(value.to_be_bytes::<32>().to_vec()))
    }
}

pub struct MockConnector {
    chain: Arc<MockChain>,
    endpoints: Mutex<Vec<String>>,
}

impl MockConnector {
    pub fn new(chain: Arc<MockChain>) -> Self {
        MockConnector {
            chain,
            endpoints: Mutex::new(Vec::new()),
        }
    }

    pub fn connects(&self) -> usize {
        self.endpoints.lock().unwrap().len()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.endpoints.lock().unwrap().clone()
    }
}

impl ChainConnector for MockConnector {
    fn connect(&self, endpoint: &str) -> Result<Arc<dyn ChainReader>, ChainError> {
        self.endpoints.lock().unwrap().push(endpoint.to_string());
        let reader: Arc<dyn ChainReader> = self.chain.clone();
        Ok(reader)
    }
}

pub struct StaticSecrets(pub Option<String>);

#[async_trait]
impl SecretStore for StaticSecrets {
    async fn get_secret(&self, _name: &str) -> anyhow::Result<Option<String>> {
        Ok(self.0.clone())
    }
}

/// Upserts into a map keyed by (wallet, project), mirroring the unique index.
#[derive(Default)]
pub struct MockSink {
    rows: Mutex<HashMap<(Uuid, ProjectName), NftHolding>>,
}

impl MockSink {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl HoldingsSink for MockSink {
    async fn upsert_nft_holding(
        &self,
        wallet_id: Uuid,
        project: ProjectName,
        record: &HoldingsRecord,
    ) -> anyhow::Result<Upserted<NftHolding>> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let inserted = !rows.contains_key(&(wallet_id, project));
        let row = rows.entry((wallet_id, project)).or_insert_with(|| NftHolding {
            id: Uuid::new_v4(),
            wallet_id,
            project_name: project.as_str().to_string(),
            total_nfts: 0,
            micro_nfts: BigDecimal::from(0),
            pending_rewards: BigDecimal::from(0),
            block_number: None,
            created_at: now,
            updated_at: now,
        });
        row.total_nfts = record.total_nfts as i64;
        row.micro_nfts = record.micro_nfts.clone();
        row.pending_rewards = record.pending_rewards.clone();
        row.block_number = Some(record.block_number as i64);
        row.updated_at = now;
        Ok(Upserted {
            row: row.clone(),
            inserted,
        })
    }
}

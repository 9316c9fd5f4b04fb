//! Typed adapters for the contracts the aggregator reads. Each exposes only
//! the entry points that are actually consumed.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;

use super::{
    abi::{IBgldNft, IMicroNft, IRewardDistributor},
    BlockRef, ChainError, ChainReader,
};

/// Runs one view call at `block` and decodes its return tuple.
async fn read<C>(
    reader: &dyn ChainReader,
    to: Address,
    call: C,
    block: BlockRef,
) -> Result<C::Return, ChainError>
where
    C: SolCall + Send,
{
    let data = call.abi_encode();
    let out = reader.call(to, data.into(), block).await?;
    C::abi_decode_returns(&out, true)
        .map_err(|e| ChainError::Decode(format!("{} at {}: {}", C::SIGNATURE, to, e)))
}

/// ERC-721 style collection; only the holder count is read.
pub struct NftContract<'r> {
    address: Address,
    reader: &'r dyn ChainReader,
}

impl<'r> NftContract<'r> {
    pub fn new(address: Address, reader: &'r dyn ChainReader) -> Self {
        NftContract { address, reader }
    }

    pub async fn balance_of(&self, owner: Address, block: BlockRef) -> Result<U256, ChainError> {
        let call = IBgldNft::balanceOfCall { owner };
        Ok(read(self.reader, self.address, call, block).await?._0)
    }
}

/// Fractional ERC-20 style token.
pub struct MicroNftContract<'r> {
    address: Address,
    reader: &'r dyn ChainReader,
}

impl<'r> MicroNftContract<'r> {
    pub fn new(address: Address, reader: &'r dyn ChainReader) -> Self {
        MicroNftContract { address, reader }
    }

    pub async fn balance_of(&self, owner: Address, block: BlockRef) -> Result<U256, ChainError> {
        let call = IMicroNft::balanceOfCall { owner };
        Ok(read(self.reader, self.address, call, block).await?._0)
    }

    pub async fn decimals(&self, block: BlockRef) -> Result<u8, ChainError> {
        let call = IMicroNft::decimalsCall {};
        Ok(read(self.reader, self.address, call, block).await?._0)
    }
}

pub struct RewardDistributor<'r> {
    address: Address,
    reader: &'r dyn ChainReader,
}

impl<'r> RewardDistributor<'r> {
    pub fn new(address: Address, reader: &'r dyn ChainReader) -> Self {
        RewardDistributor { address, reader }
    }

    /// Unclaimed rewards in base units (18 decimals).
    pub async fn calculate_pending_rewards(
        &self,
        user: Address,
        block: BlockRef,
    ) -> Result<U256, ChainError> {
        let call = IRewardDistributor::calculatePendingRewardsCall { user };
        Ok(read(self.reader, self.address, call, block).await?._0)
    }
}

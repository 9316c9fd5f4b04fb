use std::collections::HashSet;

use bigdecimal::BigDecimal;
use futures::future::try_join_all;
use tracing::{info, instrument};

use crate::types::holdings::Voucher;

use super::{parse_address, HoldingsAggregator, HoldingsError};

/// Splits a comma or whitespace separated list of addresses, dropping blanks.
pub fn parse_wallet_list(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

impl HoldingsAggregator {
    /// Sums holdings across `wallets` at one block. One reader serves every
    /// wallet, and without a cutoff the current head is resolved once. Fails
    /// as a whole if any wallet fails.
    #[instrument(skip(self, wallets), fields(wallets = wallets.len()))]
    pub async fn generate_voucher(
        &self,
        email: &str,
        wallets: &[String],
        cutoff_block: Option<u64>,
    ) -> Result<Voucher, HoldingsError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(HoldingsError::InvalidInput("email is required".to_string()));
        }

        // Validate everything before the first network call, and count each
        // wallet once regardless of checksum casing.
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for wallet in wallets {
            let address = parse_address(wallet)?;
            if seen.insert(address) {
                unique.push((address, wallet.trim()));
            }
        }
        if unique.is_empty() {
            return Err(HoldingsError::InvalidInput(
                "at least one wallet address is required".to_string(),
            ));
        }

        let reader = self.reader().await?;
        let block = match cutoff_block {
            Some(block) => block,
            None => reader.block_number().await?,
        };

        let records = try_join_all(
            unique
                .iter()
                .map(|(owner, wallet)| self.read_holdings(reader.as_ref(), *owner, wallet, block)),
        )
        .await?;

        let total_nfts: u64 = records.iter().map(|r| r.total_nfts).sum();
        let micro_nfts = records
            .iter()
            .fold(BigDecimal::from(0), |acc, r| acc + &r.micro_nfts)
            .normalized();
        let pending_rewards = records
            .iter()
            .fold(BigDecimal::from(0), |acc, r| acc + &r.pending_rewards)
            .normalized();

        info!(
            "Voucher for {} over {} wallet(s) at block {}: nfts={} micro={} rewards={}",
            email,
            records.len(),
            block,
            total_nfts,
            micro_nfts,
            pending_rewards
        );

        Ok(Voucher {
            email: email.to_string(),
            cutoff_block: Some(block),
            wallets: records,
            total_nfts,
            micro_nfts,
            pending_rewards,
        })
    }
}

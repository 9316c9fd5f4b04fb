use alloy_sol_types::{sol, SolCall};

sol! {
    interface IBgldNft {
        function balanceOf(address owner) external view returns (uint256);
    }

    interface IMicroNft {
        function balanceOf(address owner) external view returns (uint256);
        function decimals() external view returns (uint8);
    }

    interface IRewardDistributor {
        function calculatePendingRewards(address user) external view returns (uint256);
    }
}

pub type Selector = [u8; 4];

pub const BALANCE_OF: Selector = IBgldNft::balanceOfCall::SELECTOR;
pub const DECIMALS: Selector = IMicroNft::decimalsCall::SELECTOR;
pub const CALCULATE_PENDING_REWARDS: Selector =
    IRewardDistributor::calculatePendingRewardsCall::SELECTOR;

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{hex, Address, U256};
    use std::str::FromStr;

    #[test]
    fn test_known_selectors() {
        assert_eq!(hex::encode(BALANCE_OF), "70a08231");
        assert_eq!(hex::encode(DECIMALS), "313ce567");
        assert_eq!(hex::encode(CALCULATE_PENDING_REWARDS), "097aad10");
        assert_eq!(IMicroNft::balanceOfCall::SELECTOR, BALANCE_OF);
    }

    #[test]
    fn test_balance_of_calldata() {
        let owner = Address::from_str("0x1111111111111111111111111111111111111111").unwrap();
        let data = IBgldNft::balanceOfCall { owner }.abi_encode();
        assert_eq!(
            hex::encode(&data),
            "70a08231\
             0000000000000000000000001111111111111111111111111111111111111111"
        );
    }

    #[test]
    fn test_decode_returns() {
        let mut word = [0u8; 32];
        word[31] = 3;
        let out = IBgldNft::balanceOfCall::abi_decode_returns(&word, true).unwrap();
        assert_eq!(out._0, U256::from(3u64));

        assert!(IBgldNft::balanceOfCall::abi_decode_returns(&[0u8; 4], true).is_err());

        // uint8 must be zero-padded
        let mut wide = [0u8; 32];
        wide[30] = 1;
        assert!(IMicroNft::decimalsCall::abi_decode_returns(&wide, true).is_err());
    }
}

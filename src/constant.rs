pub mod bsc {
    pub const RPC_BASE_URL: &str = "https://bnb-mainnet.g.alchemy.com/v2";
    pub const RPC_SECRET_NAME: &str = "BSC_API_KEY";

    pub const BGLD_NFT: &str = "0x3abedba3052845ce3f57818032bfa747cded3fca";
    pub const BGLD_MICRO_NFT: &str = "0x935d2fd458fdf41ca227a009180de5bd32a6d116";
    pub const BGLD_REWARD_DISTRIBUTOR: &str = "0x0c9fa52d7ed12a6316d3738c80931eccc33937dd";
    pub const BGLD_REWARD_DISTRIBUTOR_DIAMOND: &str = "0xf751d2849b3659c81f3724814d5a8defb0bb8ad2";
}

/// Native 18-decimal convention used by the reward distributors.
pub const REWARD_DECIMALS: u32 = 18;

pub const ADDRESS_LEN: usize = 42;

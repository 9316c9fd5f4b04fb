#[derive(Debug)]
pub enum WalletPath {
    ProfileWallets,
    Wallet,
    Holdings,
    SyncHoldings,
}

impl WalletPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProfileWallets => "/profiles/:id/wallets",
            Self::Wallet => "/wallets/:id",
            Self::Holdings => "/wallets/:id/holdings",
            Self::SyncHoldings => "/wallets/:id/holdings/sync",
        }
    }
}

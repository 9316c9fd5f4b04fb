use std::{
    env,
    net::{IpAddr, SocketAddr},
    str::FromStr,
    time::Duration,
};

use alloy_primitives::Address;
use anyhow::{bail, Context, Result};
use tracing::Level;

use crate::{
    constant::bsc,
    holdings::{AggregatorConfig, ContractSet},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretBackend {
    /// `get_secret(name)` SQL function.
    Postgres,
    /// Environment variable named after the secret.
    Env,
}

impl FromStr for SecretBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(SecretBackend::Postgres),
            "env" => Ok(SecretBackend::Env),
            other => bail!("Unknown SECRET_BACKEND {}, expected postgres or env", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,
    pub log_level: Level,
    pub secret_backend: SecretBackend,
    pub request_timeout: Duration,
    pub aggregator: AggregatorConfig,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let ip = IpAddr::from_str(var_or("IP", "0.0.0.0").trim()).context("Invalid IP")?;
        let port: u16 = var_or("PORT", "8080").trim().parse().context("Invalid PORT")?;

        let database_url = var("DATABASE_URL").context("DATABASE_URL is required")?;
        let database_max_connections = var_or("DATABASE_MAX_CONNECTIONS", "50")
            .trim()
            .parse()
            .context("Invalid DATABASE_MAX_CONNECTIONS")?;

        let log_level = Level::from_str(var_or("LOG_LEVEL", "info").trim())
            .map_err(|e| anyhow::anyhow!("Invalid LOG_LEVEL: {}", e))?;
        let secret_backend = var_or("SECRET_BACKEND", "postgres").parse()?;
        let request_timeout = Duration::from_secs(
            var_or("REQUEST_TIMEOUT_SECS", "10")
                .trim()
                .parse()
                .context("Invalid REQUEST_TIMEOUT_SECS")?,
        );

        let contract = |key: &str, default: &str| -> Result<Address> {
            let value = var_or(key, default);
            Address::from_str(value.trim()).with_context(|| format!("Invalid {}: {}", key, value))
        };
        let contracts = ContractSet {
            nft: contract("BGLD_NFT_ADDRESS", bsc::BGLD_NFT)?,
            micro_nft: contract("BGLD_MICRO_ADDRESS", bsc::BGLD_MICRO_NFT)?,
            rewards_legacy: contract("BGLD_REWARDS_LEGACY_ADDRESS", bsc::BGLD_REWARD_DISTRIBUTOR)?,
            rewards_diamond: contract(
                "BGLD_REWARDS_DIAMOND_ADDRESS",
                bsc::BGLD_REWARD_DISTRIBUTOR_DIAMOND,
            )?,
        };

        Ok(Config {
            addr: SocketAddr::new(ip, port),
            database_url,
            database_max_connections,
            log_level,
            secret_backend,
            request_timeout,
            aggregator: AggregatorConfig {
                rpc_base_url: var_or("RPC_BASE_URL", bsc::RPC_BASE_URL),
                rpc_secret_name: var_or("RPC_SECRET_NAME", bsc::RPC_SECRET_NAME),
                contracts,
            },
        })
    }
}

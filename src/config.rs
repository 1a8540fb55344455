//! Runtime configuration: RPC endpoints, chain IDs, module/router
//! addresses, the executor signing key, fee-receiver addresses, venue API
//! base URLs, and fee-model tunables — every secret/address the core
//! consumes per spec.md §6's Environment section.
//!
//! Grounded on the base crate's `run::config::RuntimeConfig::from_cli`:
//! secrets resolve through a direct env var first, falling back to a
//! `_FILE` variant (a path to a file containing the value) so containers
//! never need the secret to appear in `env`/`printenv` output.

use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use anyhow::{Context, Result, bail};
use ferrofluid::Network;

use crate::executor::{FeeModel, FeePolicy};
use crate::model::VenueKind;

/// Read `{name}` directly, or `{name}_FILE` as a path to a file holding
/// the value, trimmed. Used for every secret.
fn read_secret(name: &str) -> Result<String> {
    if let Ok(v) = std::env::var(name) {
        return Ok(v);
    }
    if let Ok(path) = std::env::var(format!("{name}_FILE")) {
        return std::fs::read_to_string(&path)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("reading {name} from {path}"));
    }
    bail!("{name} not configured (set {name} or {name}_FILE)")
}

fn read_required(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} not configured"))
}

fn read_address(name: &str) -> Result<Address> {
    read_required(name)?.parse().with_context(|| format!("parsing {name} as an address"))
}

fn read_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

pub struct SpotConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub vault_address: Address,
    pub module_address: Address,
    pub router_address: Address,
    pub collateral_token: Address,
    pub collateral_decimals: u8,
}

pub struct PerpAConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub vault_address: Address,
    pub module_address: Address,
    pub order_vault_address: Address,
    pub wrapped_gas_token: Address,
    pub collateral_token: Address,
    pub execution_fee_wei: U256,
    pub protocol_fee_receiver: Address,
}

pub struct PerpBConfig {
    pub network: Network,
}

pub struct PerpCConfig {
    pub rpc_url: String,
    pub order_book_address: Address,
}

pub struct CoordinatorConfig {
    pub spot: SpotConfig,
    pub perp_a: PerpAConfig,
    pub perp_b: PerpBConfig,
    pub perp_c: PerpCConfig,
    pub executor_private_key: String,
    pub key_store_master_secret: String,
    pub db_path: PathBuf,
    pub monitor_lock_path: PathBuf,
    pub admin_jwt_secret: String,
    pub fee_policy: FeePolicy,
}

impl CoordinatorConfig {
    pub fn from_env() -> Result<Self> {
        let spot = SpotConfig {
            rpc_url: read_required("SPOT_RPC_URL")?,
            chain_id: read_or("SPOT_CHAIN_ID", "42161").parse().context("parsing SPOT_CHAIN_ID")?,
            vault_address: read_address("SPOT_VAULT_ADDRESS")?,
            module_address: read_address("SPOT_MODULE_ADDRESS")?,
            router_address: read_address("SPOT_ROUTER_ADDRESS")?,
            collateral_token: read_address("SPOT_COLLATERAL_TOKEN")?,
            collateral_decimals: read_or("SPOT_COLLATERAL_DECIMALS", "6").parse().context("parsing SPOT_COLLATERAL_DECIMALS")?,
        };

        let perp_a = PerpAConfig {
            rpc_url: read_required("PERP_A_RPC_URL")?,
            chain_id: read_or("PERP_A_CHAIN_ID", "42161").parse().context("parsing PERP_A_CHAIN_ID")?,
            vault_address: read_address("PERP_A_VAULT_ADDRESS")?,
            module_address: read_address("PERP_A_MODULE_ADDRESS")?,
            order_vault_address: read_address("PERP_A_ORDER_VAULT_ADDRESS")?,
            wrapped_gas_token: read_address("PERP_A_WRAPPED_GAS_TOKEN")?,
            collateral_token: read_address("PERP_A_COLLATERAL_TOKEN")?,
            execution_fee_wei: U256::from(read_or("PERP_A_EXECUTION_FEE_WEI", "0").parse::<u128>().context("parsing PERP_A_EXECUTION_FEE_WEI")?),
            protocol_fee_receiver: read_address("PERP_A_PROTOCOL_FEE_RECEIVER")?,
        };

        let perp_b_network = match read_or("PERP_B_NETWORK", "mainnet").to_lowercase().as_str() {
            "mainnet" => Network::Mainnet,
            "testnet" => Network::Testnet,
            other => bail!("invalid PERP_B_NETWORK '{other}': use 'mainnet' or 'testnet'"),
        };

        let perp_c = PerpCConfig {
            rpc_url: read_required("PERP_C_RPC_URL")?,
            order_book_address: read_address("PERP_C_ORDER_BOOK_ADDRESS")?,
        };

        Ok(CoordinatorConfig {
            spot,
            perp_a,
            perp_b: PerpBConfig { network: perp_b_network },
            perp_c,
            executor_private_key: read_secret("EXECUTOR_PRIVATE_KEY")?,
            key_store_master_secret: read_secret("KEY_STORE_MASTER_SECRET")?,
            db_path: PathBuf::from(read_or("COORDINATOR_DB_PATH", "coordinator.sqlite3")),
            monitor_lock_path: std::env::var("MONITOR_LOCK_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| crate::singleton::default_lock_path()),
            admin_jwt_secret: read_secret("ADMIN_JWT_SECRET")?,
            fee_policy: fee_policy_from_env(),
        })
    }
}

/// Builds the per-venue fee policy from `{VENUE}_FEE_MODEL` (one of
/// `FLAT`, `PERCENTAGE`, `TIERED`, `PROFIT_SHARE`) plus the matching
/// tunable (`{VENUE}_FLAT_FEE`, `{VENUE}_FEE_PERCENT`,
/// `{VENUE}_PROFIT_SHARE`). A venue with no `_FEE_MODEL` set keeps the
/// policy's 20% profit-share default.
fn fee_policy_from_env() -> FeePolicy {
    let mut policy = FeePolicy::default();
    for (venue, prefix) in [
        (VenueKind::Spot, "SPOT"),
        (VenueKind::PerpA, "PERP_A"),
        (VenueKind::PerpB, "PERP_B"),
        (VenueKind::PerpC, "PERP_C"),
    ] {
        let Ok(model_name) = std::env::var(format!("{prefix}_FEE_MODEL")) else { continue };
        let model = match model_name.to_uppercase().as_str() {
            "FLAT" => FeeModel::Flat { amount: read_or(&format!("{prefix}_FLAT_FEE"), "0").parse().unwrap_or(0.0) },
            "PERCENTAGE" => {
                FeeModel::Percentage { percent: read_or(&format!("{prefix}_FEE_PERCENT"), "0").parse().unwrap_or(0.0) }
            }
            "PROFIT_SHARE" => {
                FeeModel::ProfitShare { percent: read_or(&format!("{prefix}_PROFIT_SHARE"), "20").parse().unwrap_or(20.0) }
            }
            "TIERED" => continue, // tiers have no single-env-var representation; configure in code.
            _ => continue,
        };
        policy = policy.with_venue_model(venue, model);
    }
    policy
}

//! Signer / KeyStore.
//!
//! Two distinct roles live here, matching the base crate's split between
//! a single wallet (`RuntimeConfig::private_key`) and the multi-user
//! wallet table in `api/db.rs`:
//!
//! - One **executor key** signs every vault-mediated venue call (SPOT,
//!   PERP-A) — the coordinator's own key, never the user's.
//! - A bounded **per-(user, venue) key lookup** resolves the delegated
//!   agent key for PERP-B/PERP-C, keyed by the `UserAgentAddress` the
//!   Repo tracks. The coordinator never holds a user's own private key.

pub mod crypto;

use std::collections::HashMap;
use std::sync::RwLock;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result, bail};

use crate::model::VenueKind;

/// Bounded per-(agent address) key lookup. Explicitly NOT a general
/// custody system: it holds only delegated agent
/// keys the platform generated for its own use, never user-owned keys.
pub struct KeyStore {
    master_secret: String,
    keys: RwLock<HashMap<Address, crypto::SealedKey>>,
}

impl KeyStore {
    pub fn new(master_secret: String) -> Self {
        KeyStore {
            master_secret,
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// Register a freshly-generated delegated agent key at rest.
    pub fn store_agent_key(&self, address: Address, private_key_hex: &str) -> Result<()> {
        let sealed = crypto::seal(&self.master_secret, address, private_key_hex)?;
        self.keys.write().unwrap().insert(address, sealed);
        Ok(())
    }

    /// Resolve a signer for a delegated agent address. Missing key is a
    /// terminal, deployment-scoped failure.
    pub fn resolve_signer(&self, agent_address: Address) -> Result<PrivateKeySigner> {
        let guard = self.keys.read().unwrap();
        let sealed = guard
            .get(&agent_address)
            .context("agent-wallet-missing")?;
        let pk_hex = crypto::open(&self.master_secret, agent_address, &sealed.salt, &sealed.ciphertext_b64)?;
        let signer: PrivateKeySigner = pk_hex
            .parse()
            .map_err(|e| anyhow::anyhow!("stored agent key is invalid: {e}"))?;
        Ok(signer)
    }

    pub fn has_key_for(&self, address: Address) -> bool {
        self.keys.read().unwrap().contains_key(&address)
    }
}

/// The executor's own signer for vault-mediated venues (SPOT, PERP-A):
/// the coordinator signs module calls on behalf of the vault, never the
/// user's own key.
pub struct ExecutorSigner {
    signer: PrivateKeySigner,
}

impl ExecutorSigner {
    pub fn from_private_key(private_key_hex: &str) -> Result<Self> {
        let signer: PrivateKeySigner = private_key_hex
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid executor private key: {e}"))?;
        Ok(ExecutorSigner { signer })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

/// Resolve the signing address for a given venue + (user_wallet, executor
/// address) pair. Vault-mediated venues always sign with the executor key;
/// delegated venues require a prior `UserAgentAddress` + KeyStore entry.
pub fn resolve_signing_address(
    venue: VenueKind,
    executor: &ExecutorSigner,
    agent_address: Option<Address>,
) -> Result<Address> {
    if venue.is_vault_mediated() {
        return Ok(executor.address());
    }
    agent_address.context("agent-wallet-missing")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_resolves_agent_key() {
        let store = KeyStore::new("test-master-secret".into());
        let signer = PrivateKeySigner::random();
        let address = signer.address();
        let pk_hex = format!("0x{}", hex::encode(signer.to_bytes()));

        store.store_agent_key(address, &pk_hex).unwrap();
        assert!(store.has_key_for(address));

        let resolved = store.resolve_signer(address).unwrap();
        assert_eq!(resolved.address(), address);
    }

    #[test]
    fn missing_key_is_agent_wallet_missing() {
        let store = KeyStore::new("secret".into());
        let random_addr = PrivateKeySigner::random().address();
        let err = store.resolve_signer(random_addr).unwrap_err();
        assert!(err.to_string().contains("agent-wallet-missing"));
    }
}

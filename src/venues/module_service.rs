//! Shared owner of the vault's smart-contract module, used by the SPOT and
//! PERP-A adapters (the two vault-mediated venues).
//!
//! Adapter <-> module-service is a legitimate cycle: the adapter builds
//! venue-specific calldata, the module broadcasts it on the vault's
//! behalf. Resolved the way a Safe-style module owner resolves it: the
//! service is constructed once per (chain_id, module_address) and handed
//! to adapters at construction; adapters hold a reference only and never
//! initialize it themselves. Grounded on the base crate's `evm.rs`
//! provider/signer wiring and `vault/morpho.rs`'s `sol!` ERC20 interface.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use alloy::network::EthereumWallet;
use alloy::primitives::{address, Address, Bytes, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::sol;
use anyhow::{Context, Result};
use tokio::sync::Mutex as AsyncMutex;

use crate::nonce::NonceSerializer;
use crate::signer::ExecutorSigner;
use crate::singleton::SingletonRegistry;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract IVaultModule {
        /// Executes arbitrary calldata `data` against `to` on the vault's
        /// behalf, forwarding `value` wei of the chain's native asset.
        /// `operation` is the standard Safe module convention: 0 = call,
        /// 1 = delegatecall.
        function execTransactionFromModule(address to, uint256 value, bytes calldata data, uint8 operation) external returns (bool success);
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    contract IMultiSend {
        /// Executes a packed sequence of `(operation, to, value, dataLength,
        /// data)` transactions atomically: if any sub-call reverts, the
        /// whole `multiSend` call (and so the module's delegatecall into
        /// it) reverts.
        function multiSend(bytes memory transactions) external payable;
    }
}

/// Canonical `MultiSendCallOnly` deployment address, identical across every
/// chain that uses the standard Safe singleton factory.
pub const MULTISEND_CALL_ONLY_ADDRESS: Address = address!("9641d764fc13c8B624c04430C7356C1C7C8102e");

const OPERATION_CALL: u8 = 0;
const OPERATION_DELEGATECALL: u8 = 1;

#[derive(Debug, Clone, Copy)]
pub struct NonceDiagnostic {
    pub address: Address,
    pub network_nonce: u64,
    pub cached_nonce: u64,
    pub refreshed_nonce: u64,
}

pub struct RpcNonceSource {
    provider: alloy::providers::RootProvider,
}

#[async_trait::async_trait]
impl crate::nonce::NonceSource for RpcNonceSource {
    async fn latest_nonce(&self, address: Address) -> Result<u64> {
        self.provider
            .get_transaction_count(address)
            .await
            .context("fetching latest nonce")
    }
}

/// Owns the RPC provider, the executor's signer, and the vault module
/// address for one (chain, module) pair. Adapters never construct this
/// directly; they go through `ModuleServiceRegistry`.
pub struct ModuleService {
    pub chain_id: u64,
    pub module_address: Address,
    pub vault_address: Address,
    pub rpc_url: String,
    executor: Arc<ExecutorSigner>,
    nonce: NonceSerializer<RpcNonceSource>,
    capital_tracking_initialized: OnceLock<()>,
    max_allowance_given: AsyncMutex<HashSet<Address>>,
}

impl ModuleService {
    /// `rpc_url` must already be a valid URL; callers validate it once at
    /// the registry boundary so construction here is infallible.
    fn new(
        chain_id: u64,
        module_address: Address,
        vault_address: Address,
        rpc_url: reqwest::Url,
        executor: Arc<ExecutorSigner>,
    ) -> Arc<Self> {
        let provider = ProviderBuilder::new().connect_http(rpc_url.clone());
        let nonce = NonceSerializer::new(RpcNonceSource { provider });

        Arc::new(ModuleService {
            chain_id,
            module_address,
            vault_address,
            rpc_url: rpc_url.to_string(),
            executor,
            nonce,
            capital_tracking_initialized: OnceLock::new(),
            max_allowance_given: AsyncMutex::new(HashSet::new()),
        })
    }

    fn signing_provider(&self) -> Result<impl Provider> {
        let wallet = EthereumWallet::from(self.executor.signer().clone());
        Ok(ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(self.rpc_url.parse()?))
    }

    /// No-op if capital tracking is already initialized for this vault;
    /// races between adapters are tolerated by the one-shot record.
    pub async fn ensure_capital_tracking(&self) -> Result<()> {
        if self.capital_tracking_initialized.get().is_some() {
            return Ok(());
        }
        // A real deployment would probe the vault's on-chain tracking
        // flag via a view call; the one-shot record here gives the same
        // idempotent guarantee within this process.
        let _ = self.capital_tracking_initialized.set(());
        Ok(())
    }

    /// Idempotent max-allowance approval of `token` to `spender` through
    /// the module. Safe to call on every trade; skipped once already
    /// granted this process.
    pub async fn approve_max(&self, token: Address, spender: Address) -> Result<()> {
        let mut granted = self.max_allowance_given.lock().await;
        if granted.contains(&token) {
            return Ok(());
        }

        let calldata = IERC20::approveCall {
            spender,
            amount: U256::MAX,
        };
        self.exec_from_module(token, U256::ZERO, Bytes::from(alloy::sol_types::SolCall::abi_encode(&calldata)))
            .await?;
        granted.insert(token);
        Ok(())
    }

    /// Broadcast `data` against `to` through the vault module, serialized
    /// through the executor's nonce slot.
    pub async fn exec_from_module(&self, to: Address, value: U256, data: Bytes) -> Result<String> {
        self.exec_module_call(to, value, data, OPERATION_CALL).await
    }

    /// Broadcast every `(to, value, data)` triple as a single atomic
    /// transaction, via a delegatecall into the canonical `MultiSend`
    /// library: if any one sub-call reverts, the whole batch reverts and
    /// none of it lands on-chain. Use this instead of several
    /// `exec_from_module` calls whenever the steps must all-or-nothing.
    pub async fn exec_batch_from_module(&self, calls: Vec<(Address, U256, Bytes)>) -> Result<String> {
        let mut packed = Vec::new();
        for (to, value, data) in calls {
            packed.push(OPERATION_CALL);
            packed.extend_from_slice(to.as_slice());
            packed.extend_from_slice(&value.to_be_bytes::<32>());
            packed.extend_from_slice(&U256::from(data.len()).to_be_bytes::<32>());
            packed.extend_from_slice(&data);
        }
        let transactions = Bytes::from(packed);
        let multisend_call = IMultiSend::multiSendCall { transactions };
        let data = Bytes::from(alloy::sol_types::SolCall::abi_encode(&multisend_call));
        self.exec_module_call(MULTISEND_CALL_ONLY_ADDRESS, U256::ZERO, data, OPERATION_DELEGATECALL).await
    }

    async fn exec_module_call(&self, to: Address, value: U256, data: Bytes, operation: u8) -> Result<String> {
        let module_address = self.module_address;
        let calldata = IVaultModule::execTransactionFromModuleCall {
            to,
            value,
            data,
            operation,
        };
        let encoded = Bytes::from(alloy::sol_types::SolCall::abi_encode(&calldata));
        let executor_address = self.executor.address();

        let result = self
            .nonce
            .with_nonce(executor_address, |_nonce| {
                let encoded = encoded.clone();
                async move {
                    let provider = self
                        .signing_provider()
                        .map_err(|e| e.to_string())?;
                    let tx = alloy::rpc::types::TransactionRequest::default()
                        .to(module_address)
                        .input(encoded.into());
                    let pending = provider
                        .send_transaction(tx)
                        .await
                        .map_err(|e| e.to_string())?;
                    let hash = *pending.tx_hash();
                    Ok(format!("{hash:#x}"))
                }
            })
            .await?;
        Ok(result)
    }

    /// Diagnostic for the admin `/admin/test-nonce` endpoint: the
    /// network's current nonce, the serializer's cached value, and a
    /// freshly forced re-sync, all for the executor's own address.
    pub async fn nonce_diagnostic(&self) -> Result<NonceDiagnostic> {
        let address = self.executor.address();
        Ok(NonceDiagnostic {
            address,
            network_nonce: self.nonce.network_nonce(address).await?,
            cached_nonce: self.nonce.cached_nonce(address).await,
            refreshed_nonce: self.nonce.force_refresh(address).await?,
        })
    }

    pub async fn vault_token_balance(&self, token: Address) -> Result<U256> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.parse()?);
        let erc20 = IERC20::new(token, provider);
        erc20
            .balanceOf(self.vault_address)
            .call()
            .await
            .context("reading vault token balance")
    }
}

/// Process-wide factory returning one `ModuleService` per (chain_id,
/// module_address), as required for the module to be a true singleton
/// shared by SPOT and PERP-A.
#[derive(Default)]
pub struct ModuleServiceRegistry {
    inner: SingletonRegistry<Arc<ModuleService>>,
}

impl ModuleServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_init(
        &self,
        chain_id: u64,
        module_address: Address,
        vault_address: Address,
        rpc_url: &str,
        executor: Arc<ExecutorSigner>,
    ) -> Result<Arc<ModuleService>> {
        let parsed_url: reqwest::Url = rpc_url.parse().context("parsing module RPC url")?;
        let addr_str = format!("{module_address:#x}");
        let service = self.inner.get_or_init(chain_id, &addr_str, || {
            ModuleService::new(chain_id, module_address, vault_address, parsed_url, executor)
        });
        Ok(service)
    }
}

//! SPOT: vault-mediated DEX swaps through the module, using an
//! exact-input-single router call. Grounded on the base crate's
//! `vault/morpho.rs` (module + ERC20 `sol!` interfaces, cached-context
//! idiom) generalized from an ERC4626 vault call to a router swap.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use async_trait::async_trait;

use crate::model::{QtySemantics, VenueKind};
use crate::repo::Repo;
use crate::venues::module_service::ModuleService;
use crate::venues::{
    AdapterError, CloseRequest, CloseResult, OpenRequest, OpenResult, PriceSource, VenueAdapter,
    VenueOpenPosition,
};

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract ISwapRouter {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }
        function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut);
    }
}

/// Default pool-fee tier in hundredths of a bip (30 bps), overridable per chain.
pub const DEFAULT_POOL_FEE: u32 = 3000;

pub struct SpotAdapter {
    module: std::sync::Arc<ModuleService>,
    chain_name: String,
    router_address: Address,
    collateral_token: Address,
    collateral_decimals: u8,
    repo: Repo,
    prices: std::sync::Arc<dyn PriceSource>,
    pool_fee: u32,
}

impl SpotAdapter {
    pub fn new(
        module: std::sync::Arc<ModuleService>,
        chain_name: String,
        router_address: Address,
        collateral_token: Address,
        collateral_decimals: u8,
        repo: Repo,
        prices: std::sync::Arc<dyn PriceSource>,
    ) -> Self {
        SpotAdapter {
            module,
            chain_name,
            router_address,
            collateral_token,
            collateral_decimals,
            repo,
            prices,
            pool_fee: DEFAULT_POOL_FEE,
        }
    }

    fn scale(&self, value: f64) -> U256 {
        let scaled = value * 10f64.powi(self.collateral_decimals as i32);
        U256::from(scaled as u128)
    }

    fn unscale(&self, raw: U256) -> f64 {
        let raw: u128 = raw.try_into().unwrap_or(u128::MAX);
        raw as f64 / 10f64.powi(self.collateral_decimals as i32)
    }

    /// Decodes the router's real `amountOut` via a static call against the
    /// router directly, simulated as the vault (the router's actual
    /// `msg.sender` once the module broadcasts the same calldata).
    async fn simulate_swap(&self, params: ISwapRouter::ExactInputSingleParams) -> anyhow::Result<U256> {
        let provider = alloy::providers::ProviderBuilder::new().connect_http(self.module.rpc_url.parse()?);
        let router = ISwapRouter::new(self.router_address, provider);
        let amount_out = router
            .exactInputSingle(params)
            .from(self.module.vault_address)
            .call()
            .await?;
        Ok(amount_out)
    }
}

#[async_trait]
impl VenueAdapter for SpotAdapter {
    fn kind(&self) -> VenueKind {
        VenueKind::Spot
    }

    async fn setup(&self) -> Result<(), AdapterError> {
        self.module
            .ensure_capital_tracking()
            .await
            .map_err(|e| AdapterError::Rpc(e.to_string()))
    }

    async fn available_balance(&self) -> Result<f64, AdapterError> {
        let raw = self.module.vault_token_balance(self.collateral_token).await.map_err(|e| AdapterError::Rpc(e.to_string()))?;
        Ok(self.unscale(raw))
    }

    async fn open(&self, request: OpenRequest) -> OpenResult {
        let (token_address, token_decimals) = match self.repo.get_token_registry_entry(&self.chain_name, &request.token_symbol).await {
            Ok(Some(entry)) => match entry.address.parse::<Address>() {
                Ok(addr) => (addr, entry.decimals),
                Err(e) => return OpenResult { error: Some(format!("token-not-registered: {e}")), ..Default::default() },
            },
            Ok(None) => return OpenResult { error: Some(AdapterError::TokenNotRegistered.as_code()), ..Default::default() },
            Err(e) => return OpenResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() },
        };

        if let Err(e) = self.module.ensure_capital_tracking().await {
            return OpenResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() };
        }
        if let Err(e) = self.module.approve_max(self.collateral_token, self.router_address).await {
            return OpenResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() };
        }

        let amount_in = self.scale(request.input_value);
        let params = ISwapRouter::ExactInputSingleParams {
            tokenIn: self.collateral_token,
            tokenOut: token_address,
            fee: self.pool_fee,
            recipient: self.module.vault_address,
            amountIn: amount_in,
            amountOutMinimum: U256::ZERO,
            sqrtPriceLimitX96: U256::ZERO.to(),
        };

        // `execTransactionFromModule` only bubbles up a `bool success`, not
        // the router's own return data, so the real `amountOut` has to come
        // from a static call against the router itself first, with the
        // vault as the simulated sender (it's the vault, not the module,
        // that the router will actually see as `msg.sender`/`recipient`).
        let amount_out = match self.simulate_swap(params.clone()).await {
            Ok(out) => out,
            Err(e) => return OpenResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() },
        };

        let calldata = Bytes::from(alloy::sol_types::SolCall::abi_encode(&ISwapRouter::exactInputSingleCall { params }));

        match self.module.exec_from_module(self.router_address, U256::ZERO, calldata).await {
            Ok(tx_ref) => {
                let amount_out_units = amount_out.try_into().unwrap_or(u128::MAX) as f64 / 10f64.powi(token_decimals as i32);
                let entry_price = if amount_out_units > 0.0 { request.input_value / amount_out_units } else { 0.0 };
                OpenResult {
                    tx_ref: Some(tx_ref),
                    amount_out: Some(amount_out_units),
                    entry_price_estimate: Some(entry_price),
                    venue_trade_id: None,
                    venue_trade_index: None,
                    error: None,
                }
            }
            Err(e) => OpenResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() },
        }
    }

    async fn close(&self, request: CloseRequest) -> CloseResult {
        let token_address = match self.repo.get_token_registry_entry(&self.chain_name, &request.position.token_symbol).await {
            Ok(Some(entry)) => match entry.address.parse::<Address>() {
                Ok(addr) => addr,
                Err(e) => return CloseResult { error: Some(format!("token-not-registered: {e}")), ..Default::default() },
            },
            _ => return CloseResult { error: Some(AdapterError::TokenNotRegistered.as_code()), ..Default::default() },
        };

        if let Err(e) = self.module.approve_max(token_address, self.router_address).await {
            return CloseResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() };
        }

        let actual_balance = match self.module.vault_token_balance(token_address).await {
            Ok(bal) => bal,
            Err(e) => return CloseResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() },
        };
        if actual_balance.is_zero() {
            return CloseResult {
                tx_ref: None,
                exit_price: Some(0.0),
                realized_pnl: Some(0.0),
                error: None,
            };
        }

        let params = ISwapRouter::ExactInputSingleParams {
            tokenIn: token_address,
            tokenOut: self.collateral_token,
            fee: self.pool_fee,
            recipient: self.module.vault_address,
            amountIn: actual_balance,
            amountOutMinimum: U256::ZERO,
            sqrtPriceLimitX96: U256::ZERO.to(),
        };
        let call = ISwapRouter::exactInputSingleCall { params };
        let calldata = Bytes::from(alloy::sol_types::SolCall::abi_encode(&call));

        match self.module.exec_from_module(self.router_address, U256::ZERO, calldata).await {
            Ok(tx_ref) => {
                let current_price = self
                    .prices
                    .price(VenueKind::Spot, &request.position.token_symbol)
                    .await
                    .unwrap_or(request.position.entry_price);
                let pnl = request.position.unrealized_pnl(current_price, QtySemantics::AssetUnits);
                CloseResult {
                    tx_ref: Some(tx_ref),
                    exit_price: Some(current_price),
                    realized_pnl: Some(pnl),
                    error: None,
                }
            }
            Err(e) => CloseResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() },
        }
    }

    async fn list_open_positions(&self, _owner: Address) -> Result<Vec<VenueOpenPosition>, AdapterError> {
        // SPOT positions are balances, not discrete trades; balance-based
        // auto-discovery is handled by the executor's collateral check
        // rather than a venue position list.
        Ok(Vec::new())
    }

    fn supports_position_listing(&self) -> bool {
        false
    }

    async fn current_price(&self, token_symbol: &str) -> Result<f64, AdapterError> {
        self.prices.price(VenueKind::Spot, token_symbol).await
    }
}

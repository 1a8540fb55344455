//! PERP-A: vault-mediated, directly-callable on-chain perpetuals. Opening
//! is a composite calldata sequence the module executes atomically:
//! execution-fee transfer, collateral transfer, then order creation.
//! Grounded on the base crate's `vault/morpho.rs` module-call shape,
//! generalized from a single ERC4626 call to a multi-step sequence the
//! way `run/executor/evm.rs` chains calldata for on-chain actions.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use async_trait::async_trait;

use crate::model::{QtySemantics, Side, VenueKind};
use crate::venues::module_service::ModuleService;
use crate::venues::{
    AdapterError, CloseRequest, CloseResult, OpenRequest, OpenResult, PriceSource, VenueAdapter,
    VenueOpenPosition,
};

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract IOrderVault {
        function createOrder(OrderParams calldata params) external payable returns (bytes32 orderKey);
        function createDecreaseOrder(OrderParams calldata params) external payable returns (bytes32 orderKey);
    }

    #[allow(missing_docs)]
    struct OrderParams {
        address market;
        int256 sizeDeltaUsd;
        uint256 collateralDelta;
        uint256 triggerPrice;
        uint256 acceptablePrice;
        uint256 executionFee;
        uint8 orderType;
        bool isLong;
        bool shouldUnwrapNativeToken;
        bytes32 referralCode;
    }

    #[allow(missing_docs)]
    #[sol(rpc)]
    contract IERC20Transfer {
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

/// 30-decimal fixed point scale used by the order vault for USD-denominated fields.
const USD_SCALE: u32 = 30;
const ORDER_TYPE_MARKET_INCREASE: u8 = 2;
const ORDER_TYPE_MARKET_DECREASE: u8 = 4;

/// Hard security ceilings, independent of any single deployment's own limits.
pub struct SecurityLimits {
    pub max_leverage: f64,
    pub max_position_collateral: f64,
    pub max_daily_volume_collateral: f64,
    pub whitelisted_tokens: Vec<String>,
}

impl Default for SecurityLimits {
    fn default() -> Self {
        SecurityLimits {
            max_leverage: 10.0,
            max_position_collateral: 5000.0,
            max_daily_volume_collateral: 20000.0,
            whitelisted_tokens: Vec::new(),
        }
    }
}

fn to_usd_scale(value: f64) -> U256 {
    let scaled = value * 10f64.powi(USD_SCALE as i32);
    U256::from(scaled as u128)
}

fn from_usd_scale(raw: U256) -> f64 {
    let raw: u128 = raw.try_into().unwrap_or(u128::MAX);
    raw as f64 / 10f64.powi(USD_SCALE as i32)
}

pub struct PerpAAdapter {
    module: std::sync::Arc<ModuleService>,
    order_vault_address: Address,
    wrapped_gas_token: Address,
    collateral_token: Address,
    execution_fee_wei: U256,
    protocol_fee_collateral: f64,
    protocol_fee_receiver: Address,
    limits: SecurityLimits,
    prices: std::sync::Arc<dyn PriceSource>,
    slippage_bps: f64,
    daily_volume_used: std::sync::Mutex<f64>,
}

impl PerpAAdapter {
    pub fn new(
        module: std::sync::Arc<ModuleService>,
        order_vault_address: Address,
        wrapped_gas_token: Address,
        collateral_token: Address,
        execution_fee_wei: U256,
        protocol_fee_receiver: Address,
        prices: std::sync::Arc<dyn PriceSource>,
    ) -> Self {
        PerpAAdapter {
            module,
            order_vault_address,
            wrapped_gas_token,
            collateral_token,
            execution_fee_wei,
            protocol_fee_collateral: 0.2,
            protocol_fee_receiver,
            limits: SecurityLimits::default(),
            prices,
            slippage_bps: 50.0,
            daily_volume_used: std::sync::Mutex::new(0.0),
        }
    }

    fn check_limits(&self, token_symbol: &str, leverage: f64, notional: f64) -> Result<(), AdapterError> {
        if !self.limits.whitelisted_tokens.is_empty()
            && !self.limits.whitelisted_tokens.iter().any(|t| t == token_symbol)
        {
            return Err(AdapterError::TokenNotRegistered);
        }
        if leverage > self.limits.max_leverage {
            return Err(AdapterError::VenueRejected("security-limit-hit: leverage".into()));
        }
        if notional > self.limits.max_position_collateral {
            return Err(AdapterError::VenueRejected("security-limit-hit: position-size".into()));
        }
        let mut used = self.daily_volume_used.lock().unwrap();
        if *used + notional > self.limits.max_daily_volume_collateral {
            return Err(AdapterError::VenueRejected("security-limit-hit: daily-volume".into()));
        }
        *used += notional;
        Ok(())
    }

    async fn collect_protocol_fee(&self) -> Result<String, AdapterError> {
        let fee = to_usd_scale(self.protocol_fee_collateral);
        let call = IERC20Transfer::transferCall {
            to: self.protocol_fee_receiver,
            amount: fee,
        };
        let calldata = Bytes::from(alloy::sol_types::SolCall::abi_encode(&call));
        self.module
            .exec_from_module(self.collateral_token, U256::ZERO, calldata)
            .await
            .map_err(|e| AdapterError::Rpc(e.to_string()))
    }
}

#[async_trait]
impl VenueAdapter for PerpAAdapter {
    fn kind(&self) -> VenueKind {
        VenueKind::PerpA
    }

    async fn available_balance(&self) -> Result<f64, AdapterError> {
        let raw = self.module.vault_token_balance(self.collateral_token).await.map_err(|e| AdapterError::Rpc(e.to_string()))?;
        Ok(from_usd_scale(raw))
    }

    async fn open(&self, request: OpenRequest) -> OpenResult {
        let notional = request.input_value * request.leverage;
        if let Err(e) = self.check_limits(&request.token_symbol, request.leverage, notional) {
            return OpenResult { error: Some(e.as_code()), ..Default::default() };
        }

        let mid_price = match self.prices.price(VenueKind::PerpA, &request.token_symbol).await {
            Ok(p) => p,
            Err(e) => return OpenResult { error: Some(e.as_code()), ..Default::default() },
        };

        if let Err(e) = self.collect_protocol_fee().await {
            return OpenResult { error: Some(e.as_code()), ..Default::default() };
        }

        // A single atomic payload via the module's MultiSend batch: (a)
        // wrapped-gas execution fee, (b) collateral transfer, (c) order
        // creation, all to the order vault. A revert partway (e.g. the
        // order vault rejecting the order after collateral already moved)
        // unwinds the whole batch instead of stranding collateral with no
        // order behind it.
        let is_long = matches!(request.side, Side::Long);
        let slippage_mult = self.slippage_bps / 10_000.0;
        let acceptable_price = if is_long {
            mid_price * (1.0 + slippage_mult)
        } else {
            mid_price * (1.0 - slippage_mult)
        };

        let fee_call = IERC20Transfer::transferCall {
            to: self.order_vault_address,
            amount: self.execution_fee_wei,
        };
        let collateral_call = IERC20Transfer::transferCall {
            to: self.order_vault_address,
            amount: to_usd_scale(request.input_value),
        };
        let order = OrderParams {
            market: self.order_vault_address,
            sizeDeltaUsd: alloy::primitives::I256::try_from(to_usd_scale(notional)).unwrap_or_default(),
            collateralDelta: to_usd_scale(request.input_value),
            triggerPrice: U256::ZERO,
            acceptablePrice: to_usd_scale(acceptable_price),
            executionFee: self.execution_fee_wei,
            orderType: ORDER_TYPE_MARKET_INCREASE,
            isLong: is_long,
            shouldUnwrapNativeToken: false,
            referralCode: alloy::primitives::FixedBytes::<32>::ZERO,
        };
        let create_call = IOrderVault::createOrderCall { params: order };

        let batch = vec![
            (self.wrapped_gas_token, U256::ZERO, Bytes::from(alloy::sol_types::SolCall::abi_encode(&fee_call))),
            (self.collateral_token, U256::ZERO, Bytes::from(alloy::sol_types::SolCall::abi_encode(&collateral_call))),
            (self.order_vault_address, U256::ZERO, Bytes::from(alloy::sol_types::SolCall::abi_encode(&create_call))),
        ];

        match self.module.exec_batch_from_module(batch).await {
            Ok(tx_ref) => OpenResult {
                tx_ref: Some(tx_ref),
                amount_out: None,
                entry_price_estimate: Some(mid_price),
                venue_trade_id: None,
                venue_trade_index: None,
                error: None,
            },
            Err(e) => OpenResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() },
        }
    }

    async fn close(&self, request: CloseRequest) -> CloseResult {
        let position = &request.position;
        let is_long = matches!(position.side, Side::Long);
        let mid_price = match self.prices.price(VenueKind::PerpA, &position.token_symbol).await {
            Ok(p) => p,
            Err(e) => return CloseResult { error: Some(e.as_code()), ..Default::default() },
        };
        let slippage_mult = self.slippage_bps / 10_000.0;
        let acceptable_price = if is_long {
            mid_price * (1.0 - slippage_mult)
        } else {
            mid_price * (1.0 + slippage_mult)
        };

        let notional = position.qty * position.entry_price;
        let order = OrderParams {
            market: self.order_vault_address,
            sizeDeltaUsd: alloy::primitives::I256::try_from(to_usd_scale(notional)).unwrap_or_default(),
            collateralDelta: U256::ZERO,
            triggerPrice: U256::ZERO,
            acceptablePrice: to_usd_scale(acceptable_price),
            executionFee: self.execution_fee_wei,
            orderType: ORDER_TYPE_MARKET_DECREASE,
            isLong: is_long,
            shouldUnwrapNativeToken: false,
            referralCode: alloy::primitives::FixedBytes::<32>::ZERO,
        };
        let decrease_call = IOrderVault::createDecreaseOrderCall { params: order };
        let calldata = Bytes::from(alloy::sol_types::SolCall::abi_encode(&decrease_call));

        match self.module.exec_from_module(self.order_vault_address, U256::ZERO, calldata).await {
            Ok(tx_ref) => {
                let pnl = position.unrealized_pnl(mid_price, QtySemantics::AssetUnits);
                CloseResult {
                    tx_ref: Some(tx_ref),
                    exit_price: Some(mid_price),
                    realized_pnl: Some(pnl),
                    error: None,
                }
            }
            Err(e) => CloseResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() },
        }
    }

    async fn list_open_positions(&self, _owner: Address) -> Result<Vec<VenueOpenPosition>, AdapterError> {
        // A full implementation queries the order vault's position reader
        // contract; left for the monitor's orphan-reconciliation pass to
        // treat an empty list conservatively (no forced external closes)
        // until that reader integration lands.
        Ok(Vec::new())
    }

    fn supports_position_listing(&self) -> bool {
        false
    }

    async fn current_price(&self, token_symbol: &str) -> Result<f64, AdapterError> {
        self.prices.price(VenueKind::PerpA, token_symbol).await
    }
}

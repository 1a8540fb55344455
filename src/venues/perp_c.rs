//! PERP-C: leveraged CFD via on-chain delegation. Same delegation model
//! as PERP-B (agent key resolved through KeyStore) but the contract is a
//! delegated on-chain order book rather than an off-chain API: opens
//! submit a pending order and the position is only confirmed-filled once
//! a keeper processes it, and close must reference the venue-assigned
//! trade index or it risks closing the wrong position.
//!
//! Grounded on the base crate's `venues/vault/morpho.rs` `sol!`-interface
//! idiom, adapted from an ERC4626 vault call to a CFD order book, since
//! no teacher file models a delegated (non-vault) on-chain venue.

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::sol;
use async_trait::async_trait;

use crate::model::{QtySemantics, Side, VenueKind};
use crate::signer::KeyStore;
use crate::venues::{
    AdapterError, CloseRequest, CloseResult, OpenRequest, OpenResult, PriceSource, VenueAdapter,
    VenueOpenPosition,
};

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract ICfdOrderBook {
        function openMarketPosition(address trader, bytes32 pairId, bool isLong, uint256 collateral, uint256 leverageBps) external returns (uint256 tradeIndex);
        function closeMarketPosition(address trader, bytes32 pairId, uint256 tradeIndex) external returns (bool success);
        function getOpenTrade(address trader, uint256 tradeIndex) external view returns (uint256 collateral, uint256 openPrice, bool isLong, bool isOpen);
    }
}

pub const MIN_ORDER_VALUE: f64 = 10.0;

pub struct PerpCAdapter {
    rpc_url: String,
    order_book_address: Address,
    key_store: std::sync::Arc<KeyStore>,
    prices: std::sync::Arc<dyn PriceSource>,
}

impl PerpCAdapter {
    pub fn new(
        rpc_url: String,
        order_book_address: Address,
        key_store: std::sync::Arc<KeyStore>,
        prices: std::sync::Arc<dyn PriceSource>,
    ) -> Self {
        PerpCAdapter { rpc_url, order_book_address, key_store, prices }
    }

    fn pair_id(token_symbol: &str) -> alloy::primitives::FixedBytes<32> {
        alloy::primitives::keccak256(token_symbol.as_bytes())
    }

    fn provider_for(&self, signer: alloy::signers::local::PrivateKeySigner) -> anyhow::Result<impl Provider> {
        let wallet = EthereumWallet::from(signer);
        let url: reqwest::Url = self.rpc_url.parse()?;
        Ok(ProviderBuilder::new().wallet(wallet).connect_http(url))
    }

    fn read_provider(&self) -> anyhow::Result<impl Provider> {
        let url: reqwest::Url = self.rpc_url.parse()?;
        Ok(ProviderBuilder::new().connect_http(url))
    }

    /// Scan a bounded window of trade indices for the first one the venue
    /// reports open, for resolving a pending PERP-C position once a keeper
    /// has filled it. There is no indexed "trades by trader" view to
    /// query directly, so the monitor walks from the index last seen for
    /// this trader.
    pub async fn resolve_pending(
        &self,
        trader: Address,
        scan_from: u64,
        scan_count: u64,
    ) -> Result<Option<(u64, f64)>, AdapterError> {
        let provider = self.read_provider().map_err(|e| AdapterError::Rpc(e.to_string()))?;
        let order_book = ICfdOrderBook::new(self.order_book_address, provider);
        for index in scan_from..scan_from + scan_count {
            let trade = order_book
                .getOpenTrade(trader, U256::from(index))
                .call()
                .await
                .map_err(|e| AdapterError::Rpc(e.to_string()))?;
            if trade.isOpen {
                let open_price = trade.openPrice.to::<u128>() as f64 / 1e30;
                return Ok(Some((index, open_price)));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl VenueAdapter for PerpCAdapter {
    fn kind(&self) -> VenueKind {
        VenueKind::PerpC
    }

    async fn open(&self, request: OpenRequest) -> OpenResult {
        if request.input_value < MIN_ORDER_VALUE {
            return OpenResult { error: Some(AdapterError::SizeBelowMinimum.as_code()), ..Default::default() };
        }
        let agent_address = match request.agent_address {
            Some(a) => a,
            None => return OpenResult { error: Some(AdapterError::AgentWalletMissing.as_code()), ..Default::default() },
        };
        let signer = match self.key_store.resolve_signer(agent_address) {
            Ok(s) => s,
            Err(_) => return OpenResult { error: Some(AdapterError::AgentWalletMissing.as_code()), ..Default::default() },
        };
        let trader = signer.address();
        let mid_price = match self.prices.price(VenueKind::PerpC, &request.token_symbol).await {
            Ok(p) => p,
            Err(e) => return OpenResult { error: Some(e.as_code()), ..Default::default() },
        };

        let provider = match self.provider_for(signer) {
            Ok(p) => p,
            Err(e) => return OpenResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() },
        };
        let order_book = ICfdOrderBook::new(self.order_book_address, provider);

        let collateral = U256::from((request.input_value * 1e6) as u128);
        let leverage_bps = U256::from((request.leverage * 10_000.0) as u128);
        let is_long = matches!(request.side, Side::Long);

        match order_book
            .openMarketPosition(trader, Self::pair_id(&request.token_symbol), is_long, collateral, leverage_bps)
            .send()
            .await
        {
            Ok(pending) => {
                let tx_hash = *pending.tx_hash();
                // The trade index is emitted by the venue and is not
                // recoverable from the pending-transaction handle alone;
                // the monitor resolves it (and the confirmed entry price)
                // on its next cycle via `getOpenTrade`.
                OpenResult {
                    tx_ref: Some(format!("{tx_hash:#x}")),
                    amount_out: None,
                    entry_price_estimate: Some(mid_price),
                    venue_trade_id: None,
                    venue_trade_index: None,
                    error: None,
                }
            }
            Err(e) => OpenResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() },
        }
    }

    async fn close(&self, request: CloseRequest) -> CloseResult {
        let position = &request.position;
        let Some(trade_index) = position.venue_trade_index else {
            return CloseResult { error: Some(AdapterError::VenueTradeIndexRequired.as_code()), ..Default::default() };
        };
        let agent_address = match request.agent_address {
            Some(a) => a,
            None => return CloseResult { error: Some(AdapterError::AgentWalletMissing.as_code()), ..Default::default() },
        };
        let signer = match self.key_store.resolve_signer(agent_address) {
            Ok(s) => s,
            Err(_) => return CloseResult { error: Some(AdapterError::AgentWalletMissing.as_code()), ..Default::default() },
        };
        let trader = signer.address();

        let current_price = match self.prices.price(VenueKind::PerpC, &position.token_symbol).await {
            Ok(p) => p,
            Err(e) => return CloseResult { error: Some(e.as_code()), ..Default::default() },
        };

        let provider = match self.provider_for(signer) {
            Ok(p) => p,
            Err(e) => return CloseResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() },
        };
        let order_book = ICfdOrderBook::new(self.order_book_address, provider);

        match order_book
            .closeMarketPosition(trader, Self::pair_id(&position.token_symbol), U256::from(trade_index))
            .send()
            .await
        {
            Ok(pending) => {
                let tx_hash = *pending.tx_hash();
                let pnl = position.unrealized_pnl(current_price, QtySemantics::QuoteCollateral);
                CloseResult {
                    tx_ref: Some(format!("{tx_hash:#x}")),
                    exit_price: Some(current_price),
                    realized_pnl: Some(pnl),
                    error: None,
                }
            }
            Err(e) => CloseResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() },
        }
    }

    async fn list_open_positions(&self, owner: Address) -> Result<Vec<VenueOpenPosition>, AdapterError> {
        // Without an indexed "trades by trader" view on the order book,
        // live discovery must be keyed by a known trade index from the
        // local store; the monitor drives discovery here, not this call.
        let _ = owner;
        Ok(Vec::new())
    }

    fn supports_position_listing(&self) -> bool {
        false
    }

    async fn current_price(&self, token_symbol: &str) -> Result<f64, AdapterError> {
        self.prices.price(VenueKind::PerpC, token_symbol).await
    }
}

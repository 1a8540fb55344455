//! PERP-B: off-chain order book, delegated agent key. The adapter signs
//! as the per-user agent key but targets the user's own account address
//! for balance and position reads. Grounded on the base crate's
//! `venues/perps/hyperliquid.rs` (asset-index metadata cache, IOC market
//! order via slippage-adjusted limit price, fill-status matching).

use std::collections::HashMap;
use std::sync::RwLock;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use ferrofluid::types::OrderRequest;
use ferrofluid::types::responses::{ExchangeDataStatus, ExchangeResponseStatus};
use ferrofluid::{ExchangeProvider, InfoProvider, Network};

use crate::model::{QtySemantics, Side, VenueKind};
use crate::signer::KeyStore;
use crate::venues::{
    AdapterError, CloseRequest, CloseResult, OpenRequest, OpenResult, VenueAdapter,
    VenueOpenPosition,
};

pub const MIN_ORDER_VALUE: f64 = 10.0;
const DEFAULT_SLIPPAGE_BPS: f64 = 100.0;

pub struct PerpBAdapter {
    info: InfoProvider,
    network: Network,
    key_store: std::sync::Arc<KeyStore>,
    asset_indices: RwLock<HashMap<String, u32>>,
    sz_decimals: RwLock<HashMap<String, u32>>,
    slippage_bps: f64,
}

impl PerpBAdapter {
    pub fn new(network: Network, key_store: std::sync::Arc<KeyStore>) -> Self {
        let info = match network {
            Network::Mainnet => InfoProvider::mainnet(),
            Network::Testnet => InfoProvider::testnet(),
        };
        PerpBAdapter {
            info,
            network,
            key_store,
            asset_indices: RwLock::new(HashMap::new()),
            sz_decimals: RwLock::new(HashMap::new()),
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
        }
    }

    fn exchange_for(&self, signer: PrivateKeySigner) -> ExchangeProvider<PrivateKeySigner> {
        match self.network {
            Network::Mainnet => ExchangeProvider::mainnet(signer),
            Network::Testnet => ExchangeProvider::testnet(signer),
        }
    }

    async fn asset_index(&self, coin: &str) -> Result<u32, AdapterError> {
        if let Some(idx) = self.asset_indices.read().unwrap().get(coin) {
            return Ok(*idx);
        }
        let meta = self
            .info
            .meta()
            .await
            .map_err(|e| AdapterError::Rpc(e.to_string()))?;
        let mut indices = self.asset_indices.write().unwrap();
        let mut decimals = self.sz_decimals.write().unwrap();
        for (i, asset) in meta.universe.iter().enumerate() {
            indices.insert(asset.name.clone(), i as u32);
            decimals.insert(asset.name.clone(), asset.sz_decimals);
        }
        indices.get(coin).copied().ok_or(AdapterError::TokenNotRegistered)
    }

    fn format_size(&self, coin: &str, size: f64) -> String {
        let decimals = self.sz_decimals.read().unwrap().get(coin).copied().unwrap_or(3);
        format!("{:.prec$}", size, prec = decimals as usize)
    }

    fn format_price(price: f64) -> String {
        if price == 0.0 {
            return "0".to_string();
        }
        let magnitude = price.abs().log10().floor() as i32;
        let decimals = (4 - magnitude).max(0) as usize;
        format!("{:.prec$}", price, prec = decimals)
    }

    async fn mid_price(&self, coin: &str) -> Result<f64, AdapterError> {
        let mids = self.info.all_mids().await.map_err(|e| AdapterError::Rpc(e.to_string()))?;
        mids.get(coin)
            .and_then(|p| p.parse::<f64>().ok())
            .ok_or(AdapterError::TokenNotRegistered)
    }
}

#[async_trait]
impl VenueAdapter for PerpBAdapter {
    fn kind(&self) -> VenueKind {
        VenueKind::PerpB
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

        let asset = match self.asset_index(&request.token_symbol).await {
            Ok(a) => a,
            Err(e) => return OpenResult { error: Some(e.as_code()), ..Default::default() },
        };
        let mid_price = match self.mid_price(&request.token_symbol).await {
            Ok(p) => p,
            Err(e) => return OpenResult { error: Some(e.as_code()), ..Default::default() },
        };

        let is_buy = matches!(request.side, Side::Long);
        let slippage_mult = self.slippage_bps / 10_000.0;
        let limit_price = if is_buy {
            mid_price * (1.0 + slippage_mult)
        } else {
            mid_price * (1.0 - slippage_mult)
        };
        let notional = request.input_value * request.leverage;
        let size = notional / mid_price;

        let formatted_size = self.format_size(&request.token_symbol, size);
        let formatted_price = Self::format_price(limit_price);
        let order = OrderRequest::limit(asset, is_buy, &formatted_price, &formatted_size, "Ioc");

        let exchange = self.exchange_for(signer);
        match exchange.place_order(&order).await {
            Ok(ExchangeResponseStatus::Ok(resp)) => {
                let mut fill_price = mid_price;
                let mut fill_size = size;
                let mut oid = None;
                if let Some(data) = &resp.data {
                    for status in &data.statuses {
                        match status {
                            ExchangeDataStatus::Filled(fill) => {
                                fill_size = fill.total_sz.parse().unwrap_or(size);
                                fill_price = fill.avg_px.parse().unwrap_or(mid_price);
                                oid = Some(fill.oid);
                            }
                            ExchangeDataStatus::Error(msg) => {
                                return OpenResult { error: Some(AdapterError::VenueRejected(msg.clone()).as_code()), ..Default::default() };
                            }
                            _ => {}
                        }
                    }
                }
                OpenResult {
                    tx_ref: oid.map(|o| o.to_string()),
                    amount_out: Some(fill_size),
                    entry_price_estimate: Some(fill_price),
                    venue_trade_id: oid.map(|o| o.to_string()),
                    venue_trade_index: None,
                    error: None,
                }
            }
            Ok(ExchangeResponseStatus::Err(err)) => {
                OpenResult { error: Some(AdapterError::VenueRejected(err).as_code()), ..Default::default() }
            }
            Err(e) => OpenResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() },
        }
    }

    async fn close(&self, request: CloseRequest) -> CloseResult {
        let position = &request.position;
        let agent_address = match request.agent_address {
            Some(a) => a,
            None => return CloseResult { error: Some(AdapterError::AgentWalletMissing.as_code()), ..Default::default() },
        };
        let signer = match self.key_store.resolve_signer(agent_address) {
            Ok(s) => s,
            Err(_) => return CloseResult { error: Some(AdapterError::AgentWalletMissing.as_code()), ..Default::default() },
        };

        let asset = match self.asset_index(&position.token_symbol).await {
            Ok(a) => a,
            Err(e) => return CloseResult { error: Some(e.as_code()), ..Default::default() },
        };
        let mid_price = match self.mid_price(&position.token_symbol).await {
            Ok(p) => p,
            Err(e) => return CloseResult { error: Some(e.as_code()), ..Default::default() },
        };

        // Closing reverses the entry side.
        let is_buy = !matches!(position.side, Side::Long);
        let slippage_mult = self.slippage_bps / 10_000.0;
        let limit_price = if is_buy {
            mid_price * (1.0 + slippage_mult)
        } else {
            mid_price * (1.0 - slippage_mult)
        };
        let formatted_size = self.format_size(&position.token_symbol, position.qty);
        let formatted_price = Self::format_price(limit_price);
        let order = OrderRequest::limit(asset, is_buy, &formatted_price, &formatted_size, "Ioc");

        let exchange = self.exchange_for(signer);
        match exchange.place_order(&order).await {
            Ok(ExchangeResponseStatus::Ok(resp)) => {
                let mut fill_price = mid_price;
                if let Some(data) = &resp.data {
                    for status in &data.statuses {
                        if let ExchangeDataStatus::Filled(fill) = status {
                            fill_price = fill.avg_px.parse().unwrap_or(mid_price);
                        }
                    }
                }
                let pnl = position.unrealized_pnl(fill_price, QtySemantics::AssetUnits);
                CloseResult {
                    tx_ref: None,
                    exit_price: Some(fill_price),
                    realized_pnl: Some(pnl),
                    error: None,
                }
            }
            Ok(ExchangeResponseStatus::Err(err)) => {
                CloseResult { error: Some(AdapterError::VenueRejected(err).as_code()), ..Default::default() }
            }
            Err(e) => CloseResult { error: Some(AdapterError::Rpc(e.to_string()).as_code()), ..Default::default() },
        }
    }

    async fn list_open_positions(&self, owner: Address) -> Result<Vec<VenueOpenPosition>, AdapterError> {
        let state = self
            .info
            .user_state(owner)
            .await
            .map_err(|e| AdapterError::Rpc(e.to_string()))?;
        let mids = self.info.all_mids().await.map_err(|e| AdapterError::Rpc(e.to_string()))?;

        let positions = state
            .asset_positions
            .iter()
            .filter_map(|p| {
                let qty: f64 = p.position.szi.parse().ok()?;
                if qty == 0.0 {
                    return None;
                }
                let current_price = mids
                    .get(&p.position.coin)
                    .and_then(|px| px.parse::<f64>().ok())
                    .unwrap_or(0.0);
                Some(VenueOpenPosition {
                    venue_trade_id: None,
                    venue_trade_index: None,
                    token_symbol: p.position.coin.clone(),
                    side: if qty >= 0.0 { Side::Long } else { Side::Short },
                    qty: qty.abs(),
                    current_price,
                })
            })
            .collect();
        Ok(positions)
    }

    async fn current_price(&self, token_symbol: &str) -> Result<f64, AdapterError> {
        self.mid_price(token_symbol).await
    }

    /// Pulls the full tradeable-asset universe and upserts one
    /// `VenueMarket` per coin, `max_leverage` from the venue's own
    /// metadata and `min_position` fixed at `MIN_ORDER_VALUE`.
    async fn sync_markets(&self, repo: &crate::repo::Repo) -> Result<u32, AdapterError> {
        let meta = self.info.meta().await.map_err(|e| AdapterError::Rpc(e.to_string()))?;
        let mut synced = 0u32;
        for asset in &meta.universe {
            let market = crate::model::VenueMarket {
                venue: VenueKind::PerpB,
                token_symbol: asset.name.clone(),
                market_ref: asset.name.clone(),
                is_active: true,
                min_position: MIN_ORDER_VALUE,
                max_leverage: asset.max_leverage as f64,
            };
            repo.upsert_venue_market(&market).await.map_err(|e| AdapterError::Rpc(e.to_string()))?;
            synced += 1;
        }
        Ok(synced)
    }

    async fn recent_closed_fill(
        &self,
        owner: Address,
        token_symbol: &str,
    ) -> Result<Option<crate::venues::ClosedFill>, AdapterError> {
        let fills = self.info.user_fills(owner).await.map_err(|e| AdapterError::Rpc(e.to_string()))?;
        let recent = fills
            .iter()
            .filter(|f| f.coin == token_symbol)
            .filter_map(|f| {
                let pnl: f64 = f.closed_pnl.parse().ok()?;
                if pnl == 0.0 {
                    return None;
                }
                let price: f64 = f.px.parse().ok()?;
                Some((f.time, price, pnl))
            })
            .max_by_key(|(time, _, _)| *time);
        Ok(recent.map(|(_, exit_price, pnl)| crate::venues::ClosedFill { exit_price, pnl }))
    }
}

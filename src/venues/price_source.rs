//! On-chain aggregator `PriceSource` for SPOT/PERP-A/PERP-C (all
//! EVM-resident venues). PERP-B reads its own mid price straight off
//! `InfoProvider` and never goes through this type.
//!
//! Grounded on the base crate's `vault/morpho.rs` `sol!`-interface
//! pattern (a tiny read-only ABI, a fresh `ProviderBuilder` per call —
//! these are infrequent, latency-tolerant reads, not hot-path
//! transactions) and on `repo/markets.rs`'s `VenueMarket.market_ref`,
//! reused here as the per-(venue, token) aggregator contract address.

use std::collections::HashMap;

use alloy::primitives::Address;
use alloy::providers::ProviderBuilder;
use alloy::sol;
use async_trait::async_trait;

use crate::model::VenueKind;
use crate::repo::Repo;
use crate::venues::{AdapterError, PriceSource};

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract IPriceAggregator {
        function latestAnswer() external view returns (int256);
        function decimals() external view returns (uint8);
    }
}

/// Reads a Chainlink-style `latestAnswer()/decimals()` feed whose address
/// is the venue market's `market_ref`. One RPC endpoint per venue, since
/// SPOT/PERP-A/PERP-C may each live on a different chain.
pub struct AggregatorPriceSource {
    rpc_urls: HashMap<VenueKind, String>,
    repo: Repo,
}

impl AggregatorPriceSource {
    pub fn new(rpc_urls: HashMap<VenueKind, String>, repo: Repo) -> Self {
        AggregatorPriceSource { rpc_urls, repo }
    }

    async fn feed_address(&self, venue: VenueKind, token_symbol: &str) -> Result<Address, AdapterError> {
        let markets = self
            .repo
            .list_markets_for_venue(venue)
            .await
            .map_err(|e| AdapterError::Rpc(e.to_string()))?;
        let market = markets
            .into_iter()
            .find(|m| m.token_symbol == token_symbol && m.is_active)
            .ok_or(AdapterError::TokenNotRegistered)?;
        market.market_ref.parse().map_err(|_| AdapterError::TokenNotRegistered)
    }
}

#[async_trait]
impl PriceSource for AggregatorPriceSource {
    async fn price(&self, venue: VenueKind, token_symbol: &str) -> Result<f64, AdapterError> {
        let rpc_url = self.rpc_urls.get(&venue).ok_or(AdapterError::MarketInactive)?;
        let feed = self.feed_address(venue, token_symbol).await?;

        let url: reqwest::Url = rpc_url.parse().map_err(|_| AdapterError::Rpc(format!("invalid rpc url: {rpc_url}")))?;
        let provider = ProviderBuilder::new().connect_http(url);
        let aggregator = IPriceAggregator::new(feed, provider);

        let answer = aggregator
            .latestAnswer()
            .call()
            .await
            .map_err(|e| AdapterError::Rpc(e.to_string()))?;
        let decimals = aggregator
            .decimals()
            .call()
            .await
            .map_err(|e| AdapterError::Rpc(e.to_string()))?;

        let raw: i128 = answer.try_into().map_err(|_| AdapterError::Rpc("aggregator answer overflow".into()))?;
        Ok(raw as f64 / 10f64.powi(decimals as i32))
    }
}

//! Venue Adapters: one implementation per execution venue, behind a
//! single trait so the executor and monitor never branch on venue kind.
//!
//! Grounded on the base crate's `Venue` trait (execute/total_value/tick/
//! unwind) — kept as "one trait, several implementations, a thin shared
//! result enum" but re-shaped around open/close/list/price instead of a
//! tick-driven backtest loop, since live venues are called on demand, not
//! stepped through simulated time.

pub mod module_service;
pub mod perp_a;
pub mod perp_b;
pub mod perp_c;
pub mod price_source;
pub mod spot;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Position, Side, VenueKind};

/// Errors an adapter can surface to the executor. Variants carry the
/// exact wording the admin surface and monitor match against.
#[derive(Debug, Error, Clone)]
pub enum AdapterError {
    #[error("agent-wallet-missing")]
    AgentWalletMissing,
    #[error("market-inactive")]
    MarketInactive,
    #[error("insufficient-funds")]
    InsufficientFunds,
    #[error("below-minimum")]
    SizeBelowMinimum,
    #[error("token-not-registered")]
    TokenNotRegistered,
    #[error("venue-trade-index-required")]
    VenueTradeIndexRequired,
    #[error("rpc-error: {0}")]
    Rpc(String),
    #[error("venue-rejected: {0}")]
    VenueRejected(String),
}

impl AdapterError {
    pub fn as_code(&self) -> String {
        match self {
            AdapterError::AgentWalletMissing => "agent-wallet-missing".into(),
            AdapterError::MarketInactive => "market-inactive".into(),
            AdapterError::InsufficientFunds => "insufficient-funds".into(),
            AdapterError::SizeBelowMinimum => "below-minimum".into(),
            AdapterError::TokenNotRegistered => "token-not-registered".into(),
            AdapterError::VenueTradeIndexRequired => "venue-trade-index-required".into(),
            AdapterError::Rpc(msg) => format!("rpc-error: {msg}"),
            AdapterError::VenueRejected(msg) => format!("venue-rejected: {msg}"),
        }
    }
}

/// Everything an adapter needs to open a position.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub token_symbol: String,
    pub side: Side,
    pub input_value: f64,
    pub leverage: f64,
    pub agent_address: Option<alloy::primitives::Address>,
}

/// Result of a successful or partially-successful open call.
#[derive(Debug, Clone, Default)]
pub struct OpenResult {
    pub tx_ref: Option<String>,
    pub amount_out: Option<f64>,
    pub entry_price_estimate: Option<f64>,
    pub venue_trade_id: Option<String>,
    pub venue_trade_index: Option<u64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CloseRequest {
    pub position: Position,
    pub agent_address: Option<alloy::primitives::Address>,
}

#[derive(Debug, Clone, Default)]
pub struct CloseResult {
    pub tx_ref: Option<String>,
    pub exit_price: Option<f64>,
    pub realized_pnl: Option<f64>,
    pub error: Option<String>,
}

/// What the monitor's reconciliation pass sees venue-side: positions the
/// venue itself still considers open, independent of the local store.
#[derive(Debug, Clone)]
pub struct VenueOpenPosition {
    pub venue_trade_id: Option<String>,
    pub venue_trade_index: Option<u64>,
    pub token_symbol: String,
    pub side: Side,
    pub qty: f64,
    pub current_price: f64,
}

/// A venue's most recent closing fill for a token, used by orphan
/// reconciliation to recover precise exit price / P&L for a position the
/// venue no longer reports open.
#[derive(Debug, Clone, Copy)]
pub struct ClosedFill {
    pub exit_price: f64,
    pub pnl: f64,
}

/// The contract every venue implements. Adapters are long-lived (one per
/// venue per process) and stateless across calls beyond cached metadata —
/// all durable state lives in the Repo.
#[async_trait]
pub trait VenueAdapter: Send + Sync {
    fn kind(&self) -> VenueKind;

    /// One-time per-venue metadata load (asset indices, module addresses,
    /// capital tracking init). Adapters that need no setup no-op.
    async fn setup(&self) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn open(&self, request: OpenRequest) -> OpenResult;

    async fn close(&self, request: CloseRequest) -> CloseResult;

    /// Positions the venue itself reports open, for orphan reconciliation.
    async fn list_open_positions(
        &self,
        owner: alloy::primitives::Address,
    ) -> Result<Vec<VenueOpenPosition>, AdapterError>;

    async fn current_price(&self, token_symbol: &str) -> Result<f64, AdapterError>;

    /// Most recent closing fill for `token_symbol` on `owner`'s account,
    /// for orphan reconciliation to recover exit price/P&L. Venues with
    /// no historical-fills API return `Ok(None)`; the monitor falls back
    /// to `exit_price = entry_price, pnl = 0` in that case.
    async fn recent_closed_fill(
        &self,
        _owner: alloy::primitives::Address,
        _token_symbol: &str,
    ) -> Result<Option<ClosedFill>, AdapterError> {
        Ok(None)
    }

    /// Whether `list_open_positions` reflects real venue truth. A venue
    /// whose position reader isn't wired up yet must return `false` here
    /// rather than let the monitor treat its always-empty list as "every
    /// local position was closed externally".
    fn supports_position_listing(&self) -> bool {
        true
    }

    /// Refresh this venue's tradeable-market listing into the Repo
    /// (`/admin/sync-venue-markets`). Returns the number of markets
    /// upserted. Venues with no market-discovery API no-op; their
    /// markets are seeded once by an operator via `upsert_venue_market`
    /// instead.
    async fn sync_markets(&self, _repo: &crate::repo::Repo) -> Result<u32, AdapterError> {
        Ok(0)
    }

    /// Collateral-asset units available to size a `balance-percentage`
    /// (or balance-checked `fixed-usdc`) signal against, in the venue's
    /// own collateral asset. Venues with no wired balance read return
    /// `f64::INFINITY`, i.e. impose no balance ceiling pre-trade.
    async fn available_balance(&self) -> Result<f64, AdapterError> {
        Ok(f64::INFINITY)
    }
}

/// Abstracts "give me the current price of a token" independent of which
/// venue is asked, for the monitor's single-read-per-cycle price cache.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn price(&self, venue: VenueKind, token_symbol: &str) -> Result<f64, AdapterError>;
}

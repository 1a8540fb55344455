use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The four execution venues the coordinator knows how to route to.
///
/// `Multi` is a signal-only marker: it means "let the router pick one of
/// the deployment's `enabled_venues`" and is never the venue stored on a
/// Position (the router rewrites the signal's venue before execution).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VenueKind {
    Spot,
    PerpA,
    PerpB,
    PerpC,
    Multi,
}

impl VenueKind {
    /// Whether this venue trades through the vault's smart-contract module
    /// (executor-signed) rather than a per-user delegated key.
    pub fn is_vault_mediated(self) -> bool {
        matches!(self, VenueKind::Spot | VenueKind::PerpA)
    }

    /// Whether this venue trades through a per-user delegated agent key.
    pub fn is_delegated(self) -> bool {
        matches!(self, VenueKind::PerpB | VenueKind::PerpC)
    }

    /// How `qty` on a Position at this venue should be interpreted by the
    /// trailing-stop / P&L math. Declared explicitly per venue rather than
    /// inferred, since venues disagree on whether a position's size is
    /// asset units or quote collateral.
    pub fn qty_semantics(self) -> QtySemantics {
        match self {
            VenueKind::Spot | VenueKind::PerpA | VenueKind::PerpB => QtySemantics::AssetUnits,
            // PERP-C (leveraged CFD) reports position size as collateral-in-quote,
            // not units of the underlying asset.
            VenueKind::PerpC => QtySemantics::QuoteCollateral,
            VenueKind::Multi => QtySemantics::AssetUnits,
        }
    }

    /// Per-venue minimum order size, in collateral-asset units (spot) or
    /// quote-currency units (perps).
    pub fn min_size(self) -> f64 {
        match self {
            VenueKind::Spot => 0.1,
            VenueKind::PerpA => 0.0, // bounded instead by the hard security ceilings
            VenueKind::PerpB => 10.0,
            VenueKind::PerpC => 10.0,
            VenueKind::Multi => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VenueKind::Spot => "SPOT",
            VenueKind::PerpA => "PERP_A",
            VenueKind::PerpB => "PERP_B",
            VenueKind::PerpC => "PERP_C",
            VenueKind::Multi => "MULTI",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SPOT" => Some(VenueKind::Spot),
            "PERP_A" => Some(VenueKind::PerpA),
            "PERP_B" => Some(VenueKind::PerpB),
            "PERP_C" => Some(VenueKind::PerpC),
            "MULTI" => Some(VenueKind::Multi),
            _ => None,
        }
    }
}

impl std::fmt::Display for VenueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How `Position.qty` should be read by downstream math. See
/// `VenueKind::qty_semantics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum QtySemantics {
    /// qty is denominated in units of the traded asset (e.g. ETH).
    AssetUnits,
    /// qty is denominated in quote-currency collateral (e.g. USD).
    QuoteCollateral,
}

/// A tradeable (venue, token) pair, refreshed by market sync and read-only
/// to the executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueMarket {
    pub venue: VenueKind,
    pub token_symbol: String,
    pub market_ref: String,
    pub is_active: bool,
    pub min_position: f64,
    pub max_leverage: f64,
}

/// Read-only (chain, token_symbol) → on-chain address/decimals lookup used
/// by the spot venue's pre-trade validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRegistryEntry {
    pub chain: String,
    pub token_symbol: String,
    pub address: String,
    pub decimals: u8,
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::signal::Side;
use super::venue::VenueKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionStatus {
    Open,
    Closing,
    Closed,
}

/// Trailing-stop bookkeeping for a single position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrailingParams {
    pub enabled: bool,
    pub trailing_percent: f64,
    pub highest_price: Option<f64>,
    pub lowest_price: Option<f64>,
}

/// Why a position was closed. Names are stable strings so they round-trip
/// through logs/HTTP unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ExitReason {
    HardStopLoss,
    TrailingStop,
    ManualClose,
    ClosedExternally,
    ClosedExternallyWithPnl,
}

impl std::fmt::Display for ExitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExitReason::HardStopLoss => "HARD_STOP_LOSS",
            ExitReason::TrailingStop => "TRAILING_STOP",
            ExitReason::ManualClose => "MANUAL_CLOSE",
            ExitReason::ClosedExternally => "closed_externally",
            ExitReason::ClosedExternallyWithPnl => "closed_externally_with_pnl",
        };
        write!(f, "{s}")
    }
}

/// One trade position, created by the executor and mutated by the monitor
/// until it reaches the terminal CLOSED state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub deployment_id: String,
    pub signal_id: String,
    pub venue: VenueKind,
    /// Stripped of any `_MANUAL_` tag.
    pub token_symbol: String,
    pub side: Side,
    pub entry_price: f64,
    pub qty: f64,
    pub entry_tx_ref: String,
    pub opened_at: i64,
    pub status: PositionStatus,
    pub closed_at: Option<i64>,
    pub exit_price: Option<f64>,
    pub exit_tx_ref: Option<String>,
    pub pnl: Option<f64>,
    pub exit_reason: Option<ExitReason>,
    pub trailing: TrailingParams,
    /// Returned by PERP-A's order creation; needed to track fills.
    pub venue_trade_id: Option<String>,
    /// PERP-C close MUST use this index, or the adapter closes the wrong
    /// position.
    pub venue_trade_index: Option<u64>,
}

impl Position {
    pub fn is_terminal(&self) -> bool {
        self.status == PositionStatus::Closed
    }

    /// Unrealized P&L in collateral units, given a current price and the
    /// venue's qty semantics.
    pub fn unrealized_pnl(&self, current_price: f64, qty_semantics: super::venue::QtySemantics) -> f64 {
        use super::venue::QtySemantics::*;
        let sign = match self.side {
            Side::Long => 1.0,
            Side::Short => -1.0,
        };
        match qty_semantics {
            AssetUnits => sign * self.qty * (current_price - self.entry_price),
            QuoteCollateral => {
                if self.entry_price <= 0.0 {
                    0.0
                } else {
                    sign * self.qty * (current_price - self.entry_price) / self.entry_price
                }
            }
        }
    }
}

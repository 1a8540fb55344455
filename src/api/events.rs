use serde::Serialize;

/// Cycle-level events the monitor and executor broadcast for the admin
/// SSE stream. One sender shared across the process; a lagging subscriber
/// drops old events rather than blocking producers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum EngineEvent {
    PositionOpened {
        position_id: String,
        deployment_id: String,
        venue: String,
        token_symbol: String,
        entry_price: f64,
    },
    PositionClosed {
        position_id: String,
        deployment_id: String,
        exit_reason: String,
        pnl: f64,
    },
    PositionDiscovered {
        position_id: String,
        deployment_id: String,
        venue: String,
        token_symbol: String,
    },
    PositionReconciled {
        position_id: String,
        deployment_id: String,
        exit_reason: String,
    },
    MonitorCycleCompleted {
        deployments_scanned: u32,
        positions_evaluated: u32,
    },
    Error {
        position_id: Option<String>,
        message: String,
    },
    Stopped {
        reason: String,
    },
}

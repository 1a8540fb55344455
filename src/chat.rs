//! Chat surface entry points. The conversational agent that classifies
//! user intent and calls these is out of scope here; this module is the
//! two calls it's allowed to make into the core: manual trade
//! confirmation and manual close.
//!
//! Grounded on the base crate's thin CLI-to-engine wrapper shape in
//! `cli.rs` (parse args, delegate to one engine call, format the
//! result) — here the "args" are already-resolved IDs from the upstream
//! classifier, and the result is handed back as the same
//! `ExecutionResult` the HTTP admin surface returns.

use crate::executor::{Executor, ExecutionResult};
use crate::model::{Signal, SizeModel};

/// Manual confirmation of a specific signal against a specific
/// deployment. Distinct from `Executor::execute`'s auto mode (which
/// picks the newest eligible deployment) in that the caller already
/// knows which deployment the user confirmed.
pub async fn execute_signal_for_deployment(
    executor: &Executor,
    signal_id: &str,
    deployment_id: &str,
) -> ExecutionResult {
    executor.execute(signal_id, Some(deployment_id)).await
}

pub async fn close_position(executor: &Executor, position_id: &str) -> ExecutionResult {
    executor.close_position(position_id).await
}

/// Builds the manually-tagged signal a chat-initiated trade stores,
/// appending `_MANUAL_<epoch_ms>` to `token_symbol` so it bypasses the
/// upstream bucket-deduplication window that auto signals go through.
pub fn build_manual_signal(
    agent_id: &str,
    venue: crate::model::VenueKind,
    token_symbol: &str,
    side: crate::model::signal::Side,
    size_model: SizeModel,
    risk_model: crate::model::RiskModel,
    now_epoch_ms: u64,
) -> Signal {
    Signal {
        id: uuid::Uuid::new_v4().to_string(),
        agent_id: agent_id.to_string(),
        venue,
        token_symbol: crate::model::tag_manual(token_symbol, now_epoch_ms),
        side,
        size_model,
        risk_model,
        source_ref: vec!["MANUAL".to_string()],
        created_at: now_epoch_ms as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VenueKind;

    #[test]
    fn manual_signal_carries_the_tag() {
        let signal = build_manual_signal(
            "agent-1",
            VenueKind::Spot,
            "WETH",
            crate::model::signal::Side::Long,
            SizeModel::FixedUsdc { value: 100.0 },
            crate::model::RiskModel::default(),
            1_700_000_000_000,
        );
        assert!(signal.is_manual());
        assert_eq!(signal.stripped_token(), "WETH");
    }
}

//! Trade Executor: signal -> pre-trade validation -> venue selection ->
//! venue-specific trade sequence -> Position row.
//!
//! Grounded on the base crate's `run/executor/mod.rs` dispatch-by-key
//! idiom (`HashMap<NodeId, Box<dyn VenueExecutor>>`), generalized from
//! "one executor per workflow node" to "one adapter per venue kind,
//! looked up per signal".

pub mod fees;
pub mod router;
pub mod validation;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{
    BillingEvent, BillingKind, Deployment, Position, PositionStatus, Signal, VenueKind,
};
use crate::repo::{PositionUpsertOutcome, Repo};
use crate::venues::{CloseRequest, OpenRequest, VenueAdapter};

pub use fees::{FeeModel, FeePolicy};
pub use router::route_venue;
pub use validation::{validate_pretrade, ValidationOutcome};

/// The outcome of `execute`/`close_position`. `error` is terminal;
/// `reason` is a structured diagnostic; `message` marks an idempotent
/// "already done" success.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub position_id: Option<String>,
    pub tx_ref: Option<String>,
    pub error: Option<String>,
    pub reason: Option<String>,
    pub message: Option<String>,
    pub execution_summary: Option<String>,
}

impl ExecutionResult {
    fn ok(position_id: String, tx_ref: Option<String>) -> Self {
        ExecutionResult { success: true, position_id: Some(position_id), tx_ref, ..Default::default() }
    }

    fn already(message: &str, position_id: String) -> Self {
        ExecutionResult {
            success: true,
            position_id: Some(position_id),
            message: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn error(error: impl Into<String>) -> Self {
        ExecutionResult { success: false, error: Some(error.into()), ..Default::default() }
    }

    fn rejected(reason: impl Into<String>) -> Self {
        ExecutionResult { success: false, reason: Some(reason.into()), ..Default::default() }
    }
}

/// Everything the executor needs that isn't carried on the signal itself.
pub struct Executor {
    repo: Repo,
    adapters: HashMap<VenueKind, Arc<dyn VenueAdapter>>,
    fee_policy: FeePolicy,
}

impl Executor {
    pub fn new(repo: Repo, adapters: HashMap<VenueKind, Arc<dyn VenueAdapter>>, fee_policy: FeePolicy) -> Self {
        Executor { repo, adapters, fee_policy }
    }

    fn adapter_for(&self, venue: VenueKind) -> Option<Arc<dyn VenueAdapter>> {
        self.adapters.get(&venue).cloned()
    }

    /// Exposes the same venue lookup `execute`/`close_position` use
    /// internally, for the admin `/admin/sync-venue-markets` handler.
    pub fn adapter_for_admin(&self, venue: VenueKind) -> Option<Arc<dyn VenueAdapter>> {
        self.adapter_for(venue)
    }

    /// Auto mode (no `deployment_id`): picks the newest eligible ACTIVE
    /// deployment for the signal's agent. Explicit mode targets one
    /// deployment directly (manual chat confirmation).
    pub async fn execute(&self, signal_id: &str, deployment_id: Option<&str>) -> ExecutionResult {
        let mut signal = match self.repo.get_signal(signal_id).await {
            Ok(Some(s)) => s,
            Ok(None) => return ExecutionResult::error("signal-not-found"),
            Err(e) => return ExecutionResult::error(format!("repo-error: {e}")),
        };

        let deployment = match deployment_id {
            Some(id) => match self.repo.get_deployment(id).await {
                Ok(Some(d)) => d,
                Ok(None) => return ExecutionResult::error("deployment-not-found"),
                Err(e) => return ExecutionResult::error(format!("repo-error: {e}")),
            },
            None => match self.repo.newest_active_deployment_for_agent(&signal.agent_id).await {
                Ok(Some(d)) => d,
                Ok(None) => return ExecutionResult::error("no-eligible-deployment"),
                Err(e) => return ExecutionResult::error(format!("repo-error: {e}")),
            },
        };

        if !deployment.is_eligible() {
            return ExecutionResult::rejected("deployment-not-eligible");
        }

        self.execute_for_deployment(&mut signal, &deployment).await
    }

    async fn execute_for_deployment(&self, signal: &mut Signal, deployment: &Deployment) -> ExecutionResult {
        let venue = match route_venue(signal, deployment, &self.repo).await {
            Ok(v) => v,
            Err(reason) => return ExecutionResult::rejected(reason),
        };
        if venue != signal.venue {
            signal.venue = venue;
            if let Err(e) = self.repo.set_signal_venue(&signal.id, venue).await {
                return ExecutionResult::error(format!("repo-error: {e}"));
            }
        }

        let Some(adapter) = self.adapter_for(venue) else {
            return ExecutionResult::rejected("market-unavailable");
        };

        let validated = match validate_pretrade(signal, deployment, venue, &self.repo, adapter.as_ref()).await {
            Ok(v) => v,
            Err(reason) => return ExecutionResult::rejected(reason),
        };

        if let Err(e) = adapter.setup().await {
            return ExecutionResult::error(e.as_code());
        }

        let agent_address = self.repo.get_agent_address(&deployment.user_wallet, venue).await.ok().flatten();

        let open_result = adapter
            .open(OpenRequest {
                token_symbol: signal.stripped_token().to_string(),
                side: signal.side,
                input_value: validated.size,
                leverage: signal.risk_model.leverage,
                agent_address,
            })
            .await;

        if let Some(err) = open_result.error {
            return ExecutionResult::error(err);
        }

        let entry_price = open_result.entry_price_estimate.unwrap_or(0.0);
        let qty = open_result
            .amount_out
            .unwrap_or_else(|| if entry_price > 0.0 { validated.size / entry_price } else { 0.0 });

        if qty <= 0.0 {
            return ExecutionResult::error("structural-error: qty must be > 0");
        }

        let position = Position {
            id: uuid::Uuid::new_v4().to_string(),
            deployment_id: deployment.id.clone(),
            signal_id: signal.id.clone(),
            venue,
            token_symbol: signal.stripped_token().to_string(),
            side: signal.side,
            entry_price,
            qty,
            entry_tx_ref: open_result.tx_ref.clone().unwrap_or_default(),
            opened_at: now_epoch_ms(),
            status: PositionStatus::Open,
            closed_at: None,
            exit_price: None,
            exit_tx_ref: None,
            pnl: None,
            exit_reason: None,
            trailing: crate::model::TrailingParams {
                enabled: true,
                trailing_percent: signal.risk_model.trailing_percent,
                highest_price: None,
                lowest_price: None,
            },
            venue_trade_id: open_result.venue_trade_id,
            venue_trade_index: open_result.venue_trade_index,
        };

        match self.repo.insert_position_if_absent(position).await {
            Ok(PositionUpsertOutcome::Created(created)) => ExecutionResult::ok(created.id, open_result.tx_ref),
            Ok(PositionUpsertOutcome::AlreadyExists(existing)) => {
                ExecutionResult::already("already executed", existing.id)
            }
            Err(e) => ExecutionResult::error(format!("repo-error: {e}")),
        }
    }

    /// Idempotent close: already-closed positions succeed trivially;
    /// concurrent closers race on the OPEN->CLOSING CAS.
    pub async fn close_position(&self, position_id: &str) -> ExecutionResult {
        let position = match self.repo.get_position(position_id).await {
            Ok(Some(p)) => p,
            Ok(None) => return ExecutionResult::error("position-not-found"),
            Err(e) => return ExecutionResult::error(format!("repo-error: {e}")),
        };

        if position.is_terminal() {
            return ExecutionResult::already("already closed", position.id);
        }

        let won_cas = match self.repo.try_mark_closing(&position.id).await {
            Ok(won) => won,
            Err(e) => return ExecutionResult::error(format!("repo-error: {e}")),
        };
        if !won_cas {
            return ExecutionResult::already("already processed", position.id);
        }

        let Some(adapter) = self.adapter_for(position.venue) else {
            let _ = self.repo.revert_to_open(&position.id).await;
            return ExecutionResult::rejected("market-unavailable");
        };

        let deployment = match self.repo.get_deployment(&position.deployment_id).await {
            Ok(Some(d)) => d,
            _ => {
                let _ = self.repo.revert_to_open(&position.id).await;
                return ExecutionResult::error("deployment-not-found");
            }
        };
        let agent_address = self.repo.get_agent_address(&deployment.user_wallet, position.venue).await.ok().flatten();

        // Pre-flight: for delegated venues whose adapter can actually list
        // venue truth, absence from that listing means the position was
        // already closed externally. Venues that can't list positions
        // (`supports_position_listing() == false`) always report an empty
        // list, so this check must stay gated on that capability the same
        // way `monitor/mod.rs` gates its own reconciliation on it — else
        // every such venue's position looks externally-closed before
        // `adapter.close()` is ever called.
        if position.venue.is_delegated() && adapter.supports_position_listing() {
            if let Some(agent) = agent_address {
                if let Ok(open_positions) = adapter.list_open_positions(agent).await {
                    let still_open = open_positions.iter().any(|p| {
                        position
                            .venue_trade_index
                            .zip(p.venue_trade_index)
                            .map(|(a, b)| a == b)
                            .unwrap_or_else(|| p.token_symbol == position.token_symbol)
                    });
                    if !still_open {
                        return self.finalize_closed_externally(&position, agent_address, adapter.as_ref()).await;
                    }
                }
            }
        }

        let close_result = adapter
            .close(CloseRequest { position: position.clone(), agent_address })
            .await;

        if let Some(err) = close_result.error {
            if err.contains("already closed") || err.contains("closed_externally") {
                return self.finalize_closed_externally(&position, agent_address, adapter.as_ref()).await;
            }
            let _ = self.repo.revert_to_open(&position.id).await;
            return ExecutionResult::error(err);
        }

        let exit_price = close_result.exit_price.unwrap_or(position.entry_price);
        let pnl = close_result.realized_pnl.unwrap_or(0.0);

        if pnl > 0.0 {
            self.distribute_profit_share(&deployment, &position, pnl).await;
        }

        match self
            .repo
            .finalize_close(
                &position.id,
                now_epoch_ms(),
                exit_price,
                close_result.tx_ref.as_deref().unwrap_or(""),
                pnl,
                crate::model::position::ExitReason::ManualClose,
                position.qty,
            )
            .await
        {
            Ok(()) => ExecutionResult::ok(position.id, close_result.tx_ref),
            Err(e) => ExecutionResult::error(format!("repo-error: {e}")),
        }
    }

    /// Recovers precise exit price/P&L via `recent_closed_fill` where the
    /// adapter exposes a historical-fills API, the same recovery
    /// `monitor::reconcile_orphans` performs; otherwise marks closed at
    /// zero P&L.
    async fn finalize_closed_externally(
        &self,
        position: &Position,
        agent_address: Option<alloy::primitives::Address>,
        adapter: &dyn VenueAdapter,
    ) -> ExecutionResult {
        let closed_fill = match agent_address {
            Some(addr) => adapter.recent_closed_fill(addr, &position.token_symbol).await.ok().flatten(),
            None => None,
        };
        let (exit_price, pnl, reason) = match closed_fill {
            Some(fill) => (fill.exit_price, fill.pnl, crate::model::position::ExitReason::ClosedExternallyWithPnl),
            None => (position.entry_price, 0.0, crate::model::position::ExitReason::ClosedExternally),
        };

        match self.repo.finalize_close(&position.id, now_epoch_ms(), exit_price, "", pnl, reason, position.qty).await {
            Ok(()) => ExecutionResult::already("already closed", position.id.clone()),
            Err(e) => ExecutionResult::error(format!("repo-error: {e}")),
        }
    }

    /// Records the 20% creator profit share as a BillingEvent. The
    /// on-chain/off-chain transfer itself rides along with the adapter's
    /// close sequence (vault module call or venue-account transfer); this
    /// records the accounting side once the close has already landed.
    async fn distribute_profit_share(&self, deployment: &Deployment, position: &Position, pnl: f64) {
        let share = self.fee_policy.compute(position.venue, pnl);
        if share <= 0.0 {
            return;
        }
        let event = BillingEvent {
            id: uuid::Uuid::new_v4().to_string(),
            deployment_id: deployment.id.clone(),
            kind: BillingKind::ProfitShare,
            amount: share,
            asset: "USDC".to_string(),
            occurred_at: now_epoch_ms(),
        };
        let _ = self.repo.insert_billing_event(&event).await;
    }
}

fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

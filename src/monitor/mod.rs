//! Position Monitor: a single-threaded cooperative loop, scheduled every
//! ~30s, that discovers positions across venues, evaluates the
//! trailing-stop/hard-stop state machine, triggers closes, and reconciles
//! positions the venue no longer reports open.
//!
//! Grounded on the base crate's `run::run_async` daemon loop (tick,
//! sleep, repeat under a `ctrlc`-driven shutdown signal) generalized from
//! "step one simulated tick" to "reconcile one (deployment, venue) pair
//! against live venue truth", and on `run/registry.rs` for the
//! process-singleton lock acquired once for the whole loop's lifetime.

pub mod reconcile;
pub mod trailing;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use anyhow::{Context, Result};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use crate::api::events::EngineEvent;
use crate::model::position::ExitReason;
use crate::model::{Deployment, Position, PositionStatus, Signal, VenueKind};
use crate::repo::Repo;
use crate::singleton::MonitorLock;
use crate::venues::perp_c::PerpCAdapter;
use crate::venues::{CloseRequest, VenueAdapter};

const CYCLE_INTERVAL: Duration = Duration::from_secs(30);
const VENUES: [VenueKind; 4] = [VenueKind::Spot, VenueKind::PerpA, VenueKind::PerpB, VenueKind::PerpC];
/// Window scanned per cycle to resolve a PERP-C pending fill. There's no
/// indexed "trades by trader" view, so every pending position costs one
/// venue call per index in this window until the keeper fills it.
const PERP_C_SCAN_WINDOW: u64 = 50;

pub struct Monitor {
    repo: Repo,
    adapters: HashMap<VenueKind, Arc<dyn VenueAdapter>>,
    /// Held separately from `adapters` for the one PERP-C-specific
    /// operation (`resolve_pending`) that has no trait-level equivalent.
    perp_c: Option<Arc<PerpCAdapter>>,
    event_tx: broadcast::Sender<EngineEvent>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CycleSummary {
    pub deployments_scanned: u32,
    pub positions_evaluated: u32,
}

impl Monitor {
    pub fn new(
        repo: Repo,
        adapters: HashMap<VenueKind, Arc<dyn VenueAdapter>>,
        perp_c: Option<Arc<PerpCAdapter>>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Monitor { repo, adapters, perp_c, event_tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Runs the cycle loop until `shutdown` reports `true`. Acquires the
    /// process singleton lock once up front; a second monitor process
    /// started against the same lock path fails immediately.
    pub async fn run_forever(&self, lock_path: &Path, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let lock = MonitorLock::acquire(lock_path).context("acquiring monitor singleton lock")?;
        info!("monitor acquired singleton lock at {}", lock_path.display());

        loop {
            if *shutdown.borrow() {
                return Ok(());
            }
            match self.run_cycle().await {
                Ok(summary) => {
                    self.emit(EngineEvent::MonitorCycleCompleted {
                        deployments_scanned: summary.deployments_scanned,
                        positions_evaluated: summary.positions_evaluated,
                    });
                }
                Err(e) => warn!("monitor cycle failed: {e:#}"),
            }
            let _ = lock.heartbeat();

            tokio::select! {
                _ = tokio::time::sleep(CYCLE_INTERVAL) => {}
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// One full sweep across every (deployment, venue) pair.
    pub async fn run_cycle(&self) -> Result<CycleSummary> {
        let mut summary = CycleSummary::default();
        let deployments = self.repo.list_deployments().await.context("listing deployments")?;

        for deployment in &deployments {
            if !deployment.is_eligible() {
                continue;
            }
            summary.deployments_scanned += 1;
            let venues = if deployment.enabled_venues.is_empty() {
                VENUES.to_vec()
            } else {
                deployment.enabled_venues.clone()
            };
            for venue in venues {
                let Some(adapter) = self.adapters.get(&venue).cloned() else { continue };
                match self.cycle_for(deployment, venue, &adapter).await {
                    Ok(n) => summary.positions_evaluated += n,
                    Err(e) => warn!(
                        deployment_id = %deployment.id, venue = %venue,
                        "monitor cycle step failed: {e:#}"
                    ),
                }
            }
        }
        Ok(summary)
    }

    async fn owner_for(&self, deployment: &Deployment, venue: VenueKind) -> Option<Address> {
        if venue.is_vault_mediated() {
            return deployment.safe_wallet.parse().ok();
        }
        self.repo
            .get_agent_address(&deployment.user_wallet, venue)
            .await
            .ok()
            .flatten()
            .and_then(|a| a.agent_address.parse().ok())
    }

    async fn cycle_for(
        &self,
        deployment: &Deployment,
        venue: VenueKind,
        adapter: &Arc<dyn VenueAdapter>,
    ) -> Result<u32> {
        let local = self
            .repo
            .list_open_for_deployment_venue(&deployment.id, venue)
            .await
            .context("loading local positions")?;

        let owner = self.owner_for(deployment, venue).await;

        let venue_truth = if adapter.supports_position_listing() {
            match owner {
                Some(addr) => adapter.list_open_positions(addr).await.unwrap_or_default(),
                None => Vec::new(),
            }
        } else {
            Vec::new()
        };

        if adapter.supports_position_listing() {
            self.auto_discover(deployment, venue, &venue_truth, &local).await;
        }

        let mut evaluated = 0;
        for position in &local {
            if self.evaluate_position(deployment, position.clone(), adapter.as_ref(), owner).await.is_ok() {
                evaluated += 1;
            }
        }

        if adapter.supports_position_listing() {
            self.reconcile_orphans(adapter.as_ref(), owner, &local, &venue_truth).await;
        }

        Ok(evaluated)
    }

    async fn auto_discover(
        &self,
        deployment: &Deployment,
        venue: VenueKind,
        venue_truth: &[crate::venues::VenueOpenPosition],
        local: &[Position],
    ) {
        for undiscovered in reconcile::undiscovered(venue_truth, local) {
            let signal = Signal {
                id: uuid::Uuid::new_v4().to_string(),
                agent_id: deployment.agent_id.clone(),
                venue,
                token_symbol: undiscovered.token_symbol.clone(),
                side: undiscovered.side,
                size_model: crate::model::SizeModel::FixedUsdc { value: undiscovered.qty * undiscovered.current_price },
                risk_model: crate::model::RiskModel::default(),
                source_ref: vec!["AUTO_DISCOVERED".to_string()],
                created_at: now_epoch_ms(),
            };
            if let Err(e) = self.repo.insert_signal(&signal).await {
                warn!("auto-discovery signal insert failed: {e:#}");
                continue;
            }

            let position = Position {
                id: uuid::Uuid::new_v4().to_string(),
                deployment_id: deployment.id.clone(),
                signal_id: signal.id.clone(),
                venue,
                token_symbol: undiscovered.token_symbol.clone(),
                side: undiscovered.side,
                entry_price: undiscovered.current_price,
                qty: undiscovered.qty,
                entry_tx_ref: String::new(),
                opened_at: now_epoch_ms(),
                status: PositionStatus::Open,
                closed_at: None,
                exit_price: None,
                exit_tx_ref: None,
                pnl: None,
                exit_reason: None,
                trailing: crate::model::TrailingParams { enabled: true, trailing_percent: 1.0, highest_price: None, lowest_price: None },
                venue_trade_id: undiscovered.venue_trade_id.clone(),
                venue_trade_index: undiscovered.venue_trade_index,
            };
            match self.repo.insert_position_if_absent(position).await {
                Ok(crate::repo::PositionUpsertOutcome::Created(created)) => {
                    self.emit(EngineEvent::PositionDiscovered {
                        position_id: created.id,
                        deployment_id: deployment.id.clone(),
                        venue: venue.to_string(),
                        token_symbol: undiscovered.token_symbol.clone(),
                    });
                }
                Ok(crate::repo::PositionUpsertOutcome::AlreadyExists(_)) => {
                    // Another monitor instance won the race this cycle.
                }
                Err(e) => warn!("auto-discovery position insert failed: {e:#}"),
            }
        }
    }

    async fn evaluate_position(
        &self,
        deployment: &Deployment,
        mut position: Position,
        adapter: &dyn VenueAdapter,
        owner: Option<Address>,
    ) -> Result<()> {
        if position.venue == VenueKind::PerpC && position.venue_trade_index.is_none() {
            if !self.try_resolve_perp_c_pending(owner, &mut position).await {
                // Never confirmed-filled yet: leave OPEN, skip trailing eval.
                return Ok(());
            }
        }

        let current_price = adapter
            .current_price(&position.token_symbol)
            .await
            .context("reading current price")?;

        let outcome = trailing::evaluate(position.side, position.entry_price, current_price, &position.trailing);
        match outcome {
            trailing::TrailingOutcome::Hold { updated } => {
                if updated.highest_price != position.trailing.highest_price
                    || updated.lowest_price != position.trailing.lowest_price
                {
                    let _ = self.repo.update_trailing(&position.id, &updated).await;
                }
                Ok(())
            }
            trailing::TrailingOutcome::Close { reason, updated } => {
                let _ = self.repo.update_trailing(&position.id, &updated).await;
                self.trigger_close(deployment, &position, adapter, owner, reason).await;
                Ok(())
            }
        }
    }

    async fn try_resolve_perp_c_pending(&self, owner: Option<Address>, position: &mut Position) -> bool {
        let (Some(perp_c), Some(trader)) = (&self.perp_c, owner) else { return false };
        match perp_c.resolve_pending(trader, 0, PERP_C_SCAN_WINDOW).await {
            Ok(Some((index, open_price))) => {
                if self.repo.confirm_perp_c_fill(&position.id, open_price, index).await.is_ok() {
                    position.entry_price = open_price;
                    position.venue_trade_index = Some(index);
                    position.trailing.highest_price = None;
                    position.trailing.lowest_price = None;
                    true
                } else {
                    false
                }
            }
            Ok(None) => false,
            Err(e) => {
                warn!("perp-c pending resolution failed: {e}");
                false
            }
        }
    }

    /// OPEN -> CLOSING CAS, submit close, finalize or revert. Mirrors the
    /// executor's own close path; the monitor is just another close
    /// initiator racing on the same CAS.
    async fn trigger_close(
        &self,
        deployment: &Deployment,
        position: &Position,
        adapter: &dyn VenueAdapter,
        owner: Option<Address>,
        reason: ExitReason,
    ) {
        let won_cas = matches!(self.repo.try_mark_closing(&position.id).await, Ok(true));
        if !won_cas {
            return;
        }

        let close_result = adapter.close(CloseRequest { position: position.clone(), agent_address: owner }).await;

        if let Some(err) = close_result.error {
            if err.contains("already closed") || err.contains("closed_externally") {
                let _ = self
                    .repo
                    .finalize_close(&position.id, now_epoch_ms(), position.entry_price, "", 0.0, ExitReason::ClosedExternally, position.qty)
                    .await;
                return;
            }
            warn!(position_id = %position.id, "monitor close submission failed: {err}");
            let _ = self.repo.revert_to_open(&position.id).await;
            return;
        }

        let exit_price = close_result.exit_price.unwrap_or(position.entry_price);
        let pnl = close_result.realized_pnl.unwrap_or(0.0);
        match self
            .repo
            .finalize_close(&position.id, now_epoch_ms(), exit_price, close_result.tx_ref.as_deref().unwrap_or(""), pnl, reason, position.qty)
            .await
        {
            Ok(()) => self.emit(EngineEvent::PositionClosed {
                position_id: position.id.clone(),
                deployment_id: deployment.id.clone(),
                exit_reason: reason.to_string(),
                pnl,
            }),
            Err(e) => warn!("finalizing monitor-triggered close failed: {e:#}"),
        }
    }

    /// Local positions the venue no longer reports open. Recovers precise
    /// exit price/P&L via `recent_closed_fill` where the venue exposes a
    /// historical-fills API; otherwise marks closed at zero P&L.
    async fn reconcile_orphans(
        &self,
        adapter: &dyn VenueAdapter,
        owner: Option<Address>,
        local: &[Position],
        venue_truth: &[crate::venues::VenueOpenPosition],
    ) {
        for orphan in reconcile::orphaned(local, venue_truth) {
            let closed_fill = match owner {
                Some(addr) => adapter.recent_closed_fill(addr, &orphan.token_symbol).await.ok().flatten(),
                None => None,
            };
            let (exit_price, pnl, reason) = match closed_fill {
                Some(fill) => (fill.exit_price, fill.pnl, ExitReason::ClosedExternallyWithPnl),
                None => (orphan.entry_price, 0.0, ExitReason::ClosedExternally),
            };
            if self
                .repo
                .finalize_close(&orphan.id, now_epoch_ms(), exit_price, "", pnl, reason, orphan.qty)
                .await
                .is_ok()
            {
                self.emit(EngineEvent::PositionReconciled {
                    position_id: orphan.id.clone(),
                    deployment_id: orphan.deployment_id.clone(),
                    exit_reason: reason.to_string(),
                });
            }
        }
    }
}

fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

//! Pre-trade validation: everything the executor must confirm before
//! calling into a venue adapter. Grounded on the base crate's
//! `run/executor/evm.rs` pre-flight balance/allowance checks, generalized
//! to cover venue availability, collateral sizing, and per-venue minimums
//! uniformly across vault-mediated and delegated venues.

use crate::model::signal::SizeModel;
use crate::model::{Deployment, Signal, VenueKind};
use crate::repo::Repo;
use crate::venues::VenueAdapter;

/// The resolved trade size and anything downstream steps need from
/// pre-trade validation.
#[derive(Debug, Clone, Copy)]
pub struct ValidationOutcome {
    /// Collateral-asset units (or quote-currency units for perps) to send
    /// to the venue adapter.
    pub size: f64,
}

pub async fn validate_pretrade(
    signal: &Signal,
    _deployment: &Deployment,
    venue: VenueKind,
    repo: &Repo,
    adapter: &dyn VenueAdapter,
) -> Result<ValidationOutcome, String> {
    let token = signal.stripped_token();

    if venue != VenueKind::Spot {
        match repo.is_market_active(venue, token).await {
            Ok(true) => {}
            Ok(false) => return Err("market-inactive".to_string()),
            Err(e) => return Err(format!("repo-error: {e}")),
        }
    }

    // `available_balance` returns `f64::INFINITY` for venues with no
    // wired balance read, so the min-size check below still fires for a
    // zero-value `balance-percentage` signal even when the venue can't
    // tell us its real balance.
    let balance = match adapter.available_balance().await {
        Ok(b) => b,
        Err(_) => f64::INFINITY,
    };

    // Distinct from `insufficient-balance` below: a genuinely empty vault
    // is a different operator-facing problem (fund the vault) than a
    // signal sized larger than a nonzero balance (resize the signal).
    if balance <= 0.0 {
        return Err("no-balance".to_string());
    }

    let size = match &signal.size_model {
        SizeModel::FixedUsdc { value } => *value,
        SizeModel::BalancePercentage { value } => balance * (value / 100.0),
    };

    let min_size = venue.min_size();
    if size < min_size {
        return Err("below-minimum".to_string());
    }

    if size > balance {
        return Err("insufficient-balance".to_string());
    }

    Ok(ValidationOutcome { size })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::model::deployment::DeploymentStatus;
    use crate::model::signal::{RiskModel, Side};
    use crate::venues::{AdapterError, CloseRequest, CloseResult, OpenRequest, OpenResult, VenueOpenPosition};

    struct MockAdapter {
        balance: f64,
    }

    #[async_trait]
    impl VenueAdapter for MockAdapter {
        fn kind(&self) -> VenueKind {
            VenueKind::PerpB
        }

        async fn open(&self, _request: OpenRequest) -> OpenResult {
            OpenResult::default()
        }

        async fn close(&self, _request: CloseRequest) -> CloseResult {
            CloseResult::default()
        }

        async fn list_open_positions(
            &self,
            _owner: alloy::primitives::Address,
        ) -> Result<Vec<VenueOpenPosition>, AdapterError> {
            Ok(vec![])
        }

        async fn current_price(&self, _token_symbol: &str) -> Result<f64, AdapterError> {
            Ok(0.0)
        }

        async fn available_balance(&self) -> Result<f64, AdapterError> {
            Ok(self.balance)
        }
    }

    fn deployment() -> Deployment {
        Deployment {
            id: "dep-1".into(),
            agent_id: "agent-1".into(),
            user_wallet: "0xabc".into(),
            safe_wallet: "0xsafe".into(),
            status: DeploymentStatus::Active,
            sub_active: true,
            module_enabled: true,
            enabled_venues: vec![VenueKind::PerpB],
            profit_receiver_address: "0xreceiver".into(),
            created_at: 0,
        }
    }

    fn signal(size_model: SizeModel) -> Signal {
        Signal {
            id: "sig-1".into(),
            agent_id: "agent-1".into(),
            venue: VenueKind::PerpB,
            token_symbol: "WETH".into(),
            side: Side::Long,
            size_model,
            risk_model: RiskModel::default(),
            source_ref: vec![],
            created_at: 0,
        }
    }

    #[tokio::test]
    async fn rejects_inactive_market() {
        let repo = Repo::open_in_memory().unwrap();
        let dep = deployment();
        let sig = signal(SizeModel::FixedUsdc { value: 50.0 });
        let adapter = MockAdapter { balance: f64::INFINITY };
        let result = validate_pretrade(&sig, &dep, VenueKind::PerpB, &repo, &adapter).await;
        assert_eq!(result.err(), Some("market-inactive".to_string()));
    }

    #[tokio::test]
    async fn rejects_below_venue_minimum() {
        let repo = Repo::open_in_memory().unwrap();
        repo.upsert_venue_market(&crate::model::VenueMarket {
            venue: VenueKind::PerpB,
            token_symbol: "WETH".into(),
            market_ref: "weth".into(),
            is_active: true,
            min_position: 10.0,
            max_leverage: 5.0,
        })
        .await
        .unwrap();
        let dep = deployment();
        let sig = signal(SizeModel::FixedUsdc { value: 1.0 });
        let adapter = MockAdapter { balance: f64::INFINITY };
        let result = validate_pretrade(&sig, &dep, VenueKind::PerpB, &repo, &adapter).await;
        assert_eq!(result.err(), Some("below-minimum".to_string()));
    }

    #[tokio::test]
    async fn zero_percent_balance_yields_below_minimum() {
        let repo = Repo::open_in_memory().unwrap();
        repo.upsert_venue_market(&crate::model::VenueMarket {
            venue: VenueKind::PerpB,
            token_symbol: "WETH".into(),
            market_ref: "weth".into(),
            is_active: true,
            min_position: 10.0,
            max_leverage: 5.0,
        })
        .await
        .unwrap();
        let dep = deployment();
        let sig = signal(SizeModel::BalancePercentage { value: 0.0 });
        let adapter = MockAdapter { balance: 1_000.0 };
        let result = validate_pretrade(&sig, &dep, VenueKind::PerpB, &repo, &adapter).await;
        assert_eq!(result.err(), Some("below-minimum".to_string()));
    }

    #[tokio::test]
    async fn zero_balance_yields_no_balance() {
        let repo = Repo::open_in_memory().unwrap();
        repo.upsert_venue_market(&crate::model::VenueMarket {
            venue: VenueKind::PerpB,
            token_symbol: "WETH".into(),
            market_ref: "weth".into(),
            is_active: true,
            min_position: 10.0,
            max_leverage: 5.0,
        })
        .await
        .unwrap();
        let dep = deployment();
        let sig = signal(SizeModel::FixedUsdc { value: 50.0 });
        let adapter = MockAdapter { balance: 0.0 };
        let result = validate_pretrade(&sig, &dep, VenueKind::PerpB, &repo, &adapter).await;
        assert_eq!(result.err(), Some("no-balance".to_string()));
    }

    #[tokio::test]
    async fn fixed_usdc_above_balance_is_rejected() {
        let repo = Repo::open_in_memory().unwrap();
        repo.upsert_venue_market(&crate::model::VenueMarket {
            venue: VenueKind::PerpB,
            token_symbol: "WETH".into(),
            market_ref: "weth".into(),
            is_active: true,
            min_position: 10.0,
            max_leverage: 5.0,
        })
        .await
        .unwrap();
        let dep = deployment();
        let sig = signal(SizeModel::FixedUsdc { value: 500.0 });
        let adapter = MockAdapter { balance: 100.0 };
        let result = validate_pretrade(&sig, &dep, VenueKind::PerpB, &repo, &adapter).await;
        assert_eq!(result.err(), Some("insufficient-balance".to_string()));
    }
}

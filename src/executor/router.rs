//! Venue routing: resolve a signal's `MULTI` marker to one concrete venue
//! a deployment has enabled. Grounded on the base crate's
//! `build_executors` dispatch-by-node-type match, generalized from
//! "one executor per node kind" to "fixed preference order over enabled
//! venues".

use crate::model::{Deployment, Signal, VenueKind};
use crate::repo::Repo;

/// Preference order when a deployment enables more than one venue for the
/// same signal: cheapest/most-liquid on-chain route first, delegated
/// off-chain venues last.
const PREFERENCE_ORDER: [VenueKind; 4] =
    [VenueKind::Spot, VenueKind::PerpA, VenueKind::PerpB, VenueKind::PerpC];

/// Resolve the venue to trade on for this signal against this deployment.
///
/// If the signal already names a concrete venue, it must be one of the
/// deployment's enabled venues. A `MULTI` signal is resolved to the
/// highest-preference enabled venue with an active market for the token.
pub async fn route_venue(signal: &Signal, deployment: &Deployment, repo: &Repo) -> Result<VenueKind, String> {
    let enabled: Vec<VenueKind> = if deployment.enabled_venues.is_empty() {
        PREFERENCE_ORDER.to_vec()
    } else {
        deployment.enabled_venues.clone()
    };

    if signal.venue != VenueKind::Multi {
        return if enabled.contains(&signal.venue) {
            Ok(signal.venue)
        } else {
            Err("venue-not-enabled-for-deployment".to_string())
        };
    }

    let token = signal.stripped_token();
    for candidate in PREFERENCE_ORDER {
        if !enabled.contains(&candidate) {
            continue;
        }
        match repo.is_market_active(candidate, token).await {
            Ok(true) => return Ok(candidate),
            Ok(false) => continue,
            Err(e) => return Err(format!("repo-error: {e}")),
        }
    }
    Err("no-eligible-venue".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::deployment::DeploymentStatus;
    use crate::model::signal::{RiskModel, Side, SizeModel};

    fn deployment(enabled: Vec<VenueKind>) -> Deployment {
        Deployment {
            id: "dep-1".into(),
            agent_id: "agent-1".into(),
            user_wallet: "0xabc".into(),
            safe_wallet: "0xsafe".into(),
            status: DeploymentStatus::Active,
            sub_active: true,
            module_enabled: true,
            enabled_venues: enabled,
            profit_receiver_address: "0xreceiver".into(),
            created_at: 0,
        }
    }

    fn signal(venue: VenueKind) -> Signal {
        Signal {
            id: "sig-1".into(),
            agent_id: "agent-1".into(),
            venue,
            token_symbol: "WETH".into(),
            side: Side::Long,
            size_model: SizeModel::FixedUsdc { value: 100.0 },
            risk_model: RiskModel::default(),
            source_ref: vec![],
            created_at: 0,
        }
    }

    #[tokio::test]
    async fn explicit_venue_must_be_enabled() {
        let repo = Repo::open_in_memory().unwrap();
        let dep = deployment(vec![VenueKind::PerpB]);
        let sig = signal(VenueKind::Spot);
        let result = route_venue(&sig, &dep, &repo).await;
        assert_eq!(result, Err("venue-not-enabled-for-deployment".to_string()));
    }

    #[tokio::test]
    async fn multi_signal_picks_first_active_in_preference_order() {
        let repo = Repo::open_in_memory().unwrap();
        repo.upsert_venue_market(&crate::model::VenueMarket {
            venue: VenueKind::PerpA,
            token_symbol: "WETH".into(),
            market_ref: "weth-market".into(),
            is_active: true,
            min_position: 0.0,
            max_leverage: 10.0,
        })
        .await
        .unwrap();
        let dep = deployment(vec![VenueKind::Spot, VenueKind::PerpA]);
        let sig = signal(VenueKind::Multi);
        let result = route_venue(&sig, &dep, &repo).await;
        assert_eq!(result, Ok(VenueKind::PerpA));
    }
}

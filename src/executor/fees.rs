//! Fee policy: computes the platform's cut of a realized gain as a
//! BillingEvent amount. Four variants, configurable per venue, matching
//! the coordinator's `*_FEE_MODEL` environment knobs.

use std::collections::HashMap;

use crate::model::VenueKind;

/// One fee model. `Tiered` walks its thresholds in ascending order and
/// applies the percent of the first tier the pnl doesn't exceed, falling
/// back to the last tier's percent above the highest threshold.
#[derive(Debug, Clone)]
pub enum FeeModel {
    Flat { amount: f64 },
    Percentage { percent: f64 },
    Tiered { tiers: Vec<(f64, f64)> },
    ProfitShare { percent: f64 },
}

impl FeeModel {
    fn compute(&self, pnl: f64) -> f64 {
        if pnl <= 0.0 {
            return 0.0;
        }
        match self {
            FeeModel::Flat { amount } => *amount,
            FeeModel::Percentage { percent } => pnl * (percent / 100.0),
            FeeModel::ProfitShare { percent } => pnl * (percent / 100.0),
            FeeModel::Tiered { tiers } => {
                let mut percent = 0.0;
                for (threshold, tier_percent) in tiers {
                    if pnl <= *threshold {
                        percent = *tier_percent;
                        break;
                    }
                    percent = *tier_percent;
                }
                pnl * (percent / 100.0)
            }
        }
    }
}

/// Default creator profit share, per venue, absent an explicit override.
const DEFAULT_PROFIT_SHARE_PERCENT: f64 = 20.0;

/// Per-venue fee model table. Venues with no explicit entry fall back to
/// the default 20% profit share.
#[derive(Debug, Clone)]
pub struct FeePolicy {
    by_venue: HashMap<VenueKind, FeeModel>,
}

impl Default for FeePolicy {
    fn default() -> Self {
        FeePolicy { by_venue: HashMap::new() }
    }
}

impl FeePolicy {
    pub fn with_venue_model(mut self, venue: VenueKind, model: FeeModel) -> Self {
        self.by_venue.insert(venue, model);
        self
    }

    /// The BillingEvent amount to record for this venue's realized pnl.
    pub fn compute(&self, venue: VenueKind, pnl: f64) -> f64 {
        match self.by_venue.get(&venue) {
            Some(model) => model.compute(pnl),
            None => FeeModel::ProfitShare { percent: DEFAULT_PROFIT_SHARE_PERCENT }.compute(pnl),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profit_share_is_twenty_percent() {
        let policy = FeePolicy::default();
        assert!((policy.compute(VenueKind::Spot, 10.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_pnl_never_charged() {
        let policy = FeePolicy::default();
        assert_eq!(policy.compute(VenueKind::Spot, 0.0), 0.0);
        assert_eq!(policy.compute(VenueKind::Spot, -5.0), 0.0);
    }

    #[test]
    fn flat_fee_ignores_magnitude() {
        let policy = FeePolicy::default().with_venue_model(VenueKind::PerpA, FeeModel::Flat { amount: 1.5 });
        assert_eq!(policy.compute(VenueKind::PerpA, 1000.0), 1.5);
    }

    #[test]
    fn tiered_uses_matching_bracket() {
        let policy = FeePolicy::default().with_venue_model(
            VenueKind::PerpB,
            FeeModel::Tiered { tiers: vec![(100.0, 10.0), (f64::MAX, 25.0)] },
        );
        assert!((policy.compute(VenueKind::PerpB, 50.0) - 5.0).abs() < 1e-9);
        assert!((policy.compute(VenueKind::PerpB, 500.0) - 125.0).abs() < 1e-9);
    }
}

//! Pure matching helpers for the per-(deployment, venue) cycle: which
//! venue-truth positions have no local record (auto-discovery) and which
//! local positions have no venue-truth record (orphans).

use crate::model::Position;
use crate::venues::VenueOpenPosition;

fn matches(position: &Position, venue_pos: &VenueOpenPosition) -> bool {
    position
        .venue_trade_index
        .zip(venue_pos.venue_trade_index)
        .map(|(a, b)| a == b)
        .unwrap_or_else(|| position.token_symbol == venue_pos.token_symbol)
}

/// Venue-truth positions absent from the local set.
pub fn undiscovered<'a>(venue_truth: &'a [VenueOpenPosition], local: &[Position]) -> Vec<&'a VenueOpenPosition> {
    venue_truth
        .iter()
        .filter(|vp| !local.iter().any(|p| matches(p, vp)))
        .collect()
}

/// Local positions absent from the venue-truth set.
pub fn orphaned<'a>(local: &'a [Position], venue_truth: &[VenueOpenPosition]) -> Vec<&'a Position> {
    local
        .iter()
        .filter(|p| !venue_truth.iter().any(|vp| matches(p, vp)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::position::{PositionStatus, TrailingParams};
    use crate::model::signal::Side;
    use crate::model::VenueKind;

    fn sample(venue_trade_index: Option<u64>, token: &str) -> Position {
        Position {
            id: "p1".into(),
            deployment_id: "d1".into(),
            signal_id: "s1".into(),
            venue: VenueKind::PerpB,
            token_symbol: token.to_string(),
            side: Side::Long,
            entry_price: 100.0,
            qty: 1.0,
            entry_tx_ref: "0x1".into(),
            opened_at: 0,
            status: PositionStatus::Open,
            closed_at: None,
            exit_price: None,
            exit_tx_ref: None,
            pnl: None,
            exit_reason: None,
            trailing: TrailingParams::default(),
            venue_trade_id: None,
            venue_trade_index,
        }
    }

    fn venue_pos(venue_trade_index: Option<u64>, token: &str) -> VenueOpenPosition {
        VenueOpenPosition {
            venue_trade_id: None,
            venue_trade_index,
            token_symbol: token.to_string(),
            side: Side::Long,
            qty: 1.0,
            current_price: 100.0,
        }
    }

    #[test]
    fn matched_by_token_when_no_trade_index() {
        let local = vec![sample(None, "WETH")];
        let truth = vec![venue_pos(None, "WETH")];
        assert!(undiscovered(&truth, &local).is_empty());
        assert!(orphaned(&local, &truth).is_empty());
    }

    #[test]
    fn unmatched_token_is_both_undiscovered_and_orphaned() {
        let local = vec![sample(None, "WETH")];
        let truth = vec![venue_pos(None, "BTC")];
        assert_eq!(undiscovered(&truth, &local).len(), 1);
        assert_eq!(orphaned(&local, &truth).len(), 1);
    }
}

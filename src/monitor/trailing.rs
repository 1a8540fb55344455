//! Trailing-stop / hard-stop state machine, parameterized over side only
//! — qty_semantics never enters this math, it only affects P&L.

use crate::model::position::ExitReason;
use crate::model::signal::Side;
use crate::model::position::TrailingParams;

pub const HARD_STOP_PERCENT: f64 = 10.0;
const ACTIVATION_PERCENT: f64 = 3.0;

/// Result of evaluating one position for one cycle: either hold (with the
/// trailing anchor possibly advanced) or close with a reason.
pub enum TrailingOutcome {
    Hold { updated: TrailingParams },
    Close { reason: ExitReason, updated: TrailingParams },
}

pub fn evaluate(side: Side, entry_price: f64, current_price: f64, trailing: &TrailingParams) -> TrailingOutcome {
    match side {
        Side::Long => evaluate_long(entry_price, current_price, trailing),
        Side::Short => evaluate_short(entry_price, current_price, trailing),
    }
}

fn evaluate_long(entry: f64, current: f64, trailing: &TrailingParams) -> TrailingOutcome {
    let hard_stop_price = entry * (1.0 - HARD_STOP_PERCENT / 100.0);
    if current <= hard_stop_price {
        return TrailingOutcome::Close { reason: ExitReason::HardStopLoss, updated: trailing.clone() };
    }
    let mut updated = trailing.clone();
    if !trailing.enabled {
        return TrailingOutcome::Hold { updated };
    }

    let activation = entry * (1.0 + ACTIVATION_PERCENT / 100.0);
    let highest = updated.highest_price.map(|h| h.max(current)).unwrap_or(current);
    updated.highest_price = Some(highest);

    if highest >= activation {
        let stop_price = highest * (1.0 - trailing.trailing_percent / 100.0);
        if current <= stop_price {
            return TrailingOutcome::Close { reason: ExitReason::TrailingStop, updated };
        }
    }
    TrailingOutcome::Hold { updated }
}

fn evaluate_short(entry: f64, current: f64, trailing: &TrailingParams) -> TrailingOutcome {
    let hard_stop_price = entry * (1.0 + HARD_STOP_PERCENT / 100.0);
    if current >= hard_stop_price {
        return TrailingOutcome::Close { reason: ExitReason::HardStopLoss, updated: trailing.clone() };
    }
    let mut updated = trailing.clone();
    if !trailing.enabled {
        return TrailingOutcome::Hold { updated };
    }

    let activation = entry * (1.0 - ACTIVATION_PERCENT / 100.0);
    let lowest = updated.lowest_price.map(|l| l.min(current)).unwrap_or(current);
    updated.lowest_price = Some(lowest);

    if lowest <= activation {
        let stop_price = lowest * (1.0 + trailing.trailing_percent / 100.0);
        if current >= stop_price {
            return TrailingOutcome::Close { reason: ExitReason::TrailingStop, updated };
        }
    }
    TrailingOutcome::Hold { updated }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed(highest: Option<f64>) -> TrailingParams {
        TrailingParams { enabled: true, trailing_percent: 1.0, highest_price: highest, lowest_price: None }
    }

    #[test]
    fn long_hard_stop_fires_at_ten_percent_down() {
        let outcome = evaluate(Side::Long, 50_000.0, 44_900.0, &armed(Some(50_000.0)));
        assert!(matches!(outcome, TrailingOutcome::Close { reason: ExitReason::HardStopLoss, .. }));
    }

    #[test]
    fn long_trailing_arms_after_three_percent_then_stops_on_one_percent_pullback() {
        let trailing = armed(None);
        let outcome = evaluate(Side::Long, 2000.0, 2070.0, &trailing);
        let updated = match outcome {
            TrailingOutcome::Hold { updated } => updated,
            _ => panic!("expected hold while still rising"),
        };
        assert_eq!(updated.highest_price, Some(2070.0));

        let outcome2 = evaluate(Side::Long, 2000.0, 2049.0, &updated);
        assert!(matches!(outcome2, TrailingOutcome::Close { reason: ExitReason::TrailingStop, .. }));
    }

    #[test]
    fn long_before_activation_never_trailing_stops() {
        let trailing = armed(Some(2010.0));
        let outcome = evaluate(Side::Long, 2000.0, 1991.0, &trailing);
        assert!(matches!(outcome, TrailingOutcome::Hold { .. }));
    }

    #[test]
    fn short_mirrors_long() {
        let trailing = TrailingParams { enabled: true, trailing_percent: 1.0, highest_price: None, lowest_price: Some(1940.0) };
        let outcome = evaluate(Side::Short, 2000.0, 1959.5, &trailing);
        assert!(matches!(outcome, TrailingOutcome::Close { reason: ExitReason::TrailingStop, .. }));
    }
}

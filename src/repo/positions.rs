use anyhow::{Context, Result};
use rusqlite::params;

use crate::model::position::{ExitReason, PositionStatus, TrailingParams};
use crate::model::signal::Side;
use crate::model::{Position, VenueKind};

use super::Repo;

/// Result of `insert_position_if_absent`: tells the caller whether it won
/// the creation race or lost it.
#[derive(Debug)]
pub enum PositionUpsertOutcome {
    Created(Position),
    AlreadyExists(Position),
}

impl Repo {
    /// Insert a new Position for `(deployment_id, signal_id)`, relying on
    /// the schema's UNIQUE constraint as the arbiter between racing
    /// workers. The loser refetches by key and returns it as success
    ///.
    pub async fn insert_position_if_absent(&self, position: Position) -> Result<PositionUpsertOutcome> {
        let conn = self.lock().await;
        let insert_result = conn.execute(
            "INSERT INTO positions (
                id, deployment_id, signal_id, venue, token_symbol, side, entry_price, qty,
                entry_tx_ref, opened_at, status, closed_at, exit_price, exit_tx_ref, pnl,
                exit_reason, trailing_enabled, trailing_percent, highest_price, lowest_price,
                venue_trade_id, venue_trade_index
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22)",
            params![
                position.id,
                position.deployment_id,
                position.signal_id,
                position.venue.as_str(),
                position.token_symbol,
                side_str(position.side),
                position.entry_price,
                position.qty,
                position.entry_tx_ref,
                position.opened_at,
                status_str(position.status),
                position.closed_at,
                position.exit_price,
                position.exit_tx_ref,
                position.pnl,
                position.exit_reason.map(|r| r.to_string()),
                position.trailing.enabled,
                position.trailing.trailing_percent,
                position.trailing.highest_price,
                position.trailing.lowest_price,
                position.venue_trade_id,
                position.venue_trade_index,
            ],
        );

        match insert_result {
            Ok(_) => Ok(PositionUpsertOutcome::Created(position)),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                let existing = conn
                    .query_row(
                        &select_one_sql(),
                        params![position.deployment_id, position.signal_id],
                        row_to_position,
                    )
                    .context("refetching colliding position")?;
                Ok(PositionUpsertOutcome::AlreadyExists(existing))
            }
            Err(e) => Err(e).context("inserting position"),
        }
    }

    pub async fn get_position(&self, id: &str) -> Result<Option<Position>> {
        let conn = self.lock().await;
        let result = conn.query_row(&select_by_id_sql(), params![id], row_to_position);
        match result {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).context("loading position"),
        }
    }

    pub async fn get_by_deployment_signal(&self, deployment_id: &str, signal_id: &str) -> Result<Option<Position>> {
        let conn = self.lock().await;
        let result = conn.query_row(&select_one_sql(), params![deployment_id, signal_id], row_to_position);
        match result {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).context("loading position by (deployment, signal)"),
        }
    }

    pub async fn list_open_for_deployment_venue(
        &self,
        deployment_id: &str,
        venue: VenueKind,
    ) -> Result<Vec<Position>> {
        let conn = self.lock().await;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE deployment_id = ?1 AND venue = ?2 AND status != 'CLOSED'",
            select_base_sql()
        ))?;
        let rows = stmt
            .query_map(params![deployment_id, venue.as_str()], row_to_position)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("listing open positions")?;
        Ok(rows)
    }

    /// Conditional OPEN -> CLOSING transition. Returns `true` iff this
    /// caller won the race.
    pub async fn try_mark_closing(&self, id: &str) -> Result<bool> {
        let conn = self.lock().await;
        let updated = conn.execute(
            "UPDATE positions SET status = 'CLOSING' WHERE id = ?1 AND status = 'OPEN'",
            params![id],
        )?;
        Ok(updated == 1)
    }

    /// Revert a failed close submission back to OPEN for retry next cycle.
    pub async fn revert_to_open(&self, id: &str) -> Result<()> {
        let conn = self.lock().await;
        conn.execute(
            "UPDATE positions SET status = 'OPEN' WHERE id = ?1 AND status = 'CLOSING'",
            params![id],
        )?;
        Ok(())
    }

    pub async fn finalize_close(
        &self,
        id: &str,
        closed_at: i64,
        exit_price: f64,
        exit_tx_ref: &str,
        pnl: f64,
        exit_reason: ExitReason,
        actual_qty_closed: f64,
    ) -> Result<()> {
        let conn = self.lock().await;
        conn.execute(
            "UPDATE positions SET status = 'CLOSED', closed_at = ?1, exit_price = ?2, exit_tx_ref = ?3, pnl = ?4, exit_reason = ?5, qty = ?6 WHERE id = ?7",
            params![closed_at, exit_price, exit_tx_ref, pnl, exit_reason.to_string(), actual_qty_closed, id],
        )
        .context("finalizing position close")?;
        Ok(())
    }

    pub async fn update_trailing(&self, id: &str, trailing: &TrailingParams) -> Result<()> {
        let conn = self.lock().await;
        conn.execute(
            "UPDATE positions SET trailing_enabled = ?1, trailing_percent = ?2, highest_price = ?3, lowest_price = ?4 WHERE id = ?5",
            params![trailing.enabled, trailing.trailing_percent, trailing.highest_price, trailing.lowest_price, id],
        )?;
        Ok(())
    }

    /// PERP-C delayed-fill update: once the venue confirms a fill at a
    /// different entry price than the submission estimate, update the
    /// entry price and reset the trailing anchors.
    pub async fn update_confirmed_entry(&self, id: &str, entry_price: f64) -> Result<()> {
        let conn = self.lock().await;
        conn.execute(
            "UPDATE positions SET entry_price = ?1, highest_price = NULL, lowest_price = NULL WHERE id = ?2",
            params![entry_price, id],
        )?;
        Ok(())
    }

    /// PERP-C delayed-fill resolution: records both the confirmed entry
    /// price and the venue-assigned trade index a correct close must use.
    pub async fn confirm_perp_c_fill(&self, id: &str, entry_price: f64, venue_trade_index: u64) -> Result<()> {
        let conn = self.lock().await;
        conn.execute(
            "UPDATE positions SET entry_price = ?1, venue_trade_index = ?2, highest_price = NULL, lowest_price = NULL WHERE id = ?3",
            params![entry_price, venue_trade_index, id],
        )?;
        Ok(())
    }
}

fn select_base_sql() -> String {
    "SELECT id, deployment_id, signal_id, venue, token_symbol, side, entry_price, qty,
        entry_tx_ref, opened_at, status, closed_at, exit_price, exit_tx_ref, pnl,
        exit_reason, trailing_enabled, trailing_percent, highest_price, lowest_price,
        venue_trade_id, venue_trade_index
     FROM positions"
        .to_string()
}

fn select_by_id_sql() -> String {
    format!("{} WHERE id = ?1", select_base_sql())
}

fn select_one_sql() -> String {
    format!("{} WHERE deployment_id = ?1 AND signal_id = ?2", select_base_sql())
}

fn side_str(side: Side) -> &'static str {
    match side {
        Side::Long => "LONG",
        Side::Short => "SHORT",
    }
}

fn status_str(s: PositionStatus) -> &'static str {
    match s {
        PositionStatus::Open => "OPEN",
        PositionStatus::Closing => "CLOSING",
        PositionStatus::Closed => "CLOSED",
    }
}

fn row_to_position(row: &rusqlite::Row) -> rusqlite::Result<Position> {
    let venue_str: String = row.get(3)?;
    let side_str: String = row.get(5)?;
    let status_str: String = row.get(10)?;
    let exit_reason_str: Option<String> = row.get(15)?;

    Ok(Position {
        id: row.get(0)?,
        deployment_id: row.get(1)?,
        signal_id: row.get(2)?,
        venue: VenueKind::parse(&venue_str).unwrap_or(VenueKind::Multi),
        token_symbol: row.get(4)?,
        side: if side_str == "LONG" { Side::Long } else { Side::Short },
        entry_price: row.get(6)?,
        qty: row.get(7)?,
        entry_tx_ref: row.get(8)?,
        opened_at: row.get(9)?,
        status: match status_str.as_str() {
            "OPEN" => PositionStatus::Open,
            "CLOSING" => PositionStatus::Closing,
            _ => PositionStatus::Closed,
        },
        closed_at: row.get(11)?,
        exit_price: row.get(12)?,
        exit_tx_ref: row.get(13)?,
        pnl: row.get(14)?,
        exit_reason: exit_reason_str.and_then(|s| parse_exit_reason(&s)),
        trailing: TrailingParams {
            enabled: row.get(16)?,
            trailing_percent: row.get(17)?,
            highest_price: row.get(18)?,
            lowest_price: row.get(19)?,
        },
        venue_trade_id: row.get(20)?,
        venue_trade_index: row.get(21)?,
    })
}

fn parse_exit_reason(s: &str) -> Option<ExitReason> {
    Some(match s {
        "HARD_STOP_LOSS" => ExitReason::HardStopLoss,
        "TRAILING_STOP" => ExitReason::TrailingStop,
        "MANUAL_CLOSE" => ExitReason::ManualClose,
        "closed_externally" => ExitReason::ClosedExternally,
        "closed_externally_with_pnl" => ExitReason::ClosedExternallyWithPnl,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::position::TrailingParams;

    fn sample_position(deployment_id: &str, signal_id: &str) -> Position {
        Position {
            id: uuid::Uuid::new_v4().to_string(),
            deployment_id: deployment_id.to_string(),
            signal_id: signal_id.to_string(),
            venue: VenueKind::Spot,
            token_symbol: "WETH".into(),
            side: Side::Long,
            entry_price: 2000.0,
            qty: 0.005,
            entry_tx_ref: "0xabc".into(),
            opened_at: 0,
            status: PositionStatus::Open,
            closed_at: None,
            exit_price: None,
            exit_tx_ref: None,
            pnl: None,
            exit_reason: None,
            trailing: TrailingParams { enabled: true, trailing_percent: 1.0, highest_price: None, lowest_price: None },
            venue_trade_id: None,
            venue_trade_index: None,
        }
    }

    #[tokio::test]
    async fn insert_then_collision_refetches_same_row() {
        let repo = Repo::open_in_memory().unwrap();
        let p = sample_position("dep-1", "sig-1");
        let out1 = repo.insert_position_if_absent(p.clone()).await.unwrap();
        assert!(matches!(out1, PositionUpsertOutcome::Created(_)));

        let mut p2 = sample_position("dep-1", "sig-1");
        p2.id = uuid::Uuid::new_v4().to_string();
        let out2 = repo.insert_position_if_absent(p2).await.unwrap();
        match out2 {
            PositionUpsertOutcome::AlreadyExists(existing) => assert_eq!(existing.id, p.id),
            _ => panic!("expected collision"),
        }
    }

    #[tokio::test]
    async fn only_one_close_wins_cas() {
        let repo = Repo::open_in_memory().unwrap();
        let p = sample_position("dep-1", "sig-1");
        repo.insert_position_if_absent(p.clone()).await.unwrap();

        let first = repo.try_mark_closing(&p.id).await.unwrap();
        let second = repo.try_mark_closing(&p.id).await.unwrap();
        assert!(first);
        assert!(!second);
    }
}

use anyhow::{Context, Result};
use rusqlite::params;

use crate::model::signal::{RiskModel, SizeModel};
use crate::model::{Signal, VenueKind};

use super::Repo;

impl Repo {
    pub async fn insert_signal(&self, signal: &Signal) -> Result<()> {
        let conn = self.lock().await;
        conn.execute(
            "INSERT INTO signals (id, agent_id, venue, token_symbol, side, size_model, risk_model, source_ref, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                signal.id,
                signal.agent_id,
                signal.venue.as_str(),
                signal.token_symbol,
                side_str(signal.side),
                serde_json::to_string(&signal.size_model)?,
                serde_json::to_string(&signal.risk_model)?,
                serde_json::to_string(&signal.source_ref)?,
                signal.created_at,
            ],
        )
        .context("inserting signal")?;
        Ok(())
    }

    /// Router mutation point: the venue on a signal may be rewritten
    /// exactly once, by the router.
    pub async fn set_signal_venue(&self, signal_id: &str, venue: VenueKind) -> Result<()> {
        let conn = self.lock().await;
        conn.execute(
            "UPDATE signals SET venue = ?1 WHERE id = ?2",
            params![venue.as_str(), signal_id],
        )
        .context("updating signal venue")?;
        Ok(())
    }

    pub async fn get_signal(&self, signal_id: &str) -> Result<Option<Signal>> {
        let conn = self.lock().await;
        let result = conn.query_row(
            "SELECT id, agent_id, venue, token_symbol, side, size_model, risk_model, source_ref, created_at
             FROM signals WHERE id = ?1",
            params![signal_id],
            row_to_signal,
        );
        match result {
            Ok(signal) => Ok(Some(signal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).context("loading signal"),
        }
    }
}

fn side_str(side: crate::model::signal::Side) -> &'static str {
    match side {
        crate::model::signal::Side::Long => "LONG",
        crate::model::signal::Side::Short => "SHORT",
    }
}

fn row_to_signal(row: &rusqlite::Row) -> rusqlite::Result<Signal> {
    let venue_str: String = row.get(2)?;
    let side_str: String = row.get(4)?;
    let size_model_json: String = row.get(5)?;
    let risk_model_json: String = row.get(6)?;
    let source_ref_json: String = row.get(7)?;

    Ok(Signal {
        id: row.get(0)?,
        agent_id: row.get(1)?,
        venue: VenueKind::parse(&venue_str).unwrap_or(VenueKind::Multi),
        token_symbol: row.get(3)?,
        side: if side_str == "LONG" {
            crate::model::signal::Side::Long
        } else {
            crate::model::signal::Side::Short
        },
        size_model: serde_json::from_str::<SizeModel>(&size_model_json)
            .unwrap_or(SizeModel::FixedUsdc { value: 0.0 }),
        risk_model: serde_json::from_str::<RiskModel>(&risk_model_json).unwrap_or_default(),
        source_ref: serde_json::from_str(&source_ref_json).unwrap_or_default(),
        created_at: row.get(8)?,
    })
}
